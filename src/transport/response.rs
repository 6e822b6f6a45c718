//! Raw responses handed from the transport to the store adapter.

use reqwest::StatusCode;

use crate::cache::CacheEntry;

/// Status and body of a completed request, whatever the status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decodes the body as a cache entry.
    ///
    /// Non-success statuses decode to the empty entry, same as a missing key.
    pub fn cache_entry(&self) -> CacheEntry {
        if !self.status.is_success() {
            return CacheEntry::empty();
        }
        CacheEntry::from_body(&self.body)
    }

    pub fn is_created(&self) -> bool {
        self.status == StatusCode::CREATED
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_decodes() {
        let response = RawResponse::new(StatusCode::OK, r#"{"value":"v","ttl":0}"#);
        assert_eq!(response.cache_entry(), CacheEntry::new("v", 0));
        assert!(response.is_ok());
        assert!(!response.is_created());
    }

    #[test]
    fn test_error_status_decodes_empty() {
        let response = RawResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"value":"stale","ttl":0}"#,
        );
        assert!(response.cache_entry().is_empty());
    }
}
