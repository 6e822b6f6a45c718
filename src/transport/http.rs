//! HTTP Transport
//!
//! Maps cache operations onto the remote key/value endpoints. Owns the
//! batching strategy and nothing else: statuses are returned untouched.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use reqwest::{Client, RequestBuilder, Url};
use tracing::{debug, info};

use crate::cache::{CacheEntry, API_PREFIX, CLEAR_SEGMENT};
use crate::config::ClientConfig;
use crate::error::{CacheError, Result};
use crate::transport::RawResponse;

/// HTTP client bound to one remote cache service.
#[derive(Debug, Clone)]
pub struct RemoteTransport {
    client: Client,
    base_url: Url,
}

impl RemoteTransport {
    /// Builds the HTTP client with the configured request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("bigcache-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CacheError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %base_url,
            timeout_secs = config.timeout_secs,
            "Created remote cache transport"
        );

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fully qualified URL of `/api/v1/cache/{key}`.
    ///
    /// The key is percent-encoded as a single path segment. Batched requests
    /// use this too, so none of them depend on a shared base path.
    pub fn key_url(&self, key: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                CacheError::InvalidUrl(format!("{} cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty().extend(API_PREFIX).push(key);
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<RawResponse> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse::new(status, body))
    }

    // == Single-key operations ==
    /// GET /api/v1/cache/{key}
    pub async fn fetch(&self, key: &str) -> Result<RawResponse> {
        let url = self.key_url(key)?;
        debug!(url = %url, "Fetching cache entry");
        self.send(self.client.get(url)).await
    }

    /// PUT /api/v1/cache/{key} with `{value, ttl}`
    pub async fn store(&self, key: &str, entry: &CacheEntry) -> Result<RawResponse> {
        let url = self.key_url(key)?;
        debug!(url = %url, ttl = entry.ttl, "Storing cache entry");
        self.send(self.client.put(url).json(entry)).await
    }

    /// DELETE /api/v1/cache/{key}
    pub async fn remove(&self, key: &str) -> Result<RawResponse> {
        let url = self.key_url(key)?;
        debug!(url = %url, "Removing cache entry");
        self.send(self.client.delete(url)).await
    }

    /// DELETE /api/v1/cache/clear
    pub async fn clear(&self) -> Result<RawResponse> {
        let url = self.key_url(CLEAR_SEGMENT)?;
        debug!(url = %url, "Clearing remote cache");
        self.send(self.client.delete(url)).await
    }

    // == Batched operations ==
    /// Issues one GET per distinct key concurrently and waits for all of them.
    ///
    /// Results are keyed by the requested key, not by arrival order.
    pub async fn fetch_many(&self, keys: &[String]) -> HashMap<String, Result<RawResponse>> {
        let mut seen = HashSet::new();
        let distinct: Vec<&String> = keys
            .iter()
            .filter(|&key| seen.insert(key.as_str()))
            .collect();

        debug!(requests = distinct.len(), "Dispatching batched fetch");
        let requests = distinct
            .into_iter()
            .map(|key| async move { (key.clone(), self.fetch(key).await) });
        join_all(requests).await.into_iter().collect()
    }

    /// Issues one PUT per entry concurrently and waits for all of them.
    ///
    /// Responses come back paired with their key, in input order.
    pub async fn store_many(
        &self,
        entries: &[(String, CacheEntry)],
    ) -> Vec<(String, Result<RawResponse>)> {
        let requests = entries
            .iter()
            .map(|(key, entry)| async move { (key.clone(), self.store(key, entry).await) });

        debug!(entries = entries.len(), "Dispatching batched store");
        join_all(requests).await
    }
}
