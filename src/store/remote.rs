//! Remote Cache Store
//!
//! Implements the cache contract on top of the HTTP transport: TTL encoding,
//! expiry on read, batch validation and client-side increment.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::cache::{named_pairs, BatchKey, CacheEntry};
use crate::clock::{Clock, SystemClock};
use crate::config::ClientConfig;
use crate::error::{CacheError, Result};
use crate::store::Store;
use crate::transport::RemoteTransport;

// == Remote Cache Store ==
/// Cache adapter backed by a remote BigCache service.
///
/// Holds no cached data; every call goes to the remote.
#[derive(Clone)]
pub struct RemoteCacheStore {
    transport: RemoteTransport,
    clock: Arc<dyn Clock>,
}

impl RemoteCacheStore {
    pub fn new(transport: RemoteTransport, clock: Arc<dyn Clock>) -> Self {
        Self { transport, clock }
    }

    /// Builds a store against the configured service using the wall clock.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &ClientConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self::new(RemoteTransport::new(config)?, clock))
    }

    pub fn transport(&self) -> &RemoteTransport {
        &self.transport
    }

    fn now(&self) -> i64 {
        self.clock.now_timestamp()
    }

    /// Writes an entry with its TTL exactly as given.
    async fn write_entry(&self, key: &str, entry: &CacheEntry) -> bool {
        match self.transport.store(key, entry).await {
            Ok(response) if response.is_created() => true,
            Ok(response) => {
                warn!(key, status = %response.status, "Remote rejected cache write");
                false
            }
            Err(e) => {
                warn!(key, error = %e, "Cache write failed");
                false
            }
        }
    }
}

#[async_trait]
impl Store for RemoteCacheStore {
    // == Get ==
    /// Expired entries are deleted remotely before reporting a miss.
    async fn get(&self, key: &str) -> Option<String> {
        let entry = match self.transport.fetch(key).await {
            Ok(response) => response.cache_entry(),
            Err(e) => {
                warn!(key, error = %e, "Cache read failed");
                return None;
            }
        };

        if entry.is_empty() {
            return None;
        }

        if entry.is_expired_at(self.now()) {
            debug!(key, ttl = entry.ttl, "Evicting expired entry");
            self.forget(key).await;
            return None;
        }

        Some(entry.value)
    }

    // == Many ==
    /// Reads every key in one batched dispatch.
    ///
    /// Expired keys yield `None` and are evicted before this returns.
    async fn many(&self, keys: &[String]) -> Vec<Option<String>> {
        let responses = self.transport.fetch_many(keys).await;
        let now = self.now();

        let mut values = Vec::with_capacity(keys.len());
        let mut expired: Vec<&str> = Vec::new();

        for key in keys {
            let entry = match responses.get(key) {
                Some(Ok(response)) => response.cache_entry(),
                Some(Err(e)) => {
                    warn!(key = %key, error = %e, "Batched cache read failed");
                    CacheEntry::empty()
                }
                None => CacheEntry::empty(),
            };

            if entry.is_empty() {
                values.push(None);
            } else if entry.is_expired_at(now) {
                if !expired.contains(&key.as_str()) {
                    expired.push(key);
                }
                values.push(None);
            } else {
                values.push(Some(entry.value));
            }
        }

        if !expired.is_empty() {
            debug!(keys = ?expired, "Evicting expired entries");
            join_all(expired.iter().map(|key| self.forget(key))).await;
        }

        values
    }

    // == Put ==
    async fn put(&self, key: &str, value: &str, ttl_seconds: i64) -> bool {
        let entry = CacheEntry::with_lifetime(value, ttl_seconds, self.now());
        self.write_entry(key, &entry).await
    }

    // == Put Many ==
    async fn put_many(&self, values: Vec<(BatchKey, String)>, ttl_seconds: i64) -> Result<bool> {
        if values.is_empty() {
            return Ok(true);
        }

        let pairs = named_pairs(values)?;
        let now = self.now();
        let entries: Vec<(String, CacheEntry)> = pairs
            .into_iter()
            .map(|(key, value)| (key, CacheEntry::with_lifetime(value, ttl_seconds, now)))
            .collect();

        let responses = self.transport.store_many(&entries).await;
        let failed: Vec<&str> = responses
            .iter()
            .filter(|(_, response)| !matches!(response, Ok(r) if r.is_created()))
            .map(|(key, _)| key.as_str())
            .collect();

        if !failed.is_empty() {
            // Writes that succeeded stay applied
            warn!(
                failed = ?failed,
                total = entries.len(),
                "Batch cache write partially failed"
            );
            return Ok(false);
        }

        Ok(true)
    }

    // == Increment ==
    /// Missing keys start at `delta` as forever entries. Existing keys keep
    /// their absolute expiry, even one already in the past.
    ///
    /// A read answered with a non-success status is an error and nothing is
    /// written.
    async fn increment(&self, key: &str, delta: i64) -> Result<i64> {
        let response = self.transport.fetch(key).await?;
        if !response.status.is_success() {
            warn!(key, status = %response.status, "Counter read rejected by remote");
            return Err(CacheError::RemoteStatus(response.status));
        }
        let entry = response.cache_entry();

        if entry.is_empty() {
            let fresh = CacheEntry::new(delta.to_string(), CacheEntry::FOREVER);
            self.write_entry(key, &fresh).await;
            return Ok(delta);
        }

        let incremented = entry.as_integer().saturating_add(delta);
        let updated = CacheEntry::new(incremented.to_string(), entry.ttl);
        self.write_entry(key, &updated).await;
        Ok(incremented)
    }

    // == Forget ==
    async fn forget(&self, key: &str) -> bool {
        match self.transport.remove(key).await {
            Ok(response) => response.is_ok(),
            Err(e) => {
                warn!(key, error = %e, "Cache delete failed");
                false
            }
        }
    }

    // == Flush ==
    async fn flush(&self) -> bool {
        match self.transport.clear().await {
            Ok(response) => response.is_ok(),
            Err(e) => {
                warn!(error = %e, "Cache flush failed");
                false
            }
        }
    }
}
