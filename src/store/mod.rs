//! Store Module
//!
//! The cache contract hosts program against, and its remote implementation.

mod remote;

use async_trait::async_trait;

use crate::cache::BatchKey;
use crate::error::Result;

pub use remote::RemoteCacheStore;

/// Step used by `increment`/`decrement` when the caller has no delta of its own.
pub const DEFAULT_STEP: i64 = 1;

/// Generic key/value cache contract.
///
/// Read paths return `None` for missing, expired and unreachable keys alike.
/// Write paths return `false` on any failure.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    /// One value per key, in the order the keys were given.
    async fn many(&self, keys: &[String]) -> Vec<Option<String>>;

    /// Stores `value` for `ttl_seconds`; `0` means forever.
    async fn put(&self, key: &str, value: &str, ttl_seconds: i64) -> bool;

    /// Stores every pair with the same lifetime.
    ///
    /// Fails with `InvalidBatchKeys` before any write if a key is positional
    /// or empty. `Ok(false)` when at least one write failed; writes that did
    /// succeed are left in place.
    async fn put_many(&self, values: Vec<(BatchKey, String)>, ttl_seconds: i64) -> Result<bool>;

    /// Adds `delta` to the stored integer and returns the new value.
    ///
    /// Read-modify-write over two requests, not atomic: concurrent callers on
    /// the same key can lose updates.
    ///
    /// Errors only when the read fails. If the write-back fails the computed
    /// value is still returned although the remote never stored it.
    async fn increment(&self, key: &str, delta: i64) -> Result<i64>;

    async fn decrement(&self, key: &str, value: i64) -> Result<i64> {
        self.increment(key, 0i64.saturating_sub(value)).await
    }

    async fn forever(&self, key: &str, value: &str) -> bool {
        self.put(key, value, 0).await
    }

    async fn forget(&self, key: &str) -> bool;

    async fn flush(&self) -> bool;

    fn prefix(&self) -> &str {
        ""
    }

    // == Conveniences ==
    async fn has(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    /// Returns the value and removes it.
    async fn pull(&self, key: &str) -> Option<String> {
        let value = self.get(key).await;
        if value.is_some() {
            self.forget(key).await;
        }
        value
    }

    /// Returns the cached value, or stores and returns what `producer` makes.
    async fn remember<F>(&self, key: &str, ttl_seconds: i64, producer: F) -> String
    where
        Self: Sized,
        F: FnOnce() -> String + Send,
    {
        if let Some(value) = self.get(key).await {
            return value;
        }
        let value = producer();
        self.put(key, &value, ttl_seconds).await;
        value
    }
}
