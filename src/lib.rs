//! BigCache Client - cache adapter over a remote key/value HTTP service
//!
//! Provides get/put/batch/increment semantics with absolute TTLs and
//! expiry on read, delegating all storage to the remote service.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod store;
pub mod transport;

pub use cache::{BatchKey, CacheEntry};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ClientConfig;
pub use error::{CacheError, Result};
pub use store::{RemoteCacheStore, Store, DEFAULT_STEP};
