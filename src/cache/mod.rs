//! Cache Module
//!
//! Entry model and batch key validation shared by the transport and the
//! store adapter.

mod batch;
mod entry;


// Re-export public types
pub use batch::{named_pairs, BatchKey};
pub use entry::CacheEntry;

// == Public Constants ==
/// Path prefix of the remote key/value API
pub const API_PREFIX: [&str; 3] = ["api", "v1", "cache"];

/// Path segment the remote reserves for clearing the whole cache
pub const CLEAR_SEGMENT: &str = "clear";
