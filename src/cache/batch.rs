//! Batch Key Module
//!
//! Keys accepted by batch writes. Hosts that build batches from loosely
//! typed maps may carry positional indices; those are rejected.

use std::collections::HashSet;
use std::fmt;

use crate::error::{CacheError, Result};

/// A key in a batch write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BatchKey {
    /// A string identifier
    Named(String),
    /// A positional index, never a valid cache key
    Index(usize),
}

impl From<&str> for BatchKey {
    fn from(key: &str) -> Self {
        BatchKey::Named(key.to_string())
    }
}

impl From<String> for BatchKey {
    fn from(key: String) -> Self {
        BatchKey::Named(key)
    }
}

impl From<usize> for BatchKey {
    fn from(index: usize) -> Self {
        BatchKey::Index(index)
    }
}

impl fmt::Display for BatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchKey::Named(key) => write!(f, "\"{}\"", key),
            BatchKey::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Checks that every key is a distinct, non-empty string identifier.
///
/// Returns the named pairs in input order, or `InvalidBatchKeys` listing
/// every offending key. Repeated names are rejected since their concurrent
/// writes would race on the same URL.
pub fn named_pairs<V>(values: Vec<(BatchKey, V)>) -> Result<Vec<(String, V)>> {
    let invalid: Vec<String> = values
        .iter()
        .filter(|(key, _)| !matches!(key, BatchKey::Named(name) if !name.is_empty()))
        .map(|(key, _)| key.to_string())
        .collect();

    if !invalid.is_empty() {
        return Err(CacheError::InvalidBatchKeys(format!(
            "batch must contain only non-empty string keys, got {}",
            invalid.join(", ")
        )));
    }

    let mut seen = HashSet::new();
    let mut repeated: Vec<String> = Vec::new();
    for (key, _) in &values {
        if !seen.insert(key) && !repeated.contains(&key.to_string()) {
            repeated.push(key.to_string());
        }
    }

    if !repeated.is_empty() {
        return Err(CacheError::InvalidBatchKeys(format!(
            "batch keys must be unique, repeated {}",
            repeated.join(", ")
        )));
    }

    Ok(values
        .into_iter()
        .filter_map(|(key, value)| match key {
            BatchKey::Named(name) => Some((name, value)),
            BatchKey::Index(_) => None,
        })
        .collect())
}
