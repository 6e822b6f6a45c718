//! Cache Entry Module
//!
//! Defines the value/TTL pair exchanged with the remote service.

use serde::Serialize;
use serde_json::Value;

// == Cache Entry ==
/// A single cache entry as stored by the remote service.
///
/// `ttl` is an absolute Unix timestamp in seconds. `0` is the forever
/// sentinel, not an instant in 1970.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    /// The stored value, opaque to the client
    pub value: String,
    /// Absolute expiration timestamp (Unix seconds), 0 = never expires
    pub ttl: i64,
}

impl CacheEntry {
    /// TTL sentinel for entries that never expire.
    pub const FOREVER: i64 = 0;

    // == Constructors ==
    pub fn new(value: impl Into<String>, ttl: i64) -> Self {
        Self {
            value: value.into(),
            ttl,
        }
    }

    /// The entry a missing key decodes to: empty value, forever sentinel.
    pub fn empty() -> Self {
        Self::new(String::new(), Self::FOREVER)
    }

    /// Creates an entry living `ttl_seconds` from `now`.
    ///
    /// A duration of `0` stores the forever sentinel. Negative durations
    /// produce an instant that is already in the past.
    pub fn with_lifetime(value: impl Into<String>, ttl_seconds: i64, now: i64) -> Self {
        let ttl = match ttl_seconds {
            0 => Self::FOREVER,
            seconds => {
                let expires = now.saturating_add(seconds);
                // 0 is reserved for forever
                if expires == Self::FOREVER {
                    -1
                } else {
                    expires
                }
            }
        };
        Self::new(value, ttl)
    }

    // == Predicates ==
    /// True when the remote returned no payload for the key.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_forever(&self) -> bool {
        self.ttl == Self::FOREVER
    }

    /// Checks if the entry's expiry lies strictly before `now`.
    ///
    /// Forever entries never expire.
    pub fn is_expired_at(&self, now: i64) -> bool {
        !self.is_forever() && self.ttl < now
    }

    // == Decoding ==
    /// Decodes a response body into an entry.
    ///
    /// Accepts `{"value": .., "ttl": ..}` or the positional `[value, ttl]`.
    /// Anything else, including an empty body, yields [`CacheEntry::empty`].
    pub fn from_body(body: &str) -> Self {
        let (value, ttl) = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => (map.get("value").cloned(), map.get("ttl").cloned()),
            Ok(Value::Array(items)) => (items.first().cloned(), items.get(1).cloned()),
            _ => return Self::empty(),
        };

        Self::new(
            value.map(value_to_string).unwrap_or_default(),
            ttl.map(value_to_timestamp).unwrap_or(Self::FOREVER),
        )
    }

    /// Best-effort integer reading of the value.
    ///
    /// Parses an optional sign followed by the leading digits, ignoring
    /// surrounding whitespace and any trailing garbage. Non-numeric values
    /// read as `0`; out of range values saturate.
    pub fn as_integer(&self) -> i64 {
        let trimmed = self.value.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let mut acc: i64 = 0;
        for digit in digits.bytes().take_while(u8::is_ascii_digit) {
            let d = i64::from(digit - b'0');
            acc = if negative {
                acc.saturating_mul(10).saturating_sub(d)
            } else {
                acc.saturating_mul(10).saturating_add(d)
            };
        }
        acc
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn value_to_timestamp(value: Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(CacheEntry::FOREVER),
        Value::String(s) => s.trim().parse().unwrap_or(CacheEntry::FOREVER),
        _ => CacheEntry::FOREVER,
    }
}
