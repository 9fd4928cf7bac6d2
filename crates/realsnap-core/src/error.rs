//! # Error Types
//!
//! Validation failures for the string forms of core value types. All
//! errors use `thiserror` for derive-based `Display` and `Error`.

use thiserror::Error;

/// A string could not be parsed into a core value type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Not a canonical UUID.
    #[error("invalid record id {0:?}: expected a UUID")]
    InvalidRecordId(String),

    /// Content reference is empty, too long, or contains path characters.
    #[error("invalid content reference {value:?}: {reason}")]
    InvalidContentRef {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Digest is not 64 hex characters.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// Timestamp is not RFC 3339 with a `Z` suffix.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
