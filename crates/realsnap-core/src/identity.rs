//! # Identity Newtypes
//!
//! [`RecordId`] is the public verification key printed into QR codes.
//! [`ContentRef`] names the stored bytes inside the content store. The two
//! are minted independently so a public identifier says nothing about
//! where or how content is laid out on disk.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum length of a content reference.
const MAX_CONTENT_REF_LEN: usize = 64;

/// Public identifier of a verification record (random UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Mint a new random record identifier.
    ///
    /// Draws 122 random bits from the OS; no shared counter is involved,
    /// so concurrent intakes never need to coordinate.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RecordId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ValidationError::InvalidRecordId(s.to_string()))
    }
}

/// Location of stored content, relative to the content store root.
///
/// A single path component: ASCII alphanumerics, `-`, `_` and `.`, not
/// starting with a dot, at most 64 characters. Anything that could
/// traverse out of the store directory is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Validate and wrap a content reference.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let reject = |reason| ValidationError::InvalidContentRef {
            value: value.clone(),
            reason,
        };
        if value.is_empty() {
            return Err(reject("must not be empty"));
        }
        if value.len() > MAX_CONTENT_REF_LEN {
            return Err(reject("longer than 64 characters"));
        }
        if value.starts_with('.') {
            return Err(reject("must not start with '.'"));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(reject("contains characters outside [A-Za-z0-9._-]"));
        }
        Ok(Self(value))
    }

    /// The reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The extension part (including the dot), if any.
    pub fn extension(&self) -> Option<&str> {
        self.0.rfind('.').map(|i| &self.0[i..])
    }
}

impl std::fmt::Display for ContentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for ContentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_unique() {
        let a = RecordId::new();
        let b = RecordId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn record_id_display_parses_back() {
        let id = RecordId::new();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn record_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<RecordId>().is_err());
        assert!("".parse::<RecordId>().is_err());
        assert!("../../etc/passwd".parse::<RecordId>().is_err());
    }

    #[test]
    fn record_id_serializes_as_plain_string() {
        let id = RecordId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn content_ref_accepts_uuid_with_extension() {
        let r = ContentRef::new("3f2b6c1e-8a7d-4f0e-9c2b-1d5e6f7a8b9c.png").unwrap();
        assert_eq!(r.extension(), Some(".png"));
    }

    #[test]
    fn content_ref_rejects_traversal() {
        assert!(ContentRef::new("../secret").is_err());
        assert!(ContentRef::new("a/b.png").is_err());
        assert!(ContentRef::new("a\\b.png").is_err());
        assert!(ContentRef::new(".hidden").is_err());
        assert!(ContentRef::new("").is_err());
        assert!(ContentRef::new("x".repeat(65)).is_err());
    }

    #[test]
    fn content_ref_deserialize_validates() {
        let ok: Result<ContentRef, _> = serde_json::from_str("\"abc.jpg\"");
        assert!(ok.is_ok());
        let bad: Result<ContentRef, _> = serde_json::from_str("\"../abc.jpg\"");
        assert!(bad.is_err());
    }
}
