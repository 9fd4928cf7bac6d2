//! # Integrity Digest
//!
//! SHA-256 fingerprints of uploaded content. The digest is a pure function
//! of the input bytes: no file name, timestamp, or caller identity enters
//! the hash.
//!
//! On the wire and on disk a [`ContentDigest`] is the lowercase hex form
//! of the 32 digest bytes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// A 256-bit SHA-256 digest of some content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Parse a 64-character hex string. Upper-case input is accepted;
    /// signs, whitespace and any other non-hex character are not.
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        if s.len() != 64 {
            return Err(ValidationError::InvalidDigest(format!(
                "expected 64 hex chars, got {}",
                s.len()
            )));
        }
        if let Some(pos) = s.bytes().position(|b| !b.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidDigest(format!(
                "non-hex character at position {pos}"
            )));
        }
        let mut bytes = [0u8; 32];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            *byte = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
        }
        Ok(Self(bytes))
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Value of one ASCII hex digit. Callers check `is_ascii_hexdigit` first.
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

/// Compute the SHA-256 digest of raw content bytes.
pub fn sha256_digest(data: &[u8]) -> ContentDigest {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest(bytes)
}

/// Compute the SHA-256 digest of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    sha256_digest(data).to_hex()
}
