//! # Verification Record
//!
//! The single persisted entity: one verified upload. A record is created
//! in full during intake and never modified afterwards.

use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;
use crate::identity::{ContentRef, RecordId};
use crate::temporal::Timestamp;

/// One verified upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Public verification identifier.
    pub id: RecordId,
    /// Where the content store keeps the bytes. Non-owning.
    pub content_ref: ContentRef,
    /// Shareable address of the verification page, `{base}/v/{id}`.
    pub verify_ref: String,
    /// SHA-256 of the bytes at `content_ref`, computed at intake.
    pub integrity_hash: ContentDigest,
    /// Length of the stored content in bytes.
    pub size_bytes: u64,
    /// Content type declared by the uploader, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Intake time.
    pub created_at: Timestamp,
}

/// Derive the verification reference for `id` under `base_address`.
///
/// `base_address` is scheme + host (and optional port or path prefix);
/// trailing slashes are ignored so `https://x/` and `https://x` agree.
pub fn verify_ref(base_address: &str, id: &RecordId) -> String {
    format!("{}/v/{id}", base_address.trim_end_matches('/'))
}
