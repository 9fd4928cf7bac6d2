//! # Verification Resolver
//!
//! Turns a public identifier back into what the verification page shows.
//! Absence is an ordinary outcome, never an error: an unknown id, or a
//! string that is not an id at all, resolves to [`Resolution::NotFound`].
//!
//! The stored hash is shown as recorded at intake; content is not re-hashed
//! here.

use realsnap_core::{Record, RecordId};
use realsnap_store::RecordStore;

use crate::qr::QrStore;

/// Everything the verification page displays for a found record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationView {
    /// The stored record.
    pub record: Record,
    /// Site-relative URL serving the original bytes.
    pub content_url: String,
    /// Site-relative URL serving the QR file.
    pub qr_url: String,
}

impl VerificationView {
    fn for_record(record: Record) -> Self {
        Self {
            content_url: content_url(&record),
            qr_url: qr_url(&record.id),
            record,
        }
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A record exists for the identifier.
    Found(VerificationView),
    /// No record exists for the identifier.
    NotFound,
}

/// Resolve a raw identifier string from a URL path.
pub fn resolve(records: &RecordStore, raw_id: &str) -> Resolution {
    match raw_id.parse::<RecordId>() {
        Ok(id) => resolve_id(records, &id),
        Err(_) => Resolution::NotFound,
    }
}

/// Resolve a parsed identifier.
pub fn resolve_id(records: &RecordStore, id: &RecordId) -> Resolution {
    match records.get(id) {
        Some(record) => Resolution::Found(VerificationView::for_record(record)),
        None => Resolution::NotFound,
    }
}

/// Site-relative URL of a record's original content.
pub fn content_url(record: &Record) -> String {
    format!("/uploads/{}", record.content_ref)
}

/// Site-relative URL of a record's QR file.
pub fn qr_url(id: &RecordId) -> String {
    format!("/public/{}", QrStore::file_name(id))
}
