//! # Proof Issuer
//!
//! Intake orchestration: store the uploaded bytes, mint an identifier,
//! hash the exact stored bytes, derive the verification reference,
//! persist the record, and render the QR side output.
//!
//! ## All-or-Nothing
//!
//! A caller either gets an [`IssuedProof`] whose record is durable and
//! whose hash matches the stored content, or an [`IntakeError`] with no
//! record left behind. When a later step fails, content stored by an
//! earlier step is removed again. Writing the downloadable QR file is the
//! one step allowed to fail softly: the record is already valid by then
//! and the file is regenerated on demand.

use std::sync::Arc;

use axum::body::Bytes;
use realsnap_core::{sha256_digest, verify_ref, ContentRef, Record, RecordId, Timestamp};
use realsnap_store::{normalize_extension, ContentStore, RecordStore, StoreError};
use thiserror::Error;

use crate::qr::{self, QrError, QrStore, RenderedQr};

/// Failure of an intake.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// The upload carried no bytes.
    #[error("no content provided")]
    NoContentProvided,

    /// The content medium could not take the bytes.
    #[error("content storage failed: {0}")]
    Storage(#[source] StoreError),

    /// The verification reference could not be encoded.
    #[error(transparent)]
    Encoding(#[from] QrError),

    /// The record could not be persisted.
    #[error("record persistence failed: {0}")]
    Persist(#[source] StoreError),
}

/// One uploaded file as received from the client.
#[derive(Debug, Clone, Default)]
pub struct Upload {
    /// Raw content.
    pub bytes: Bytes,
    /// Client-side file name, used only to pick a storage extension.
    pub file_name: Option<String>,
    /// Declared content type.
    pub media_type: Option<String>,
}

/// Result of a successful intake.
#[derive(Debug, Clone)]
pub struct IssuedProof {
    /// The durable record.
    pub record: Record,
    /// QR encoding of `record.verify_ref`.
    pub qr: RenderedQr,
}

/// Runs intakes against a content store, a record store and a QR store.
#[derive(Clone)]
pub struct ProofIssuer {
    content: Arc<dyn ContentStore>,
    records: RecordStore,
    qr: QrStore,
}

impl ProofIssuer {
    /// Build an issuer over the given stores.
    pub fn new(content: Arc<dyn ContentStore>, records: RecordStore, qr: QrStore) -> Self {
        Self {
            content,
            records,
            qr,
        }
    }

    /// Issue a proof for `upload`, with links rooted at `base_address`.
    pub fn issue(&self, upload: &Upload, base_address: &str) -> Result<IssuedProof, IntakeError> {
        if upload.bytes.is_empty() {
            return Err(IntakeError::NoContentProvided);
        }

        let extension = normalize_extension(upload.file_name.as_deref());
        let content_ref = self
            .content
            .store(&upload.bytes, &extension)
            .map_err(IntakeError::Storage)?;

        let id = RecordId::new();
        let integrity_hash = sha256_digest(&upload.bytes);
        let verify_ref = verify_ref(base_address, &id);

        let qr = match qr::render(&verify_ref) {
            Ok(qr) => qr,
            Err(e) => {
                self.discard(&content_ref);
                return Err(e.into());
            }
        };

        let record = Record {
            id,
            content_ref: content_ref.clone(),
            verify_ref,
            integrity_hash,
            size_bytes: upload.bytes.len() as u64,
            media_type: upload.media_type.clone(),
            created_at: Timestamp::now(),
        };

        if let Err(e) = self.records.put(record.clone()) {
            self.discard(&content_ref);
            return Err(IntakeError::Persist(e));
        }

        if let Err(e) = self.qr.write(&id, &qr) {
            tracing::warn!(record_id = %id, error = %e, "QR file not written; will be regenerated on request");
        }

        tracing::info!(
            record_id = %id,
            content_ref = %content_ref,
            integrity_hash = %integrity_hash.to_hex(),
            size = record.size_bytes,
            "proof issued"
        );

        Ok(IssuedProof { record, qr })
    }

    /// Remove content whose record will never exist.
    fn discard(&self, content_ref: &ContentRef) {
        if let Err(e) = self.content.remove(content_ref) {
            tracing::error!(content_ref = %content_ref, error = %e, "failed to remove orphaned content");
        }
    }
}
