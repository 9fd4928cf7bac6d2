//! # Store Errors

use std::path::PathBuf;

use realsnap_core::{RecordId, ValidationError};
use thiserror::Error;

/// Failure in the content store or the record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The storage medium rejected a read or write.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The record table could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persisted record table could not be loaded.
    #[error("record table at {path} is corrupt: {reason}")]
    Corrupt {
        /// Table file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A different record is already stored under this id.
    #[error("record {0} already exists with different contents")]
    DuplicateId(RecordId),

    /// A content reference failed validation.
    #[error("invalid content reference: {0}")]
    InvalidReference(#[from] ValidationError),
}
