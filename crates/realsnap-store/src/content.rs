//! # Content Store
//!
//! Stores uploaded bytes on the filesystem, one file per upload, at
//! `{base_dir}/{content_ref}`. References are minted here as
//! `{uuid}{ext}` with a UUID unrelated to any record id.
//!
//! ## Write Visibility
//!
//! Bytes are written to a dot-prefixed temp file and renamed into place,
//! so a reference never resolves to a partially written file. Temp names
//! start with `.`, which [`ContentRef`] rejects, so they can never be
//! addressed from outside.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use realsnap_core::ContentRef;
use uuid::Uuid;

use crate::error::StoreError;

/// Extension used when the upload has no usable one.
const FALLBACK_EXTENSION: &str = ".bin";

/// Longest extension kept from an uploaded file name, excluding the dot.
const MAX_EXTENSION_LEN: usize = 10;

/// Blob medium for uploaded content.
///
/// Implementations are synchronous; async callers run them on a blocking
/// thread.
pub trait ContentStore: Send + Sync {
    /// Persist `bytes` and return a fresh reference to them.
    ///
    /// `extension` includes the leading dot (e.g. `.png`).
    fn store(&self, bytes: &[u8], extension: &str) -> Result<ContentRef, StoreError>;

    /// Read back stored bytes. `Ok(None)` when nothing is stored there.
    fn retrieve(&self, content_ref: &ContentRef) -> Result<Option<Vec<u8>>, StoreError>;

    /// Remove stored bytes. Removing a missing reference is not an error.
    fn remove(&self, content_ref: &ContentRef) -> Result<(), StoreError>;
}

/// Filesystem-backed [`ContentStore`].
#[derive(Debug, Clone)]
pub struct FsContentStore {
    base_dir: PathBuf,
}

impl FsContentStore {
    /// Create a content store rooted at `base_dir`.
    ///
    /// The directory is created on the first [`store()`](ContentStore::store).
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Filesystem path of a reference.
    pub fn path_of(&self, content_ref: &ContentRef) -> PathBuf {
        self.base_dir.join(content_ref.as_str())
    }
}

impl ContentStore for FsContentStore {
    fn store(&self, bytes: &[u8], extension: &str) -> Result<ContentRef, StoreError> {
        let content_ref = ContentRef::new(format!("{}{extension}", Uuid::new_v4()))?;
        fs::create_dir_all(&self.base_dir)?;

        let final_path = self.path_of(&content_ref);
        let tmp_path = self.base_dir.join(format!(".{content_ref}.tmp"));

        let written = (|| -> std::io::Result<()> {
            let mut f = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&tmp_path)?;
            f.write_all(bytes)?;
            f.sync_all()?;
            fs::rename(&tmp_path, &final_path)
        })();

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(content_ref = %content_ref, size = bytes.len(), "content stored");
        Ok(content_ref)
    }

    fn retrieve(&self, content_ref: &ContentRef) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_of(content_ref)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, content_ref: &ContentRef) -> Result<(), StoreError> {
        match fs::remove_file(self.path_of(content_ref)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Derive a safe storage extension from an uploaded file name.
///
/// Keeps the last extension, lowercased, when it is 1–10 ASCII
/// alphanumerics; anything else becomes `.bin`.
pub fn normalize_extension(file_name: Option<&str>) -> String {
    let ext = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });
    match ext {
        Some(ext) => format!(".{}", ext.to_ascii_lowercase()),
        None => FALLBACK_EXTENSION.to_string(),
    }
}
