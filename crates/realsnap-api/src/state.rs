//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The only cross-request mutable state is owned by the stores: the record
//! table ([`RecordStore`], single writer) and the content directory
//! ([`ContentStore`]). Everything else is read-only configuration.

use std::sync::Arc;

use axum::http::HeaderMap;
use realsnap_store::{ContentStore, FsContentStore, RecordStore, StoreError};

use crate::config::AppConfig;
use crate::extractors;
use crate::issuer::ProofIssuer;
use crate::middleware::metrics::ApiMetrics;
use crate::qr::QrStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub records: RecordStore,
    pub content: Arc<dyn ContentStore>,
    pub qr: QrStore,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Open the on-disk stores under `config.data_dir`.
    pub fn open(config: AppConfig) -> Result<Self, StoreError> {
        let records = RecordStore::open(config.records_path())?;
        let content = Arc::new(FsContentStore::new(config.uploads_dir()));
        let qr = QrStore::new(config.public_dir());
        Ok(Self::with_stores(config, records, content, qr))
    }

    /// Assemble state from explicit stores.
    pub fn with_stores(
        config: AppConfig,
        records: RecordStore,
        content: Arc<dyn ContentStore>,
        qr: QrStore,
    ) -> Self {
        Self {
            config,
            records,
            content,
            qr,
            metrics: ApiMetrics::new(),
        }
    }

    /// An issuer over this state's stores.
    pub fn issuer(&self) -> ProofIssuer {
        ProofIssuer::new(self.content.clone(), self.records.clone(), self.qr.clone())
    }

    /// Base address for verification links minted for this request.
    pub fn base_address(&self, headers: &HeaderMap) -> String {
        extractors::base_address(self.config.public_url.as_deref(), self.config.port, headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let state = AppState::open(config).unwrap();
        assert!(state.records.is_empty());
        assert_eq!(state.records.path(), Some(dir.path().join("records.json").as_path()));
        assert_eq!(state.qr.dir(), dir.path().join("public").as_path());
    }

    #[test]
    fn configured_public_url_used_for_links() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            public_url: Some("https://snap.example".to_string()),
            ..AppConfig::default()
        };
        let state = AppState::open(config).unwrap();
        assert_eq!(state.base_address(&HeaderMap::new()), "https://snap.example");
    }
}
