//! # Service Configuration
//!
//! Command-line flags with environment fallbacks. The service has no
//! subcommands; every flag only shapes process start.

use std::path::PathBuf;

use clap::Parser;

/// Default upload limit: 20 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// RealSnap — image integrity fingerprints with QR verification links.
#[derive(Debug, Clone, Parser)]
#[command(name = "realsnap", version, about)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory holding `uploads/`, `public/` and `records.json`.
    #[arg(long, env = "REALSNAP_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Externally visible base address (scheme + host) used in
    /// verification links. Derived from the `Host` header when unset.
    #[arg(long, env = "REALSNAP_PUBLIC_URL", value_parser = parse_public_url)]
    pub public_url: Option<String>,

    /// Largest accepted request body for uploads, in bytes.
    #[arg(long, env = "REALSNAP_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, env = "REALSNAP_LOG_JSON")]
    pub log_json: bool,
}

impl AppConfig {
    /// Directory for uploaded content.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    /// Directory for rendered QR files.
    pub fn public_dir(&self) -> PathBuf {
        self.data_dir.join("public")
    }

    /// Path of the persisted record table.
    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join("records.json")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: PathBuf::from("data"),
            public_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_json: false,
        }
    }
}

/// Validate a public base URL: http(s), with a host, no query or fragment.
///
/// Returns the URL without a trailing slash.
pub fn parse_public_url(raw: &str) -> Result<String, String> {
    let url = url::Url::parse(raw.trim()).map_err(|e| format!("invalid URL {raw:?}: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("public URL must be http or https, got {:?}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("public URL must include a host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("public URL must not carry a query or fragment".to_string());
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.records_path(), PathBuf::from("data/records.json"));
        assert_eq!(config.uploads_dir(), PathBuf::from("data/uploads"));
        assert_eq!(config.public_dir(), PathBuf::from("data/public"));
    }

    #[test]
    fn flags_parse() {
        let config = AppConfig::try_parse_from([
            "realsnap",
            "--port",
            "8088",
            "--data-dir",
            "/var/lib/realsnap",
            "--public-url",
            "https://snap.example/",
        ])
        .unwrap();
        assert_eq!(config.port, 8088);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/realsnap"));
        assert_eq!(config.public_url.as_deref(), Some("https://snap.example"));
    }

    #[test]
    fn public_url_validation() {
        assert_eq!(
            parse_public_url("http://localhost:3000").unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            parse_public_url("https://x.example/snap/").unwrap(),
            "https://x.example/snap"
        );
        assert!(parse_public_url("ftp://x.example").is_err());
        assert!(parse_public_url("not a url").is_err());
        assert!(parse_public_url("https://x.example/?a=1").is_err());
    }
}
