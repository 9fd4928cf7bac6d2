//! # QR Rendering
//!
//! Encodes a verification reference as a QR code in SVG form. The same
//! SVG is returned inline (as a `data:` URL) on the intake result page and
//! written to `{public_dir}/{id}.svg` for direct download.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use qrcode::render::svg;
use qrcode::QrCode;
use realsnap_core::RecordId;
use thiserror::Error;
use uuid::Uuid;

/// Rendered QR size in pixels (the original PNG width).
const QR_DIMENSION: u32 = 320;

/// QR encoding failed, typically because the payload is too long.
#[derive(Error, Debug)]
#[error("QR encoding failed: {0}")]
pub struct QrError(String);

/// An SVG rendering of a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQr {
    svg: String,
}

impl RenderedQr {
    /// The SVG document.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Inline `data:image/svg+xml;base64,...` form for `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(self.svg.as_bytes()))
    }
}

/// Encode `text` as a QR code.
pub fn render(text: &str) -> Result<RenderedQr, QrError> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| QrError(e.to_string()))?;
    let svg = code
        .render::<svg::Color<'_>>()
        .min_dimensions(QR_DIMENSION, QR_DIMENSION)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();
    Ok(RenderedQr { svg })
}

/// Directory of rendered QR files, one `{id}.svg` per record.
#[derive(Debug, Clone)]
pub struct QrStore {
    dir: PathBuf,
}

impl QrStore {
    /// QR files live directly under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Public file name for a record's QR code.
    pub fn file_name(id: &RecordId) -> String {
        format!("{id}.svg")
    }

    /// Filesystem path for a record's QR code.
    pub fn path_of(&self, id: &RecordId) -> PathBuf {
        self.dir.join(Self::file_name(id))
    }

    /// Base directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the SVG for `id`, replacing any previous file.
    ///
    /// The SVG goes to a dot-prefixed temp file that is renamed into place,
    /// so readers see either the old file, no file, or the whole new one.
    pub fn write(&self, id: &RecordId, qr: &RenderedQr) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_of(id);
        let tmp_path = self.dir.join(format!(".{id}.{}.tmp", Uuid::new_v4()));

        let written = (|| -> std::io::Result<()> {
            let mut f = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&tmp_path)?;
            f.write_all(qr.svg.as_bytes())?;
            f.sync_all()?;
            fs::rename(&tmp_path, &path)
        })();

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        Ok(path)
    }

    /// Read the SVG for `id`, if one was written.
    pub fn read(&self, id: &RecordId) -> std::io::Result<Option<String>> {
        match fs::read_to_string(self.path_of(id)) {
            Ok(svg) => Ok(Some(svg)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
