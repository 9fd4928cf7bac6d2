//! # Request Extraction Helpers
//!
//! Pulls the uploaded file out of a multipart body and works out the
//! externally visible base address for verification links.

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::http::{header, HeaderMap, StatusCode};

use crate::error::AppError;
use crate::issuer::Upload;

/// Multipart field carrying the file.
pub const UPLOAD_FIELD: &str = "file";

fn map_multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Read the `file` field from a multipart body.
///
/// Other fields are skipped. A body without a `file` field, or with an
/// empty one, yields an [`Upload`] with no bytes; the issuer rejects it.
pub async fn extract_upload(
    result: Result<Multipart, MultipartRejection>,
) -> Result<Upload, AppError> {
    let mut multipart = result.map_err(|err| AppError::BadRequest(err.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let media_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(map_multipart_error)?;
        return Ok(Upload {
            bytes,
            file_name,
            media_type,
        });
    }

    Ok(Upload::default())
}

/// Base address for verification links.
///
/// A configured public URL wins. Otherwise the request's `Host` header is
/// used as `http://{host}`, and `http://localhost:{port}` when the header
/// is absent or not a plain host.
pub fn base_address(public_url: Option<&str>, port: u16, headers: &HeaderMap) -> String {
    if let Some(url) = public_url {
        return url.trim_end_matches('/').to_string();
    }
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|host| is_plain_host(host))
        .map(|host| format!("http://{host}"))
        .unwrap_or_else(|| format!("http://localhost:{port}"))
}

/// `host[:port]`, including bracketed IPv6 literals.
fn is_plain_host(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 255
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
}
