//! # Stored Files
//!
//! Routes:
//! - GET    /uploads/{content_ref} — Original bytes, exactly as uploaded
//! - GET    /public/{id}.svg — QR code for a record
//!
//! Both lookups go through the stores rather than a static directory
//! service, so only references that pass validation ever reach the
//! filesystem.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use realsnap_core::{ContentRef, RecordId};

use crate::error::AppError;
use crate::qr;
use crate::state::AppState;

const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Build the file router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/uploads/{content_ref}", get(original))
        .route("/public/{file}", get(qr_file))
}

/// Content type for a stored original, from its extension.
///
/// Uploaded SVG is served as opaque bytes; only QR files generated here
/// are served as `image/svg+xml`.
pub fn media_type_for(content_ref: &ContentRef) -> &'static str {
    match content_ref.extension().map(str::to_ascii_lowercase).as_deref() {
        Some(".png") => "image/png",
        Some(".jpg") | Some(".jpeg") => "image/jpeg",
        Some(".gif") => "image/gif",
        Some(".webp") => "image/webp",
        Some(".bmp") => "image/bmp",
        Some(".tif") | Some(".tiff") => "image/tiff",
        Some(".heic") => "image/heic",
        Some(".avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// GET /uploads/{content_ref} — Serve the original.
async fn original(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response, AppError> {
    let content_ref: ContentRef = raw
        .parse()
        .map_err(|_| AppError::NotFound(format!("content {raw}")))?;

    let store = state.content.clone();
    let lookup = content_ref.clone();
    let bytes = tokio::task::spawn_blocking(move || store.retrieve(&lookup))
        .await
        .map_err(|e| AppError::Internal(format!("content read task failed: {e}")))?
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("content {content_ref}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, media_type_for(&content_ref)),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        bytes,
    )
        .into_response())
}

/// GET /public/{id}.svg — Serve a record's QR code.
///
/// A missing file is regenerated from the record's verification link and
/// written back best-effort.
async fn qr_file(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound(format!("file {file}"));
    let id: RecordId = file
        .strip_suffix(".svg")
        .and_then(|stem| stem.parse().ok())
        .ok_or_else(not_found)?;
    let record = state.records.get(&id).ok_or_else(not_found)?;

    let qr_store = state.qr.clone();
    let svg = tokio::task::spawn_blocking(move || -> Result<String, AppError> {
        match qr_store.read(&id) {
            Ok(Some(svg)) => return Ok(svg),
            Ok(None) => {}
            Err(e) => tracing::warn!(record_id = %id, error = %e, "QR file unreadable, regenerating"),
        }
        let rendered = qr::render(&record.verify_ref).map_err(|e| AppError::Internal(e.to_string()))?;
        if let Err(e) = qr_store.write(&id, &rendered) {
            tracing::warn!(record_id = %id, error = %e, "failed to write regenerated QR file");
        }
        Ok(rendered.svg().to_string())
    })
    .await
    .map_err(|e| AppError::Internal(format!("QR task failed: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, SVG_MEDIA_TYPE),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        svg,
    )
        .into_response())
}
