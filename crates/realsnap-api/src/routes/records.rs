//! # Record Lookup API
//!
//! Routes:
//! - GET    /api/records/{id} — Stored record as JSON

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::resolver::{self, Resolution, VerificationView};
use crate::state::AppState;

/// A stored record plus the site-relative links the verification page uses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordResponse {
    /// Public record identifier (UUID v4).
    pub id: String,
    /// Storage reference of the original upload.
    pub content_ref: String,
    /// Absolute verification link encoded in the QR code.
    pub verify_ref: String,
    /// Lowercase hex SHA-256 of the original bytes.
    pub integrity_hash: String,
    /// Size of the original in bytes.
    pub size_bytes: u64,
    /// Media type declared by the uploader, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Intake time, ISO 8601 UTC.
    pub created_at: String,
    /// Site-relative URL of the original.
    pub content_url: String,
    /// Site-relative URL of the QR file.
    pub qr_url: String,
}

impl From<VerificationView> for RecordResponse {
    fn from(view: VerificationView) -> Self {
        let record = view.record;
        Self {
            id: record.id.to_string(),
            content_ref: record.content_ref.as_str().to_string(),
            verify_ref: record.verify_ref,
            integrity_hash: record.integrity_hash.to_hex(),
            size_bytes: record.size_bytes,
            media_type: record.media_type,
            created_at: record.created_at.to_iso8601(),
            content_url: view.content_url,
            qr_url: view.qr_url,
        }
    }
}

/// Build the record lookup router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/records/{id}", get(get_record))
}

/// GET /api/records/{id} — Look up a record by its public identifier.
#[utoipa::path(
    get,
    path = "/api/records/{id}",
    params(("id" = String, Path, description = "Record UUID")),
    responses(
        (status = 200, description = "Record found", body = RecordResponse),
        (status = 404, description = "No record under this id", body = crate::error::ErrorBody),
    ),
    tag = "records"
)]
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecordResponse>, AppError> {
    match resolver::resolve(&state.records, &id) {
        Resolution::Found(view) => Ok(Json(view.into())),
        Resolution::NotFound => Err(AppError::NotFound(format!("record {id}"))),
    }
}
