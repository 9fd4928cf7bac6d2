//! # Intake Routes
//!
//! Routes:
//! - GET    / — Upload form
//! - POST   /api/upload — Multipart intake, returns the result page

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::extractors::extract_upload;
use crate::pages;
use crate::state::AppState;

/// Build the intake router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/upload", post(upload))
}

/// GET / — Upload form.
async fn index() -> Html<String> {
    Html(pages::index())
}

/// POST /api/upload — Store, hash, record, and answer with the verification link.
async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, AppError> {
    let upload = extract_upload(multipart).await?;
    let base = state.base_address(&headers);
    let issuer = state.issuer();

    let proof = tokio::task::spawn_blocking(move || issuer.issue(&upload, &base))
        .await
        .map_err(|e| AppError::Internal(format!("intake task failed: {e}")))??;

    Ok(Html(pages::issued(&proof)))
}
