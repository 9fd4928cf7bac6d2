//! # Verification Page
//!
//! Routes:
//! - GET    /v/{id} — Verification page, or an explicit 404 page

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::pages;
use crate::resolver::{self, Resolution};
use crate::state::AppState;

/// Build the verification router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v/{id}", get(verify))
}

/// GET /v/{id} — Show the stored proof next to the original.
async fn verify(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match resolver::resolve(&state.records, &id) {
        Resolution::Found(view) => Html(pages::verification(&view)).into_response(),
        Resolution::NotFound => {
            tracing::debug!(id = %id, "verification lookup missed");
            (StatusCode::NOT_FOUND, Html(pages::not_found(&id))).into_response()
        }
    }
}
