//! # OpenAPI Specification Assembly
//!
//! Documents the JSON surface and serves it at `/openapi.json`. The HTML
//! pages and file routes are not part of the document.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// OpenAPI document for the JSON endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "RealSnap API",
        version = "0.1.0",
        description = "Record lookup for RealSnap image integrity proofs.",
        license(name = "MIT")
    ),
    paths(crate::routes::records::get_record),
    components(schemas(
        crate::routes::records::RecordResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "records", description = "Stored integrity records"),
    )
)]
pub struct ApiDoc;

/// Router serving the document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
