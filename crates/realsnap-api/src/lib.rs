//! # realsnap-api — HTTP Service for RealSnap
//!
//! Accepts an image upload, stores the original, records its SHA-256
//! digest under a fresh public identifier, and answers with a
//! verification link and QR code. Anyone holding the link can later see
//! the stored original next to the recorded digest.
//!
//! ## Surface
//!
//! | Route                     | Module                 | Response            |
//! |---------------------------|------------------------|---------------------|
//! | `GET /`                   | [`routes::upload`]     | Upload form         |
//! | `POST /api/upload`        | [`routes::upload`]     | Result page         |
//! | `GET /v/{id}`             | [`routes::verify`]     | Verification page   |
//! | `GET /api/records/{id}`   | [`routes::records`]    | Record JSON         |
//! | `GET /uploads/{ref}`      | [`routes::files`]      | Original bytes      |
//! | `GET /public/{id}.svg`    | [`routes::files`]      | QR code             |
//! | `GET /openapi.json`       | [`openapi`]            | OpenAPI document    |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → BodyLimit → Handler
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod issuer;
pub mod middleware;
pub mod openapi;
pub mod pages;
pub mod qr;
pub mod resolver;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    let body_limit = state.config.max_upload_bytes;

    let site = Router::new()
        .merge(routes::upload::router())
        .merge(routes::verify::router())
        .merge(routes::records::router())
        .merge(routes::files::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics));

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(site).with_state(state)
}

/// Liveness probe: 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the record table is loaded, which `AppState`
/// construction guarantees.
async fn readiness(State(state): State<AppState>) -> &'static str {
    tracing::debug!(
        records = state.records.len(),
        requests = state.metrics.requests(),
        client_errors = state.metrics.client_errors(),
        server_errors = state.metrics.server_errors(),
        "readiness probe"
    );
    "ready"
}
