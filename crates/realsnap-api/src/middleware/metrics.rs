//! # Request Metrics
//!
//! In-process atomic counters, read by the readiness probe. Client errors
//! and server errors are counted apart: a burst of 404s from stale QR
//! codes is normal, a burst of 500s is not.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Shared counters. Clones share the same atomics.
#[derive(Debug, Clone)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub client_error_count: Arc<AtomicU64>,
    pub server_error_count: Arc<AtomicU64>,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self {
            request_count: Arc::new(AtomicU64::new(0)),
            client_error_count: Arc::new(AtomicU64::new(0)),
            server_error_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Requests seen.
    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Responses with a 4xx status.
    pub fn client_errors(&self) -> u64 {
        self.client_error_count.load(Ordering::Relaxed)
    }

    /// Responses with a 5xx status.
    pub fn server_errors(&self) -> u64 {
        self.server_error_count.load(Ordering::Relaxed)
    }

    fn observe(&self, response: &Response) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let status = response.status();
        if status.is_client_error() {
            self.client_error_count.fetch_add(1, Ordering::Relaxed);
        } else if status.is_server_error() {
            self.server_error_count.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts every response. Expects an `Extension<ApiMetrics>` layer outside it.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.observe(&response);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn app(metrics: ApiMetrics) -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/gone", get(|| async { StatusCode::NOT_FOUND }))
            .route("/boom", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .layer(from_fn(metrics_middleware))
            .layer(axum::Extension(metrics))
    }

    async fn hit(app: &Router, uri: &str) -> StatusCode {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn counts_by_status_class() {
        let metrics = ApiMetrics::new();
        let app = app(metrics.clone());

        assert_eq!(hit(&app, "/ok").await, StatusCode::OK);
        assert_eq!(hit(&app, "/gone").await, StatusCode::NOT_FOUND);
        assert_eq!(hit(&app, "/boom").await, StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(metrics.requests(), 3);
        assert_eq!(metrics.client_errors(), 1);
        assert_eq!(metrics.server_errors(), 1);
    }

    #[test]
    fn starts_at_zero() {
        let m = ApiMetrics::default();
        assert_eq!((m.requests(), m.client_errors(), m.server_errors()), (0, 0, 0));
    }
}
