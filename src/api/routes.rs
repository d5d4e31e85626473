//! API Routes
//!
//! Configures the Axum router with all report service endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    account_report_handler, aging_report_handler, clear_handler, delete_handler, get_handler,
    health_handler, period_report_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (the admin UI is served from another host)
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache", put(set_handler).delete(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/:key", get(get_handler).delete(delete_handler))
        .route("/reports/aging", post(aging_report_handler))
        .route("/reports/accounts", post(account_report_handler))
        .route("/reports/periods", post(period_report_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let cache = TtlCache::new(Duration::from_secs(300));
        create_router(AppState::new(cache))
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        create_test_app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_route_is_not_shadowed_by_key_route() {
        let request = Request::builder()
            .uri("/cache/stats")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let request = Request::builder()
            .method("PUT")
            .uri("/cache")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"key":"test","value":{"total":1}}"#))
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let request = Request::builder()
            .uri("/cache/nonexistent")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_aging_endpoint() {
        let request = Request::builder()
            .method("POST")
            .uri("/reports/aging")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"records":[{"amount":5}]}"#))
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }
}
