//! # REST Routes
//!
//! Router for the rate endpoint.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | `GET` | `/` | [`get_expected_rates`] |
//! | `POST` | `/` | [`submit_quote`] |
//! | other (including `HEAD`) | `/` | 405 |

use super::handlers::{get_expected_rates, method_not_allowed, submit_quote, AppState};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router with tracing and a per-request timeout.
pub fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .route(
            "/",
            get(get_expected_rates)
                .head(method_not_allowed)
                .post(submit_quote)
                .fallback(method_not_allowed),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::services::ShipmentService;
    use crate::infrastructure::persistence::in_memory::InMemoryQuoteStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tokio_util::sync::CancellationToken;
    use tower::ServiceExt;

    fn router() -> Router {
        let store = InMemoryQuoteStore::new(CancellationToken::new(), 1).unwrap();
        let state = Arc::new(AppState::new(ShipmentService::new(Arc::new(store))));
        create_router(state, Duration::from_secs(10))
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let response = router()
            .oneshot(Request::put("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Method Not Allowed");
    }

    #[tokio::test]
    async fn head_is_not_served_by_the_get_handler() {
        let response = router()
            .oneshot(Request::head("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let response = router()
            .oneshot(Request::get("/rates").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
