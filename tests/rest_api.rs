//! End-to-end tests of the HTTP contract.

#![allow(clippy::unwrap_used)]

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use freight_rates::api::rest::{create_router, AppState};
use freight_rates::application::services::ShipmentService;
use freight_rates::infrastructure::persistence::in_memory::InMemoryQuoteStore;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: InMemoryQuoteStore,
    token: CancellationToken,
}

impl TestApp {
    fn new(threshold: i64) -> Self {
        let token = CancellationToken::new();
        let store = InMemoryQuoteStore::new(token.clone(), threshold).unwrap();
        let service = ShipmentService::new(Arc::new(store.clone()));
        let router = create_router(Arc::new(AppState::new(service)), Duration::from_secs(10));
        Self {
            router,
            store,
            token,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, Bytes) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body)
    }

    async fn post(&self, content_type: Option<&str>, body: &str) -> (StatusCode, Bytes) {
        let mut request = Request::post("/");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let (status, _, body) = self
            .send(request.body(Body::from(body.to_string())).unwrap())
            .await;
        (status, body)
    }

    async fn post_quote(&self, quote: Value) -> (StatusCode, Bytes) {
        self.post(Some("application/json"), &quote.to_string()).await
    }

    async fn get(&self) -> (StatusCode, Option<String>, Bytes) {
        self.send(Request::get("/").body(Body::empty()).unwrap())
            .await
    }
}

fn quote(company: i64, price: i64, origin: &str, date: &str) -> Value {
    json!({ "company": company, "price": price, "origin": origin, "date": date })
}

fn error_body(message: &str) -> Value {
    json!({ "error": message })
}

mod submission {
    use super::*;

    #[tokio::test]
    async fn missing_content_type_is_unsupported() {
        let app = TestApp::new(1000);
        let (status, body) = app.post(None, "{}").await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, error_body("invalid content type"));
        assert_eq!(app.store.pending_submissions(), 0);
    }

    #[tokio::test]
    async fn wrong_content_type_is_unsupported() {
        let app = TestApp::new(1000);
        let (status, _) = app
            .post(Some("text/plain"), &quote(1, 100, "CNSGH", "2024-01-01").to_string())
            .await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn charset_suffix_is_accepted() {
        let app = TestApp::new(1000);
        let (status, body) = app
            .post(
                Some("application/json; charset=utf-8"),
                &quote(1, 100, "CNSGH", "2024-01-01").to_string(),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert!(app.store.live_bucket("CNSGH").is_some());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = TestApp::new(1000);
        let (status, body) = app.post(Some("application/json"), "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, error_body("invalid request payload"));
        assert_eq!(app.store.pending_submissions(), 0);
    }

    #[tokio::test]
    async fn wrongly_typed_field_is_bad_request() {
        let app = TestApp::new(1000);
        let (status, _) = app
            .post_quote(json!({ "company": "one", "price": 100, "origin": "CNSGH", "date": "2024-01-01" }))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_quotes_are_accepted_and_counted() {
        let app = TestApp::new(1000);
        let rejected = [
            quote(0, 100, "CNSGH", "2024-01-01"),
            quote(1000, 100, "CNSGH", "2024-01-01"),
            quote(1, 0, "CNSGH", "2024-01-01"),
            quote(1, 100_000, "CNSGH", "2024-01-01"),
            quote(1, 100, "USNYC", "2024-01-01"),
            quote(1, 100, "CNSGH", "2024/01/01"),
            json!({}),
        ];

        for payload in rejected.iter().cloned() {
            let (status, body) = app.post_quote(payload).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.is_empty());
        }

        assert_eq!(app.store.pending_submissions(), 7);
        assert_eq!(app.store.live_origin_count(), 0);
    }

    #[tokio::test]
    async fn null_body_is_counted_as_rejected() {
        let app = TestApp::new(1000);
        let (status, body) = app.post(Some("application/json"), "null").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_eq!(app.store.pending_submissions(), 1);
        assert_eq!(app.store.live_origin_count(), 0);
    }

    #[tokio::test]
    async fn cancelled_store_is_internal_error() {
        let app = TestApp::new(1000);
        app.token.cancel();

        let (status, body) = app.post_quote(quote(1, 100, "CNSGH", "2024-01-01")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, error_body("internal server error"));
    }
}

mod rates {
    use super::*;

    #[tokio::test]
    async fn empty_store_reports_null() {
        let app = TestApp::new(1000);
        let (status, content_type, body) = app.get().await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(&body[..], b"null");
    }

    #[tokio::test]
    async fn reports_average_of_latest_quotes() {
        let app = TestApp::new(1);
        for payload in [
            quote(1, 100, "CNSGH", "2023-01-01"),
            quote(2, 200, "CNSGH", "2023-01-02"),
            quote(1, 90, "CNSGH", "2023-01-03"),
            quote(3, 500, "SGSIN", "2023-01-01"),
        ] {
            let (status, _) = app.post_quote(payload).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, content_type, body) = app.get().await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "CNSGH": 145, "SGSIN": 500 }));
    }

    #[tokio::test]
    async fn readers_wait_for_threshold() {
        let app = TestApp::new(3);
        app.post_quote(quote(1, 100, "CNSGH", "2023-01-01")).await;
        app.post_quote(quote(2, 300, "CNSGH", "2023-01-01")).await;

        let (status, _, _) = app.get().await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        app.post_quote(quote(3, 500, "CNSGH", "2023-01-01")).await;

        let (status, _, body) = app.get().await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "CNSGH": 300 }));
    }

    #[tokio::test]
    async fn rejected_submissions_advance_the_cadence() {
        let app = TestApp::new(2);
        app.post_quote(quote(0, 100, "CNSGH", "2023-01-01")).await;
        app.post_quote(quote(1, 100, "CNSGH", "2023-01-01")).await;

        let (status, _, body) = app.get().await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "CNSGH": 100 }));
    }
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let app = TestApp::new(1000);
    for method in ["HEAD", "OPTIONS", "PUT", "DELETE", "PATCH"] {
        let request = Request::builder()
            .method(method)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = app.send(request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
    }
}
