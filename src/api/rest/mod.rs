//! # REST API
//!
//! HTTP surface of the rate service, built on axum.
//!
//! # Endpoints
//!
//! - `GET /` - Expected rate per origin, as a JSON object of origin code to
//!   integer price. Responds 400 with a `null` body when nothing can be
//!   reported yet.
//! - `POST /` - Submit a quote: `{"company": 1, "price": 100, "origin":
//!   "CNSGH", "date": "2024-01-01"}`. Requires `Content-Type:
//!   application/json`.
//!
//! # Usage
//!
//! ```ignore
//! use freight_rates::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(service));
//! let router = create_router(state, config.request_timeout());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3142").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, ErrorResponse, SubmitQuoteRequest};
pub use routes::create_router;
