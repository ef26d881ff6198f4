//! # REST Handlers
//!
//! Request handlers for the quote submission and expected-rate endpoints.
//!
//! The submission handler is the gateway's fast-reject layer: it checks the
//! content type, decodes the payload and applies the wire-level bounds.
//! Payloads that decode but fail those bounds are not errors to the
//! caller; they are counted toward the refresh cadence and answered with an
//! empty 200.

use crate::application::services::ShipmentService;
use crate::domain::entities::Quote;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CompanyId, EffectiveDate, OriginCode};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Lowest price accepted at the gateway.
pub const MIN_PRICE: i64 = 1;

/// Highest price accepted at the gateway.
pub const MAX_PRICE: i64 = 99_999;

const JSON_CONTENT_TYPE: &str = "application/json";

const INVALID_CONTENT_TYPE: &str = "invalid content type";
const INVALID_REQUEST_PAYLOAD: &str = "invalid request payload";
const INTERNAL_SERVER_ERROR: &str = "internal server error";

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service backing both endpoints.
    pub shipment_service: ShipmentService,
}

impl AppState {
    /// Creates handler state around a service.
    #[must_use]
    pub fn new(shipment_service: ShipmentService) -> Self {
        Self { shipment_service }
    }
}

/// Body of `POST /`.
///
/// Missing fields, or a `null` body, decode to zero or empty values and are
/// then rejected by [`SubmitQuoteRequest::into_submission`]; fields of the
/// wrong JSON type make the whole payload undecodable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitQuoteRequest {
    /// Quoting company, 1..=999.
    pub company: i64,
    /// Quoted price, 1..=99999.
    pub price: i64,
    /// Origin port code.
    pub origin: String,
    /// Effective date, `YYYY-MM-DD`.
    pub date: String,
}

impl SubmitQuoteRequest {
    /// Applies the gateway bounds and builds the domain submission.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, in order: company, price, origin,
    /// date.
    pub fn into_submission(self) -> Result<(OriginCode, Quote), DomainError> {
        let company = CompanyId::new(self.company);
        if !company.is_within_bounds() {
            return Err(DomainError::InvalidCompany(self.company));
        }
        if !(MIN_PRICE..=MAX_PRICE).contains(&self.price) {
            return Err(DomainError::InvalidPrice(self.price));
        }
        let origin: OriginCode = self
            .origin
            .parse()
            .map_err(|_| DomainError::invalid_origin(&self.origin))?;
        let date = EffectiveDate::parse(&self.date).map_err(|_| DomainError::InvalidDate)?;

        Ok((origin, Quote::new(company, self.price, date)))
    }
}

/// Error body returned with 4xx/5xx submission responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn empty_ok() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)]).into_response()
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(JSON_CONTENT_TYPE))
}

/// GET / - Returns the expected rate per origin.
///
/// Responds 400 with a JSON `null` body when there is nothing to report.
pub async fn get_expected_rates(State(state): State<Arc<AppState>>) -> Response {
    let rates = match state.shipment_service.latest_expected_rates() {
        Ok(rates) => rates,
        Err(e) => {
            debug!(error = %e, "no expected rates to report");
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
                "null",
            )
                .into_response();
        }
    };

    match serde_json::to_vec(&rates) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "error marshaling expected rates");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST / - Submits a quote.
pub async fn submit_quote(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !has_json_content_type(&headers) {
        warn!(
            content_type = ?headers.get(header::CONTENT_TYPE),
            "invalid content type"
        );
        return error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, INVALID_CONTENT_TYPE);
    }

    // A JSON `null` body decodes like an empty object.
    let request = match serde_json::from_slice::<Option<SubmitQuoteRequest>>(&body) {
        Ok(request) => request.unwrap_or_default(),
        Err(e) => {
            error!(error = %e, "error decoding request payload");
            return error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST_PAYLOAD);
        }
    };

    let (origin, quote) = match request.into_submission() {
        Ok(submission) => submission,
        Err(e) => {
            debug!(error = %e, "rejected quote submission");
            state.shipment_service.record_rejected_submission();
            return empty_ok();
        }
    };

    match state.shipment_service.submit(origin.as_str(), quote) {
        Ok(()) => empty_ok(),
        Err(e) if e.is_validation() => {
            state.shipment_service.record_rejected_submission();
            empty_ok()
        }
        Err(e) => {
            error!(error = %e, "error adding quote");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
        }
    }
}

/// Fallback for unsupported methods on `/`.
pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(company: i64, price: i64, origin: &str, date: &str) -> SubmitQuoteRequest {
        SubmitQuoteRequest {
            company,
            price,
            origin: origin.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn valid_request_converts() {
        let (origin, quote) = request(1, 100, "CNSGH", "2023-01-01")
            .into_submission()
            .unwrap();
        assert_eq!(origin, OriginCode::Shanghai);
        assert_eq!(quote.company(), CompanyId::new(1));
        assert_eq!(quote.price(), 100);
        assert_eq!(quote.effective_date().to_string(), "2023-01-01");
    }

    #[test]
    fn company_bounds() {
        for company in [0, 1000] {
            let err = request(company, 100, "CNSGH", "2023-01-01")
                .into_submission()
                .unwrap_err();
            assert_eq!(err, DomainError::InvalidCompany(company));
        }
    }

    #[test]
    fn price_bounds() {
        for price in [0, 100_000] {
            let err = request(1, price, "CNSGH", "2023-01-01")
                .into_submission()
                .unwrap_err();
            assert_eq!(err, DomainError::InvalidPrice(price));
        }
        assert!(request(1, 99_999, "CNSGH", "2023-01-01").into_submission().is_ok());
    }

    #[test]
    fn unknown_origin() {
        let err = request(1, 100, "NYC", "2023-01-01")
            .into_submission()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidOrigin(_)));
    }

    #[test]
    fn bad_date_format() {
        let err = request(1, 100, "CNSGH", "01-01-2023")
            .into_submission()
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidDate);
    }

    #[test]
    fn missing_fields_decode_to_defaults() {
        let request: SubmitQuoteRequest = serde_json::from_str(r#"{"origin":"CNSGH"}"#).unwrap();
        assert_eq!(request.company, 0);
        assert!(request.into_submission().is_err());
    }

    #[test]
    fn wrong_field_type_fails_to_decode() {
        let result = serde_json::from_str::<SubmitQuoteRequest>(r#"{"company":"one"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn content_type_prefix_match() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!has_json_content_type(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            "application/json; charset=utf-8".parse().unwrap(),
        );
        assert!(has_json_content_type(&headers));
    }
}
