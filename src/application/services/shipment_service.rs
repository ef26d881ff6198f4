//! # Shipment Service
//!
//! Business entry point between the HTTP gateway and the quote store.
//!
//! The service validates submissions itself before handing them to the
//! [`QuoteRepository`], which validates again. It also forwards rejected
//! submissions to the store's counter and answers expected-rate queries
//! from the published snapshot.

use crate::application::error::ApplicationResult;
use crate::application::services::rate_calculator::{ExpectedRates, RateCalculator};
use crate::domain::entities::{validate_submission, Quote};
use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::QuoteRepository;
use std::sync::Arc;

/// Number of cheapest quotes averaged per origin.
pub const EXPECTED_RATES_PER_ORIGIN: i64 = 10;

/// Orchestrates quote submission and expected-rate queries.
#[derive(Debug, Clone)]
pub struct ShipmentService {
    repository: Arc<dyn QuoteRepository>,
    calculator: RateCalculator,
}

impl ShipmentService {
    /// Creates a service over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn QuoteRepository>) -> Self {
        Self {
            repository,
            calculator: RateCalculator::new(),
        }
    }

    /// Validates and stores a quote for `origin`.
    ///
    /// # Errors
    ///
    /// Returns a domain validation error if the submission is invalid, or
    /// the repository's error if the store rejects it.
    pub fn submit(&self, origin: &str, quote: Quote) -> ApplicationResult<()> {
        validate_submission(&quote, origin)?;
        self.repository.upsert(quote, origin)?;
        Ok(())
    }

    /// Counts a submission that was rejected before reaching the store.
    pub fn record_rejected_submission(&self) {
        self.repository.increment_submission_count();
    }

    /// Returns the expected rate of every origin, averaging the `top`
    /// cheapest quotes of the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTopValue`, `NoExpectedRates` or
    /// `NoValidRates` as reported by the calculator.
    pub fn expected_rates(&self, top: i64) -> ApplicationResult<ExpectedRates> {
        if top <= 0 {
            return Err(DomainError::InvalidTopValue(top).into());
        }
        let snapshot = self.repository.snapshot();
        Ok(self.calculator.average(&snapshot, top)?)
    }

    /// Returns expected rates using [`EXPECTED_RATES_PER_ORIGIN`].
    ///
    /// # Errors
    ///
    /// See [`ShipmentService::expected_rates`].
    pub fn latest_expected_rates(&self) -> ApplicationResult<ExpectedRates> {
        self.expected_rates(EXPECTED_RATES_PER_ORIGIN)
    }
}
