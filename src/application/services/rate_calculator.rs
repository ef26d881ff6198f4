//! # Rate Calculator
//!
//! Turns a price-sorted [`Snapshot`] into expected rates per origin.
//!
//! The expected rate of an origin is the truncated integer average of its
//! `top` cheapest quotes. The calculator relies on the snapshot already
//! being sorted ascending by price and never re-ranks.

use crate::domain::entities::Snapshot;
use crate::domain::errors::{DomainError, DomainResult};
use std::collections::BTreeMap;

/// Expected rate per origin, keyed by origin code.
pub type ExpectedRates = BTreeMap<String, i64>;

/// Computes expected rates from snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateCalculator;

impl RateCalculator {
    /// Creates a calculator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Averages the first `min(top, len)` quotes of every origin.
    ///
    /// Origins with no quotes or a blank name are skipped.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidTopValue` if `top` is not strictly positive;
    ///   checked before the snapshot is looked at
    /// - `DomainError::NoExpectedRates` if the snapshot has no origins
    /// - `DomainError::NoValidRates` if every origin was skipped
    pub fn average(&self, snapshot: &Snapshot, top: i64) -> DomainResult<ExpectedRates> {
        let top = usize::try_from(top)
            .ok()
            .filter(|t| *t > 0)
            .ok_or(DomainError::InvalidTopValue(top))?;

        if snapshot.is_empty() {
            return Err(DomainError::NoExpectedRates);
        }

        let mut rates = ExpectedRates::new();
        for bucket in snapshot.buckets() {
            if bucket.is_empty() || bucket.origin().trim().is_empty() {
                continue;
            }

            let cheapest = bucket.quotes().iter().take(top);
            let count = i128::try_from(cheapest.len()).unwrap_or(i128::MAX);
            let total: i128 = cheapest.map(|q| i128::from(q.price())).sum();
            // The mean of i64 values always fits back into i64.
            let average = i64::try_from(total / count).unwrap_or(i64::MAX);
            rates.insert(bucket.origin().to_string(), average);
        }

        if rates.is_empty() {
            return Err(DomainError::NoValidRates);
        }

        Ok(rates)
    }
}
