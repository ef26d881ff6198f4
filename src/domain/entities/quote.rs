//! # Quote Entities
//!
//! Freight quotes and their per-origin grouping.
//!
//! - [`Quote`]: one company's current price for one origin
//! - [`OriginBucket`]: all current quotes for one origin, at most one per company
//! - [`Snapshot`]: a stable, price-sorted copy of every bucket
//!
//! # Examples
//!
//! ```
//! use freight_rates::domain::entities::{OriginBucket, Quote, UpsertOutcome};
//! use freight_rates::domain::value_objects::{CompanyId, EffectiveDate};
//!
//! let day = EffectiveDate::from_ymd(2024, 1, 1).unwrap();
//! let mut bucket = OriginBucket::new("CNSGH", Quote::new(CompanyId::new(1), 100, day));
//!
//! // Same day, lower price: replaces the existing quote.
//! let outcome = bucket.upsert(Quote::new(CompanyId::new(1), 50, day));
//! assert_eq!(outcome, UpsertOutcome::Replaced);
//! assert_eq!(bucket.quotes()[0].price(), 50);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{CompanyId, EffectiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One company's price for one origin.
///
/// Immutable once built; an update replaces the whole value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    company: CompanyId,
    price: i64,
    effective_date: EffectiveDate,
}

impl Quote {
    /// Creates a quote without validation.
    ///
    /// Validation is the store's job, so out-of-range values can be
    /// represented and rejected there with a precise error.
    #[must_use]
    pub const fn new(company: CompanyId, price: i64, effective_date: EffectiveDate) -> Self {
        Self {
            company,
            price,
            effective_date,
        }
    }

    /// Returns the quoting company.
    #[inline]
    #[must_use]
    pub const fn company(&self) -> CompanyId {
        self.company
    }

    /// Returns the quoted price.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> i64 {
        self.price
    }

    /// Returns the day the quote takes effect.
    #[inline]
    #[must_use]
    pub const fn effective_date(&self) -> EffectiveDate {
        self.effective_date
    }

    /// Returns true if this quote should replace `existing`.
    ///
    /// A quote wins when it is strictly newer, or when it has the same date
    /// and a strictly lower price.
    #[must_use]
    pub fn supersedes(&self, existing: &Self) -> bool {
        self.effective_date.is_after(&existing.effective_date)
            || (self.effective_date == existing.effective_date && self.price < existing.price)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote(company={} price={} date={})",
            self.company, self.price, self.effective_date
        )
    }
}

/// Checks a submission for `origin` before it reaches any stored state.
///
/// # Errors
///
/// Returns the first failing rule, in order: blank origin, non-positive
/// price, unset date, non-positive company.
pub fn validate_submission(quote: &Quote, origin: &str) -> DomainResult<()> {
    if origin.trim().is_empty() {
        return Err(DomainError::invalid_origin(origin));
    }
    if quote.price <= 0 {
        return Err(DomainError::InvalidPrice(quote.price));
    }
    if quote.effective_date.is_unset() {
        return Err(DomainError::InvalidDate);
    }
    if !quote.company.is_valid() {
        return Err(DomainError::InvalidCompany(quote.company.get()));
    }
    Ok(())
}

/// What an upsert did to a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The company had no quote for this origin; the new one was appended.
    Inserted,
    /// The company's previous quote was replaced.
    Replaced,
    /// The existing quote won; nothing changed.
    Retained,
}

impl UpsertOutcome {
    /// Returns true if the bucket changed.
    #[must_use]
    pub fn is_mutation(self) -> bool {
        !matches!(self, Self::Retained)
    }
}

/// Current quotes for a single origin.
///
/// # Invariants
///
/// - `quotes` never holds two quotes from the same company
/// - ordering is only guaranteed right after [`OriginBucket::sort_by_price`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginBucket {
    origin: String,
    quotes: Vec<Quote>,
}

impl OriginBucket {
    /// Creates a bucket holding exactly one quote.
    #[must_use]
    pub fn new(origin: impl Into<String>, quote: Quote) -> Self {
        Self {
            origin: origin.into(),
            quotes: vec![quote],
        }
    }

    /// Creates a bucket from existing quotes, keeping only the first quote
    /// seen for each company.
    #[must_use]
    pub fn from_quotes(origin: impl Into<String>, quotes: impl IntoIterator<Item = Quote>) -> Self {
        let mut deduped: Vec<Quote> = Vec::new();
        for quote in quotes {
            if !deduped.iter().any(|q| q.company == quote.company) {
                deduped.push(quote);
            }
        }
        Self {
            origin: origin.into(),
            quotes: deduped,
        }
    }

    /// Returns the origin key.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the quotes in their current order.
    #[inline]
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Returns the number of quotes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if the bucket holds no quotes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Returns the quote held for `company`, if any.
    #[must_use]
    pub fn quote_for(&self, company: CompanyId) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.company == company)
    }

    /// Applies a submission to this bucket.
    ///
    /// Replaces the company's quote only if the new one supersedes it;
    /// otherwise appends when the company is new. Insertion does not keep
    /// any ordering.
    pub fn upsert(&mut self, quote: Quote) -> UpsertOutcome {
        match self.quotes.iter_mut().find(|q| q.company == quote.company) {
            Some(existing) if quote.supersedes(existing) => {
                *existing = quote;
                UpsertOutcome::Replaced
            }
            Some(_) => UpsertOutcome::Retained,
            None => {
                self.quotes.push(quote);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Sorts quotes ascending by price. Equal prices keep their relative order.
    pub fn sort_by_price(&mut self) {
        self.quotes.sort_by_key(Quote::price);
    }

    /// Returns true if quotes are in ascending price order.
    #[must_use]
    pub fn is_sorted_by_price(&self) -> bool {
        self.quotes.windows(2).all(|w| match w {
            [a, b] => a.price <= b.price,
            _ => true,
        })
    }
}

/// Price-sorted, point-in-time copy of every origin bucket.
///
/// A snapshot owns its data; later mutations of the live store never show
/// through it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    buckets: Vec<OriginBucket>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copies `live` and sorts each bucket by price.
    #[must_use]
    pub fn capture(live: &[OriginBucket]) -> Self {
        let buckets = live
            .iter()
            .cloned()
            .map(|mut bucket| {
                bucket.sort_by_price();
                bucket
            })
            .collect();
        Self { buckets }
    }

    /// Builds a snapshot from buckets, sorting each one.
    #[must_use]
    pub fn from_buckets(buckets: Vec<OriginBucket>) -> Self {
        Self::capture(&buckets)
    }

    /// Returns the buckets.
    #[inline]
    #[must_use]
    pub fn buckets(&self) -> &[OriginBucket] {
        &self.buckets
    }

    /// Returns the bucket for `origin`, if present.
    #[must_use]
    pub fn bucket(&self, origin: &str) -> Option<&OriginBucket> {
        self.buckets.iter().find(|b| b.origin == origin)
    }

    /// Returns the number of origins.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if the snapshot holds no origins.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
