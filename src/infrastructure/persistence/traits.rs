//! # Repository Traits
//!
//! Port definition for quote storage.
//!
//! [`QuoteRepository`] abstracts the live quote store so the application
//! layer can be exercised against any implementation. All operations are
//! synchronous: they either complete immediately or block briefly on a lock.
//!
//! # Examples
//!
//! ```ignore
//! use freight_rates::infrastructure::persistence::traits::QuoteRepository;
//!
//! fn cheapest(repo: &impl QuoteRepository, origin: &str) -> Option<i64> {
//!     let snapshot = repo.snapshot();
//!     snapshot.bucket(origin)?.quotes().first().map(|q| q.price())
//! }
//! ```

use crate::domain::entities::{Quote, Snapshot};
use crate::domain::errors::DomainError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The store could not be constructed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The submission failed validation; nothing was stored.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The store has been torn down by its cancellation signal.
    #[error("operation cancelled")]
    OperationCancelled,
}

impl RepositoryError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    /// Returns true if the submission was rejected by validation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the store has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::OperationCancelled)
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for freight quotes grouped by origin.
///
/// Implementations keep a live, frequently-mutated set of origin buckets and
/// separately publish a price-sorted [`Snapshot`] used for pricing reads.
pub trait QuoteRepository: Send + Sync + fmt::Debug {
    /// Inserts or updates a company's quote for an origin.
    ///
    /// An existing quote for the same company is replaced only if the new
    /// one is strictly newer, or equally dated and strictly cheaper. A
    /// non-improving submission succeeds without changing anything.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Validation` if the origin is blank, or the price,
    ///   date or company is invalid
    /// - `RepositoryError::OperationCancelled` once the store is torn down
    fn upsert(&self, quote: Quote, origin: &str) -> RepositoryResult<()>;

    /// Returns the most recently published snapshot.
    ///
    /// Never forces a refresh. Returns an empty snapshot after cancellation.
    fn snapshot(&self) -> Arc<Snapshot>;

    /// Counts a submission toward the refresh cadence without storing
    /// anything and without evaluating the refresh trigger.
    fn increment_submission_count(&self);
}
