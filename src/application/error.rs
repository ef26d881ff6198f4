//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Validation failures and "nothing to report"
//! └── Repository(RepositoryError)  - Store configuration, validation, cancellation
//! ```
//!
//! # Examples
//!
//! ```
//! use freight_rates::application::error::ApplicationError;
//! use freight_rates::domain::errors::DomainError;
//!
//! let err: ApplicationError = DomainError::NoExpectedRates.into();
//! assert!(err.is_no_rates());
//! assert!(!err.is_validation());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Domain error from business rules.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Error reported by the quote store.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ApplicationError {
    /// Returns true if an input value was rejected, at either layer.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_validation(),
            Self::Repository(e) => e.is_validation(),
        }
    }

    /// Returns true if there is nothing to report.
    #[must_use]
    pub fn is_no_rates(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_no_rates())
    }

    /// Returns true if the store has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_cancelled())
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
