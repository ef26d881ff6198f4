//! # Domain Errors
//!
//! Error types for domain rule violations.
//!
//! Two families live here:
//!
//! - **Validation errors** reject a single submission or query argument
//!   (blank origin, non-positive price, unset date, non-positive company,
//!   non-positive `top`). They never affect stored state.
//! - **Aggregate errors** signal that there is nothing to report
//!   ([`DomainError::NoExpectedRates`], [`DomainError::NoValidRates`]),
//!   which callers must keep distinct from real failures.
//!
//! # Examples
//!
//! ```
//! use freight_rates::domain::errors::DomainError;
//!
//! let err = DomainError::InvalidPrice(0);
//! assert!(err.is_validation());
//! assert!(!err.is_no_rates());
//! ```

use thiserror::Error;

/// Domain rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Origin is blank after trimming whitespace.
    #[error("invalid origin port provided: {0:?}")]
    InvalidOrigin(String),

    /// Price is not strictly positive.
    #[error("invalid price provided: {0}")]
    InvalidPrice(i64),

    /// Effective date is unset.
    #[error("invalid date provided")]
    InvalidDate,

    /// Company identifier is not strictly positive.
    #[error("invalid company provided: {0}")]
    InvalidCompany(i64),

    /// Number of quotes to average is not strictly positive.
    #[error("invalid top value provided: {0}")]
    InvalidTopValue(i64),

    /// The snapshot holds no origins at all.
    #[error("no expected rates available")]
    NoExpectedRates,

    /// Every origin in the snapshot was skipped.
    #[error("no valid rates calculated")]
    NoValidRates,
}

impl DomainError {
    /// Creates an invalid origin error.
    #[must_use]
    pub fn invalid_origin(origin: impl Into<String>) -> Self {
        Self::InvalidOrigin(origin.into())
    }

    /// Returns true if this error rejects an input value.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidOrigin(_)
                | Self::InvalidPrice(_)
                | Self::InvalidDate
                | Self::InvalidCompany(_)
                | Self::InvalidTopValue(_)
        )
    }

    /// Returns true if this error means "nothing to report".
    #[must_use]
    pub fn is_no_rates(&self) -> bool {
        matches!(self, Self::NoExpectedRates | Self::NoValidRates)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_variants() {
        assert!(DomainError::invalid_origin("  ").is_validation());
        assert!(DomainError::InvalidPrice(-1).is_validation());
        assert!(DomainError::InvalidDate.is_validation());
        assert!(DomainError::InvalidCompany(0).is_validation());
        assert!(DomainError::InvalidTopValue(0).is_validation());
        assert!(!DomainError::NoExpectedRates.is_validation());
    }

    #[test]
    fn no_rates_variants() {
        assert!(DomainError::NoExpectedRates.is_no_rates());
        assert!(DomainError::NoValidRates.is_no_rates());
        assert!(!DomainError::InvalidDate.is_no_rates());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            DomainError::NoExpectedRates.to_string(),
            "no expected rates available"
        );
        assert!(DomainError::InvalidCompany(-4).to_string().contains("-4"));
        assert!(DomainError::InvalidTopValue(0).to_string().contains("top"));
    }
}
