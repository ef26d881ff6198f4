//! # Identifiers
//!
//! Identifier types for quoting companies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a shipping company submitting quotes.
///
/// The raw value is signed so that out-of-range submissions can be carried
/// to the layer that rejects them. Only strictly positive values are valid
/// in the store; the HTTP gateway further restricts them to
/// [`CompanyId::MIN`]..=[`CompanyId::MAX`].
///
/// # Examples
///
/// ```
/// use freight_rates::domain::value_objects::CompanyId;
///
/// assert!(CompanyId::new(7).is_valid());
/// assert!(!CompanyId::new(0).is_valid());
/// assert!(!CompanyId::new(1000).is_within_bounds());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(i64);

impl CompanyId {
    /// Lowest company identifier accepted at the gateway.
    pub const MIN: i64 = 1;

    /// Highest company identifier accepted at the gateway.
    pub const MAX: i64 = 999;

    /// Creates a company identifier without validation.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Returns true if the identifier is strictly positive.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the identifier lies within the gateway bounds.
    #[must_use]
    pub const fn is_within_bounds(&self) -> bool {
        self.0 >= Self::MIN && self.0 <= Self::MAX
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CompanyId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert!(CompanyId::new(1).is_valid());
        assert!(!CompanyId::new(0).is_valid());
        assert!(!CompanyId::new(-3).is_valid());
    }

    #[test]
    fn gateway_bounds() {
        assert!(CompanyId::new(1).is_within_bounds());
        assert!(CompanyId::new(999).is_within_bounds());
        assert!(!CompanyId::new(0).is_within_bounds());
        assert!(!CompanyId::new(1000).is_within_bounds());
    }

    #[test]
    fn display() {
        assert_eq!(CompanyId::new(42).to_string(), "42");
    }
}
