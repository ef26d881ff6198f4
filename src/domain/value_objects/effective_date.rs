//! # Effective Date Value Object
//!
//! Calendar day on which a quote takes effect.
//!
//! Quotes are dated to the day (`YYYY-MM-DD`). The type carries an explicit
//! unset value, [`EffectiveDate::UNSET`], which is what a quote holds when no
//! date was supplied; the store rejects it.
//!
//! # Examples
//!
//! ```
//! use freight_rates::domain::value_objects::EffectiveDate;
//!
//! let day = EffectiveDate::parse("2024-01-02").unwrap();
//! let before = EffectiveDate::parse("2024-01-01").unwrap();
//!
//! assert!(day.is_after(&before));
//! assert!(!day.is_unset());
//! assert!(EffectiveDate::default().is_unset());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar day with an explicit unset value.
///
/// # Invariants
///
/// - Ordering follows the calendar
/// - [`EffectiveDate::UNSET`] sorts before every real date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveDate(NaiveDate);

impl EffectiveDate {
    /// Wire format for dates: `YYYY-MM-DD`.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// The unset date.
    pub const UNSET: Self = Self(NaiveDate::MIN);

    /// Wraps a calendar day.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Creates a date from year, month and day.
    ///
    /// Returns `None` if the combination is not a real calendar day.
    ///
    /// # Examples
    ///
    /// ```
    /// use freight_rates::domain::value_objects::EffectiveDate;
    ///
    /// assert!(EffectiveDate::from_ymd(2024, 2, 29).is_some());
    /// assert!(EffectiveDate::from_ymd(2023, 2, 29).is_none());
    /// ```
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error if the input is not a valid date in
    /// the expected format.
    pub fn parse(input: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(input, Self::FORMAT).map(Self)
    }

    /// Returns true if no date was supplied.
    #[inline]
    #[must_use]
    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }

    /// Returns true if this date is strictly after another.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Returns the underlying calendar day.
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> &NaiveDate {
        &self.0
    }
}

impl Default for EffectiveDate {
    fn default() -> Self {
        Self::UNSET
    }
}

impl From<NaiveDate> for EffectiveDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for EffectiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}
