//! # Origin Ports
//!
//! The fixed set of origin ports accepted at the HTTP gateway.
//!
//! The store itself keys buckets by any non-blank string; this enumeration
//! is the gateway's fast-reject list. Codes are matched exactly, so
//! `"cnsgh"` is not a valid origin.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported origin port, identified by its five-character code.
///
/// # Examples
///
/// ```
/// use freight_rates::domain::value_objects::OriginCode;
///
/// let origin: OriginCode = "SGSIN".parse().unwrap();
/// assert_eq!(origin, OriginCode::Singapore);
/// assert_eq!(origin.as_str(), "SGSIN");
/// assert!("NYC".parse::<OriginCode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginCode {
    /// Shanghai.
    #[serde(rename = "CNSGH")]
    Shanghai,
    /// Singapore.
    #[serde(rename = "SGSIN")]
    Singapore,
    /// Shenzhen.
    #[serde(rename = "CNSNZ")]
    Shenzhen,
    /// Ningbo.
    #[serde(rename = "CNNBO")]
    Ningbo,
    /// Guangzhou.
    #[serde(rename = "CNGGZ")]
    Guangzhou,
}

impl OriginCode {
    /// Every supported origin.
    pub const ALL: [Self; 5] = [
        Self::Shanghai,
        Self::Singapore,
        Self::Shenzhen,
        Self::Ningbo,
        Self::Guangzhou,
    ];

    /// Returns the port code.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shanghai => "CNSGH",
            Self::Singapore => "SGSIN",
            Self::Shenzhen => "CNSNZ",
            Self::Ningbo => "CNNBO",
            Self::Guangzhou => "CNGGZ",
        }
    }
}

impl fmt::Display for OriginCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OriginCode {
    type Err = ParseOriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|origin| origin.as_str() == s)
            .ok_or_else(|| ParseOriginError(s.to_string()))
    }
}

/// Error returned when a string is not a supported origin code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported origin port: '{0}'")]
pub struct ParseOriginError(pub String);
