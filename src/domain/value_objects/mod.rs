//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`CompanyId`]: Identifier of a quoting company
//! - [`EffectiveDate`]: Day a quote takes effect, with an explicit unset value
//! - [`OriginCode`]: Supported origin ports

pub mod effective_date;
pub mod ids;
pub mod origin;

pub use effective_date::EffectiveDate;
pub use ids::CompanyId;
pub use origin::{OriginCode, ParseOriginError};
