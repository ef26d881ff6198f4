//! # Domain Layer
//!
//! Core freight-quote concepts with no infrastructure dependencies.
//!
//! - [`entities`]: quotes, origin buckets and snapshots
//! - [`value_objects`]: company identifiers, effective dates, origin ports
//! - [`errors`]: validation and aggregate errors

pub mod entities;
pub mod errors;
pub mod value_objects;
