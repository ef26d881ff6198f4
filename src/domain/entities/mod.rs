//! # Domain Entities
//!
//! - [`Quote`]: one company's price for one origin
//! - [`OriginBucket`]: current quotes for one origin
//! - [`Snapshot`]: price-sorted copy of every bucket, used for pricing reads

pub mod quote;

pub use quote::{validate_submission, OriginBucket, Quote, Snapshot, UpsertOutcome};
