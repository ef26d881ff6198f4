//! # In-Memory Repositories
//!
//! - [`InMemoryQuoteStore`]: live quote aggregation with periodic snapshots
//!
//! ## Thread Safety
//!
//! State is shared through `Arc<parking_lot::RwLock<_>>`; clones of a store
//! observe the same data.

pub mod quote_store;

pub use quote_store::{InMemoryQuoteStore, QuoteStoreBuilder};
