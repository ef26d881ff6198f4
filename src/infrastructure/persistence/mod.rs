//! # Persistence Layer
//!
//! ## Repository Traits (Ports)
//!
//! - [`QuoteRepository`]: live quote storage with published snapshots
//!
//! ## Implementations
//!
//! - `in_memory`: process-local store; data does not survive restarts

pub mod in_memory;
pub mod traits;

pub use traits::{QuoteRepository, RepositoryError, RepositoryResult};
