//! # Infrastructure Layer
//!
//! - [`persistence`]: quote storage port and the in-memory store
//! - [`config`]: environment-driven process configuration

pub mod config;
pub mod persistence;
