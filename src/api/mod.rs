//! # API Layer
//!
//! - [`rest`]: axum router and handlers

pub mod rest;
