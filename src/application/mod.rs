//! # Application Layer
//!
//! Use cases that sit between the HTTP surface and the quote store.

pub mod error;
pub mod services;
