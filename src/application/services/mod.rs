//! # Application Services
//!
//! - [`ShipmentService`]: validated submission and expected-rate queries
//! - [`RateCalculator`]: averages of the cheapest quotes per origin

pub mod rate_calculator;
pub mod shipment_service;

pub use rate_calculator::{ExpectedRates, RateCalculator};
pub use shipment_service::{ShipmentService, EXPECTED_RATES_PER_ORIGIN};
