//! # Freight Rates
//!
//! Aggregates freight quotes submitted by shipping companies and reports an
//! expected rate per origin port.
//!
//! Each company holds at most one quote per origin. A newer quote replaces
//! the older one; on the same effective date only a cheaper quote wins.
//! Readers never see the live data: every `threshold` submissions the store
//! publishes an immutable, price-sorted [`Snapshot`](domain::entities::Snapshot)
//! and the expected rate of an origin is the average of the ten cheapest
//! quotes in that snapshot.
//!
//! # Layers
//!
//! - [`domain`]: quotes, buckets, snapshots and validation
//! - [`application`]: submission and rate-query use cases
//! - [`infrastructure`]: the quote store and configuration
//! - [`api`]: the HTTP surface
//!
//! # Examples
//!
//! ```
//! use freight_rates::application::services::ShipmentService;
//! use freight_rates::domain::entities::Quote;
//! use freight_rates::domain::value_objects::{CompanyId, EffectiveDate};
//! use freight_rates::infrastructure::persistence::in_memory::InMemoryQuoteStore;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let store = InMemoryQuoteStore::new(token.clone(), 1).unwrap();
//! let service = ShipmentService::new(Arc::new(store));
//!
//! let date = EffectiveDate::from_ymd(2024, 1, 1).unwrap();
//! service.submit("CNSGH", Quote::new(CompanyId::new(1), 100, date)).unwrap();
//!
//! let rates = service.latest_expected_rates().unwrap();
//! assert_eq!(rates.get("CNSGH"), Some(&100));
//! token.cancel();
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
