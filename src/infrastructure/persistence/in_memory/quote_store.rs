//! # In-Memory Quote Store
//!
//! Live aggregation store for freight quotes.
//!
//! The store keeps three pieces of state behind one reader/writer lock:
//!
//! - the **live buckets**, mutated by every accepted upsert
//! - the published **snapshot**, a price-sorted deep copy of the live
//!   buckets taken at refresh time
//! - the **submission counter**, which drives the refresh cadence
//!
//! A refresh happens inside an upsert when the counter, after that upsert's
//! increment, is a multiple of the refresh threshold. Readers only ever see
//! the published snapshot, so ranking is never recomputed per read.
//!
//! ## Cancellation
//!
//! The store is bound to a [`CancellationToken`]. When it fires, a
//! background watcher clears all state exactly once and the store becomes
//! inert: upserts fail with [`RepositoryError::OperationCancelled`] and
//! snapshot reads return an empty snapshot. Dropping the last handle to a
//! store also stops its watcher.
//!
//! # Examples
//!
//! ```
//! use freight_rates::domain::entities::Quote;
//! use freight_rates::domain::value_objects::{CompanyId, EffectiveDate};
//! use freight_rates::infrastructure::persistence::in_memory::QuoteStoreBuilder;
//! use freight_rates::infrastructure::persistence::QuoteRepository;
//! use tokio_util::sync::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let store = QuoteStoreBuilder::new()
//!     .cancellation(token.clone())
//!     .refresh_threshold(1)
//!     .build()
//!     .unwrap();
//!
//! let day = EffectiveDate::from_ymd(2024, 1, 1).unwrap();
//! store.upsert(Quote::new(CompanyId::new(1), 100, day), "CNSGH").unwrap();
//!
//! assert_eq!(store.snapshot().len(), 1);
//! token.cancel();
//! ```

use crate::domain::entities::{
    validate_submission, OriginBucket, Quote, Snapshot, UpsertOutcome,
};
use crate::infrastructure::persistence::traits::{
    QuoteRepository, RepositoryError, RepositoryResult,
};
use parking_lot::RwLock;
use std::num::NonZeroU64;
use std::sync::{Arc, Weak};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Builder for [`InMemoryQuoteStore`].
///
/// Both a cancellation token and a strictly positive refresh threshold are
/// required.
#[derive(Debug, Default)]
pub struct QuoteStoreBuilder {
    cancellation: Option<CancellationToken>,
    refresh_threshold: i64,
}

impl QuoteStoreBuilder {
    /// Creates a builder with no token and a zero threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cancellation token that tears the store down.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Sets the number of submissions between snapshot refreshes.
    #[must_use]
    pub fn refresh_threshold(mut self, threshold: i64) -> Self {
        self.refresh_threshold = threshold;
        self
    }

    /// Builds the store and registers its cancellation watcher.
    ///
    /// Inside a Tokio runtime the watcher is a task; otherwise it runs on a
    /// dedicated thread.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidConfiguration` if no token was set,
    /// the threshold is not strictly positive, or the watcher thread could
    /// not be spawned.
    pub fn build(self) -> RepositoryResult<InMemoryQuoteStore> {
        let token = self.cancellation.ok_or_else(|| {
            RepositoryError::invalid_configuration("cancellation token is required")
        })?;
        let refresh_threshold = u64::try_from(self.refresh_threshold)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or_else(|| {
                RepositoryError::invalid_configuration(format!(
                    "refresh threshold must be greater than 0, got {}",
                    self.refresh_threshold
                ))
            })?;

        let release = CancellationToken::new();
        let inner = Arc::new(StoreInner {
            state: RwLock::new(StoreState::default()),
            refresh_threshold,
            cancellation: token.clone(),
            release: release.clone(),
        });
        spawn_watcher(watch(token, release, Arc::downgrade(&inner)))?;

        Ok(InMemoryQuoteStore { inner })
    }
}

/// State guarded by the store lock.
#[derive(Debug, Default)]
struct StoreState {
    live: Vec<OriginBucket>,
    snapshot: Arc<Snapshot>,
    submissions: u64,
    torn_down: bool,
}

#[derive(Debug)]
struct StoreInner {
    state: RwLock<StoreState>,
    refresh_threshold: NonZeroU64,
    cancellation: CancellationToken,
    /// Fired when the last store handle is dropped.
    release: CancellationToken,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        self.release.cancel();
    }
}

impl StoreInner {
    fn teardown(&self) {
        let mut state = self.state.write();
        if state.torn_down {
            return;
        }
        state.live = Vec::new();
        state.snapshot = Arc::new(Snapshot::empty());
        state.submissions = 0;
        state.torn_down = true;
        warn!("quote store data has been cleared");
    }

    /// Publishes a fresh snapshot when the counter hits a threshold multiple.
    fn manage_batch(&self, state: &mut StoreState) {
        if state.submissions % self.refresh_threshold.get() == 0 {
            state.snapshot = Arc::new(Snapshot::capture(&state.live));
            state.submissions = 0;
            debug!(origins = state.snapshot.len(), "published quote snapshot");
        }
    }
}

/// Waits for cancellation and tears the store down, or returns as soon as
/// the store itself is gone.
async fn watch(token: CancellationToken, release: CancellationToken, inner: Weak<StoreInner>) {
    tokio::select! {
        () = token.cancelled() => {
            if let Some(inner) = inner.upgrade() {
                inner.teardown();
            }
        }
        () = release.cancelled() => {}
    }
}

fn spawn_watcher<F>(watch: F) -> RepositoryResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(watch);
        }
        Err(_) => {
            std::thread::Builder::new()
                .name("quote-store-watcher".to_string())
                .spawn(move || futures::executor::block_on(watch))
                .map_err(|e| {
                    RepositoryError::invalid_configuration(format!(
                        "failed to spawn cancellation watcher: {e}"
                    ))
                })?;
        }
    }
    Ok(())
}

/// Concurrent in-memory implementation of [`QuoteRepository`].
///
/// Cloning is cheap and every clone shares the same state.
///
/// # Thread Safety
///
/// Live buckets, snapshot and counter form one resource guarded by a
/// single `parking_lot::RwLock`. Upserts, counter bumps and teardown take
/// the write lock; snapshot reads take the read lock and clone an `Arc`.
#[derive(Debug, Clone)]
pub struct InMemoryQuoteStore {
    inner: Arc<StoreInner>,
}

impl InMemoryQuoteStore {
    /// Creates a store bound to `token`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidConfiguration` if `refresh_threshold`
    /// is not strictly positive.
    pub fn new(token: CancellationToken, refresh_threshold: i64) -> RepositoryResult<Self> {
        QuoteStoreBuilder::new()
            .cancellation(token)
            .refresh_threshold(refresh_threshold)
            .build()
    }

    /// Returns the refresh threshold.
    #[must_use]
    pub fn refresh_threshold(&self) -> u64 {
        self.inner.refresh_threshold.get()
    }

    /// Returns the submissions counted since the last refresh.
    #[must_use]
    pub fn pending_submissions(&self) -> u64 {
        self.inner.state.read().submissions
    }

    /// Returns the number of origins in the live buckets.
    #[must_use]
    pub fn live_origin_count(&self) -> usize {
        self.inner.state.read().live.len()
    }

    /// Returns a copy of the live bucket for `origin`, in its current order.
    #[must_use]
    pub fn live_bucket(&self, origin: &str) -> Option<OriginBucket> {
        self.inner
            .state
            .read()
            .live
            .iter()
            .find(|b| b.origin() == origin)
            .cloned()
    }

    /// Returns true once the cancellation token has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancellation.is_cancelled()
    }
}

impl QuoteRepository for InMemoryQuoteStore {
    fn upsert(&self, quote: Quote, origin: &str) -> RepositoryResult<()> {
        validate_submission(&quote, origin)?;

        if self.is_cancelled() {
            return Err(RepositoryError::OperationCancelled);
        }

        let mut guard = self.inner.state.write();
        let state = &mut *guard;
        // The watcher may have torn down the store while we waited.
        if self.is_cancelled() {
            return Err(RepositoryError::OperationCancelled);
        }

        let outcome = match state.live.iter_mut().find(|b| b.origin() == origin) {
            Some(bucket) => bucket.upsert(quote),
            None => {
                state.live.push(OriginBucket::new(origin, quote));
                UpsertOutcome::Inserted
            }
        };
        if !outcome.is_mutation() {
            trace!(origin, company = %quote.company(), "kept existing quote");
        }

        state.submissions += 1;
        self.inner.manage_batch(state);

        Ok(())
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        if self.is_cancelled() {
            return Arc::new(Snapshot::empty());
        }
        Arc::clone(&self.inner.state.read().snapshot)
    }

    fn increment_submission_count(&self) {
        let mut state = self.inner.state.write();
        if !state.torn_down {
            state.submissions += 1;
        }
    }
}
