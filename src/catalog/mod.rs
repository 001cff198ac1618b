//! Furniture catalog read model.
//!
//! DESIGN
//! ======
//! `CatalogService` serves the normalized furniture list from an in-memory
//! cache keyed by [`FURNITURE_MODELS_KEY`]. A miss starts exactly one fetch
//! per key; concurrent callers attach to the same shared future instead of
//! issuing their own query. The fetch runs on a spawned task, so it always
//! lands in the cache even if every waiting caller goes away.
//!
//! POLICY
//! ======
//! - `list()` awaits the refetch when the entry is stale or missing.
//! - `list_stale_while_revalidate()` returns preserved data immediately and
//!   leaves the refetch running in the background.
//! - A failed refetch marks the entry `error` and keeps the last good data.
//!   Only the caller that started the fetch sees the `Err`; callers that
//!   joined it get the preserved data when there is any.
//! - Invalidating while a fetch is in flight does not fence it: the result
//!   still lands and marks the entry fresh.

pub mod cache;
pub mod model;
pub mod normalize;
pub mod source;

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info, warn};

pub use cache::{CacheStatus, Catalog, CatalogCache, CatalogConfig};
pub use model::{FurnitureModel, by_category};
pub use source::{CatalogSource, FetchError, PgCatalogSource};

use cache::Lookup;
use normalize::normalize_all;

/// Cache key for the furniture list.
pub const FURNITURE_MODELS_KEY: &str = "furniture-models";

type InFlight = Shared<BoxFuture<'static, Result<Catalog, FetchError>>>;

struct Inner {
    cache: CatalogCache,
    in_flight: HashMap<&'static str, InFlight>,
}

#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    inner: Arc<Mutex<Inner>>,
}

impl CatalogService {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>, config: CatalogConfig) -> Self {
        let inner = Inner { cache: CatalogCache::new(config), in_flight: HashMap::new() };
        Self { source, inner: Arc::new(Mutex::new(inner)) }
    }

    /// Current catalog, awaiting a refetch if the cached copy is not servable.
    ///
    /// # Errors
    ///
    /// Returns the fetch error if this call started the fetch and it failed,
    /// or if it joined a failed fetch with nothing cached to fall back on.
    pub async fn list(&self) -> Result<Catalog, FetchError> {
        let (fetch, started, preserved) = {
            let mut inner = lock(&self.inner);
            match inner.cache.lookup(FURNITURE_MODELS_KEY, Instant::now()) {
                Lookup::Hit(data) => return Ok(data),
                Lookup::Miss { preserved } => {
                    let (fetch, started) = self.join_or_start(&mut inner);
                    (fetch, started, preserved)
                }
            }
        };

        match fetch.await {
            Ok(data) => Ok(data),
            Err(err) if started => Err(err),
            Err(err) => preserved.ok_or(err),
        }
    }

    /// Current catalog, serving preserved data without waiting whenever
    /// there is any. Only an empty cache waits for the fetch.
    ///
    /// # Errors
    ///
    /// Returns the fetch error if nothing was cached and the fetch failed.
    pub async fn list_stale_while_revalidate(&self) -> Result<Catalog, FetchError> {
        let fetch = {
            let mut inner = lock(&self.inner);
            match inner.cache.lookup(FURNITURE_MODELS_KEY, Instant::now()) {
                Lookup::Hit(data) => return Ok(data),
                Lookup::Miss { preserved: Some(data) } => {
                    self.join_or_start(&mut inner);
                    return Ok(data);
                }
                Lookup::Miss { preserved: None } => self.join_or_start(&mut inner).0,
            }
        };

        fetch.await
    }

    /// Mark the catalog stale. Cached data stays servable to stale readers.
    /// Returns false when there was nothing to invalidate or a fetch is
    /// already in flight.
    pub fn invalidate(&self) -> bool {
        let changed = lock(&self.inner).cache.invalidate(FURNITURE_MODELS_KEY);
        info!(key = FURNITURE_MODELS_KEY, changed, "catalog invalidated");
        changed
    }

    #[must_use]
    pub fn status(&self) -> Option<CacheStatus> {
        lock(&self.inner).cache.status(FURNITURE_MODELS_KEY)
    }

    /// Attach to the outstanding fetch for the key, or start one. The bool
    /// is true when this call started it.
    fn join_or_start(&self, inner: &mut Inner) -> (InFlight, bool) {
        if let Some(existing) = inner.in_flight.get(FURNITURE_MODELS_KEY) {
            debug!(key = FURNITURE_MODELS_KEY, "catalog fetch: joining in-flight request");
            return (existing.clone(), false);
        }

        inner.cache.begin_fetch(FURNITURE_MODELS_KEY);
        debug!(key = FURNITURE_MODELS_KEY, "catalog fetch: starting");

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let started = Instant::now();
            let outcome = match AssertUnwindSafe(source.fetch_furniture()).catch_unwind().await {
                Ok(result) => result.map(|rows| Catalog::from(normalize_all(rows))),
                Err(_) => Err(FetchError::Aborted("catalog source panicked".into())),
            };
            apply_outcome(&state, &outcome, started);
            outcome
        });

        let state = Arc::clone(&self.inner);
        let fetch = async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(join_err) => {
                    let err = FetchError::Aborted(join_err.to_string());
                    apply_outcome(&state, &Err(err.clone()), Instant::now());
                    Err(err)
                }
            }
        }
        .boxed()
        .shared();

        inner.in_flight.insert(FURNITURE_MODELS_KEY, fetch.clone());
        (fetch, true)
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn apply_outcome(inner: &Mutex<Inner>, outcome: &Result<Catalog, FetchError>, started: Instant) {
    let mut inner = lock(inner);
    inner.in_flight.remove(FURNITURE_MODELS_KEY);
    let now = Instant::now();
    match outcome {
        Ok(data) => {
            inner.cache.apply_success(FURNITURE_MODELS_KEY, Arc::clone(data), now);
            info!(
                key = FURNITURE_MODELS_KEY,
                rows = data.len(),
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "catalog fetched"
            );
        }
        Err(err) => {
            let preserved = inner.cache.apply_failure(FURNITURE_MODELS_KEY, now);
            warn!(key = FURNITURE_MODELS_KEY, error = %err, serving_stale = preserved.is_some(), "catalog fetch failed");
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
