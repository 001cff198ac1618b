//! Catalog cache state machine.
//!
//! DESIGN
//! ======
//! One `CacheEntry` per cache key, moving through
//! `Pending → Fresh → Stale → Pending → Fresh | Error`. The machine is pure
//! and synchronous: every time-dependent operation takes `now` so tests can
//! drive expiry without sleeping. The service layer owns the lock and the
//! in-flight fetch bookkeeping; this module only decides what a lookup may
//! serve and how a fetch outcome updates the entry.
//!
//! TRADE-OFFS
//! ==========
//! Data is never deleted. Invalidation and failed refetches keep the last
//! good sequence so callers that opt into staleness always have something
//! to render once the first fetch has succeeded.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::model::FurnitureModel;
use crate::config::{DEFAULT_CATALOG_ERROR_RETRY_SECS, DEFAULT_CATALOG_STALE_AFTER_SECS};

/// Immutable, cheaply shareable catalog snapshot.
pub type Catalog = Arc<[FurnitureModel]>;

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// How long a successful fetch stays `Fresh`.
    pub stale_after: Duration,
    /// After a failed refetch with preserved data, how long lookups serve
    /// the preserved data before another refetch is allowed.
    pub error_retry_after: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(DEFAULT_CATALOG_STALE_AFTER_SECS),
            error_retry_after: Duration::from_secs(DEFAULT_CATALOG_ERROR_RETRY_SECS),
        }
    }
}

// =============================================================================
// ENTRY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Pending,
    Fresh,
    Stale,
    Error,
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Option<Catalog>,
    pub status: CacheStatus,
    pub fetched_at: Option<Instant>,
    pub failed_at: Option<Instant>,
}

impl CacheEntry {
    fn pending() -> Self {
        Self { data: None, status: CacheStatus::Pending, fetched_at: None, failed_at: None }
    }
}

/// What a lookup may serve without fetching.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Servable as-is.
    Hit(Catalog),
    /// A fetch is required. `preserved` is the last good sequence, if any.
    Miss { preserved: Option<Catalog> },
}

// =============================================================================
// CACHE
// =============================================================================

#[derive(Debug, Default)]
pub struct CatalogCache {
    config: CatalogConfig,
    entries: HashMap<&'static str, CacheEntry>,
}

impl CatalogCache {
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self { config, entries: HashMap::new() }
    }

    /// Decide whether `key` can be served at `now`.
    ///
    /// An expired `Fresh` entry is moved to `Stale` here, so `status()`
    /// reflects expiry even before the next fetch begins.
    pub fn lookup(&mut self, key: &'static str, now: Instant) -> Lookup {
        let Some(entry) = self.entries.get_mut(key) else {
            return Lookup::Miss { preserved: None };
        };

        match entry.status {
            CacheStatus::Fresh => {
                let expired = entry
                    .fetched_at
                    .is_none_or(|at| now.saturating_duration_since(at) >= self.config.stale_after);
                match (&entry.data, expired) {
                    (Some(data), false) => Lookup::Hit(data.clone()),
                    _ => {
                        entry.status = CacheStatus::Stale;
                        Lookup::Miss { preserved: entry.data.clone() }
                    }
                }
            }
            CacheStatus::Error => {
                let cooling = entry
                    .failed_at
                    .is_some_and(|at| now.saturating_duration_since(at) < self.config.error_retry_after);
                match (&entry.data, cooling) {
                    (Some(data), true) => Lookup::Hit(data.clone()),
                    _ => Lookup::Miss { preserved: entry.data.clone() },
                }
            }
            CacheStatus::Pending | CacheStatus::Stale => Lookup::Miss { preserved: entry.data.clone() },
        }
    }

    /// Mark `key` as having a fetch outstanding. Preserved data is kept.
    pub fn begin_fetch(&mut self, key: &'static str) {
        self.entries
            .entry(key)
            .or_insert_with(CacheEntry::pending)
            .status = CacheStatus::Pending;
    }

    /// Replace the entry with a freshly fetched sequence.
    pub fn apply_success(&mut self, key: &'static str, data: Catalog, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry { data: Some(data), status: CacheStatus::Fresh, fetched_at: Some(now), failed_at: None },
        );
    }

    /// Record a failed fetch. Returns the preserved sequence, if any.
    pub fn apply_failure(&mut self, key: &'static str, now: Instant) -> Option<Catalog> {
        let entry = self.entries.entry(key).or_insert_with(CacheEntry::pending);
        entry.status = CacheStatus::Error;
        entry.failed_at = Some(now);
        entry.data.clone()
    }

    /// Mark `key` stale without dropping its data. Returns false if the key
    /// has never been fetched or is already awaiting a fetch.
    pub fn invalidate(&mut self, key: &'static str) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if entry.status != CacheStatus::Pending => {
                entry.status = CacheStatus::Stale;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn status(&self, key: &str) -> Option<CacheStatus> {
        self.entries.get(key).map(|e| e.status)
    }

    #[cfg(test)]
    pub(crate) fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
