//! Caches for derived views, keyed by the version of the data they were built from.

use moka::sync::Cache;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;
use viewstat_graphs::Figure;
use viewstat_history::WatchCountSummary;

/// Identity of one filtered-data handle. A new handle always gets a new version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetVersion(u64);

impl DatasetVersion {
    pub fn new(version: u64) -> Self {
        Self(version)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Cache performance metrics
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheMetrics {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

/// Built monthly-usage figures, one per dataset version. Never evicts.
#[derive(Debug, Default)]
pub struct PlotCache {
    entries: HashMap<DatasetVersion, Arc<Figure>>,
    metrics: CacheMetrics,
}

impl PlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached figure for `version`, building it on first request.
    pub fn get_or_build<F>(&mut self, version: DatasetVersion, build: F) -> Arc<Figure>
    where
        F: FnOnce() -> Figure,
    {
        if let Some(figure) = self.entries.get(&version) {
            self.metrics.record_hit();
            return Arc::clone(figure);
        }

        self.metrics.record_miss();
        debug!(version = version.get(), "Building monthly usage figure");
        let figure = Arc::new(build());
        self.entries.insert(version, Arc::clone(&figure));
        figure
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

/// Memoized watch-count tables, one per dataset version.
pub struct WatchCountCache {
    cache: Cache<DatasetVersion, Arc<WatchCountSummary>>,
    metrics: CacheMetrics,
}

impl WatchCountCache {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
            metrics: CacheMetrics::default(),
        }
    }

    /// The memoized table for `version`, computing it on first request.
    pub fn get_or_compute<F>(&self, version: DatasetVersion, compute: F) -> Arc<WatchCountSummary>
    where
        F: FnOnce() -> WatchCountSummary,
    {
        let entry = self
            .cache
            .entry(version)
            .or_insert_with(|| Arc::new(compute()));

        if entry.is_fresh() {
            self.metrics.record_miss();
            debug!(version = version.get(), "Computed watch counts");
        } else {
            self.metrics.record_hit();
        }
        entry.into_value()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl Default for WatchCountCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WatchCountCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchCountCache")
            .field("entries", &self.cache.entry_count())
            .field("metrics", &self.metrics)
            .finish()
    }
}
