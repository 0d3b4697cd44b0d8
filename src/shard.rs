//! One independently locked partition of the cache.
//!
//! A shard owns an [`LruCore`] behind a `parking_lot::Mutex` and fills
//! misses from a [`Loader`] while still holding that lock:
//!
//! ```text
//!   get_or_load(key)
//!     lock ───────────────────────────────────────────────────────── unlock
//!       │ hit?  ── yes ──► move to MRU, clone value ───────────────► Ok(v)
//!       │  no
//!       ▼
//!     loader.load(key) ── Err ──► state untouched ────────────────► Err(e)
//!       │ Ok(v)
//!       ▼
//!     full? ── yes ──► pop LRU
//!       ▼
//!     push (key, v) at MRU, publish gauges ───────────────────────► Ok(v)
//! ```
//!
//! Holding the lock across the load means two callers that miss on the same
//! key cannot both insert it: the second one waits and then hits. The price
//! is that a slow load stalls every key routed to the same shard.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::error::{CacheError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetricsSnapshot, ShardMetrics, ShardMetricsRecorder};
use crate::policy::lru::LruCore;
use crate::traits::Loader;

/// An LRU partition with its own lock and lock-free size gauges.
pub struct Shard {
    id: usize,
    capacity: usize,
    core: Mutex<LruCore<String, String>>,
    entries: AtomicUsize,
    list_len: AtomicUsize,
    #[cfg(feature = "metrics")]
    metrics: ShardMetrics,
}

impl Shard {
    /// Creates shard `id` holding at most `capacity` entries.
    pub fn new(id: usize, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            core: Mutex::new(LruCore::new(capacity)),
            entries: AtomicUsize::new(0),
            list_len: AtomicUsize::new(0),
            #[cfg(feature = "metrics")]
            metrics: ShardMetrics::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the value for `key`, loading and caching it on a miss.
    ///
    /// A failed load leaves the shard exactly as it was, recency included.
    pub fn get_or_load<L>(&self, key: &str, loader: &L) -> Result<String, CacheError>
    where
        L: Loader + ?Sized,
    {
        let mut core = self.core.lock();
        #[cfg(feature = "metrics")]
        self.metrics.record_get_call();

        if let Some(value) = core.get(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_hit();
            trace!(shard = self.id, key, "cache hit");
            return Ok(value.clone());
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_miss();
        debug!(shard = self.id, key, "cache miss, loading from source");

        let value = match loader.load(key) {
            Ok(value) => value,
            Err(source) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_load_failure();
                warn!(shard = self.id, key, error = %source, "load failed, shard left unchanged");
                return Err(CacheError::Load {
                    key: key.to_owned(),
                    shard: self.id,
                    source,
                });
            },
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_load();

        if let Some((evicted, _)) = core.insert(key.to_owned(), value.clone()) {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
            debug!(shard = self.id, evicted = %evicted, "evicted least recently used entry");
        }
        self.publish_gauges(&core);
        Ok(value)
    }

    /// Returns the cached value for `key` without loading or touching
    /// recency.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.core.lock().peek(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.core.lock().contains(key)
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.core.lock().keys().cloned().collect()
    }

    /// Entry count as of the last completed mutation. Does not take the lock,
    /// so it never waits on an in-flight load.
    pub fn len(&self) -> usize {
        self.entries.load(Ordering::Relaxed)
    }

    /// Recency list length as of the last completed mutation.
    pub fn list_len(&self) -> usize {
        self.list_len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verifies index/list consistency, the capacity bound and the gauges.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let core = self.core.lock();
        core.check_invariants()
            .map_err(|err| InvariantError::new(format!("shard {}: {}", self.id, err)))?;
        if self.len() != core.len() || self.list_len() != core.list_len() {
            return Err(InvariantError::new(format!(
                "shard {}: gauges ({}, {}) disagree with core ({}, {})",
                self.id,
                self.len(),
                self.list_len(),
                core.len(),
                core.list_len()
            )));
        }
        Ok(())
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics
            .snapshot(self.len(), self.list_len(), self.capacity)
    }

    fn publish_gauges(&self, core: &LruCore<String, String>) {
        self.entries.store(core.len(), Ordering::Relaxed);
        self.list_len.store(core.list_len(), Ordering::Relaxed);
    }
}

impl std::fmt::Debug for Shard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shard")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
