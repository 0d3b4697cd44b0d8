//! The public load-through cache.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                         ShardedCache<L>                            │
//!   │                                                                    │
//!   │   get("user:7")                                                    │
//!   │       │                                                            │
//!   │       ▼                                                            │
//!   │   ShardSelector::shard_for_key ──► 11                              │
//!   │       │                                                            │
//!   │       ▼                                                            │
//!   │   ┌─────────┬─────────┬─────┬──────────┬─────┬──────────┐          │
//!   │   │ Shard 0 │ Shard 1 │ ... │ Shard 11 │ ... │ Shard 18 │          │
//!   │   │ Mutex   │ Mutex   │     │ Mutex    │     │ Mutex    │          │
//!   │   │ LruCore │ LruCore │     │ LruCore  │     │ LruCore  │          │
//!   │   └─────────┴─────────┴─────┴────┬─────┴─────┴──────────┘          │
//!   │                                  │ miss                            │
//!   │                                  ▼                                 │
//!   │                           L: Loader (shared)                       │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shard table is built once and never changes, so routing needs no
//! lock. Each shard serializes only the keys routed to it.
//!
//! ## Example Usage
//!
//! ```
//! use shardcache::cache::ShardedCache;
//! use shardcache::error::LoadError;
//!
//! let cache = ShardedCache::new(|key: &str| -> Result<String, LoadError> {
//!     Ok(format!("v-{key}"))
//! });
//!
//! assert_eq!(cache.get("a").unwrap(), "v-a");
//! assert_eq!(cache.size(), (1, 1));
//! assert_eq!(cache.shard_count(), 19);
//! ```

use std::fmt;

use crate::builder::CacheConfig;
use crate::ds::ShardSelector;
use crate::error::{ConfigError, InvariantError, Result};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetricsSnapshot, MetricsSnapshotProvider};
use crate::shard::Shard;
use crate::traits::Loader;

/// Sharded LRU cache in front of a [`Loader`].
pub struct ShardedCache<L> {
    shards: Box<[Shard]>,
    selector: ShardSelector,
    loader: L,
    config: CacheConfig,
}

impl<L: Loader> ShardedCache<L> {
    /// Builds a cache with [`CacheConfig::default`]: 19 shards of 100
    /// entries each, routed by byte sum.
    pub fn new(loader: L) -> Self {
        Self::from_validated(loader, CacheConfig::default())
    }

    /// Builds a cache from `config`, rejecting zero capacities or shards.
    pub fn with_config(loader: L, config: CacheConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(loader, config))
    }

    pub(crate) fn from_validated(loader: L, config: CacheConfig) -> Self {
        let shards = config
            .shard_capacities()
            .into_iter()
            .enumerate()
            .map(|(id, capacity)| Shard::new(id, capacity))
            .collect();
        Self {
            shards,
            selector: ShardSelector::new(config.shards, config.strategy),
            loader,
            config,
        }
    }

    /// Returns the value for `key`, loading it on a miss.
    ///
    /// Blocks while another caller holds the same shard, including for the
    /// duration of that caller's load. On error the cache is unchanged.
    pub fn get(&self, key: &str) -> Result<String> {
        self.shard_for(key).get_or_load(key, &self.loader)
    }
}

impl<L> ShardedCache<L> {
    /// `(index entries, recency list nodes)` summed over all shards.
    ///
    /// Reads per-shard gauges without locking, so under concurrent writers
    /// the result is approximate. Use for monitoring, not correctness.
    pub fn size(&self) -> (usize, usize) {
        self.shards
            .iter()
            .fold((0, 0), |(entries, nodes), shard| {
                (entries + shard.len(), nodes + shard.list_len())
            })
    }

    /// Cached value for `key`, if any. Never loads and leaves recency alone.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.shard_for(key).peek(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.shard_for(key).contains(key)
    }

    /// Index of the shard that owns `key`.
    pub fn shard_of(&self, key: &str) -> usize {
        self.selector.shard_for_key(key)
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Capacity of shard `id`, or `None` for an unknown id.
    pub fn shard_capacity(&self, id: usize) -> Option<usize> {
        self.shards.get(id).map(Shard::capacity)
    }

    /// Sum of all shard capacities.
    pub fn total_capacity(&self) -> usize {
        self.shards.iter().map(Shard::capacity).sum()
    }

    /// Keys of shard `id` from most to least recently used.
    pub fn keys_by_recency(&self, id: usize) -> Option<Vec<String>> {
        self.shards.get(id).map(Shard::keys_by_recency)
    }

    /// Checks every shard's index/list consistency and capacity bound.
    /// Shards are locked one at a time.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        self.shards.iter().try_for_each(Shard::check_invariants)
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Merged counters and gauges across all shards.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.shards.iter().map(Shard::metrics_snapshot).sum()
    }

    fn shard_for(&self, key: &str) -> &Shard {
        &self.shards[self.shard_of(key)]
    }
}

#[cfg(feature = "metrics")]
impl<L> MetricsSnapshotProvider<CacheMetricsSnapshot> for ShardedCache<L> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<L> fmt::Debug for ShardedCache<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (entries, nodes) = self.size();
        f.debug_struct("ShardedCache")
            .field("shards", &self.shards.len())
            .field("capacity", &self.total_capacity())
            .field("entries", &entries)
            .field("nodes", &nodes)
            .field("strategy", &self.config.strategy)
            .finish_non_exhaustive()
    }
}
