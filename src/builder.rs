//! Validated construction of a [`ShardedCache`].
//!
//! ## Example
//!
//! ```rust
//! use shardcache::builder::{CacheBuilder, CapacityMode};
//! use shardcache::error::LoadError;
//!
//! let cache = CacheBuilder::new(1_000)
//!     .shards(8)
//!     .capacity_mode(CapacityMode::Total)
//!     .try_build(|key: &str| -> Result<String, LoadError> { Ok(key.len().to_string()) })
//!     .unwrap();
//!
//! assert_eq!(cache.total_capacity(), 1_000);
//! assert_eq!(cache.get("four").unwrap(), "4");
//! ```

use tracing::info;

use crate::cache::ShardedCache;
use crate::ds::{ShardStrategy, DEFAULT_SHARDS};
use crate::error::ConfigError;
use crate::traits::Loader;

/// Entries per shard when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// How the configured capacity maps onto shards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapacityMode {
    /// Every shard gets the full configured capacity; the cache as a whole
    /// holds up to `capacity * shards` entries.
    #[default]
    PerShard,
    /// The configured capacity is the cache-wide total, split as evenly as
    /// possible with the remainder going to the lowest shard ids.
    Total,
}

/// Cache configuration. Validated by [`CacheConfig::validate`] before any
/// shard is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub shards: usize,
    pub capacity_mode: CapacityMode,
    pub strategy: ShardStrategy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            shards: DEFAULT_SHARDS,
            capacity_mode: CapacityMode::PerShard,
            strategy: ShardStrategy::ByteSum,
        }
    }
}

impl CacheConfig {
    /// Rejects configurations that would leave any shard unable to hold an
    /// entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        if self.shards == 0 {
            return Err(ConfigError::new("shard count must be > 0"));
        }
        if self.capacity_mode == CapacityMode::Total && self.capacity < self.shards {
            return Err(ConfigError::new(format!(
                "total capacity {} is smaller than shard count {}; every shard needs capacity > 0",
                self.capacity, self.shards
            )));
        }
        Ok(())
    }

    /// Capacity of each shard, indexed by shard id.
    pub fn shard_capacities(&self) -> Vec<usize> {
        let shards = self.shards.max(1);
        match self.capacity_mode {
            CapacityMode::PerShard => vec![self.capacity; shards],
            CapacityMode::Total => {
                let base = self.capacity / shards;
                let remainder = self.capacity % shards;
                (0..shards)
                    .map(|id| base + usize::from(id < remainder))
                    .collect()
            },
        }
    }
}

/// Fluent builder over [`CacheConfig`].
#[derive(Debug, Clone, Default)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Starts from the default configuration with `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig {
                capacity,
                ..CacheConfig::default()
            },
        }
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Number of independently locked shards.
    pub fn shards(mut self, shards: usize) -> Self {
        self.config.shards = shards;
        self
    }

    pub fn capacity_mode(mut self, mode: CapacityMode) -> Self {
        self.config.capacity_mode = mode;
        self
    }

    /// Key-to-shard routing strategy.
    pub fn strategy(mut self, strategy: ShardStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Validates the configuration and builds the cache around `loader`.
    pub fn try_build<L: Loader>(self, loader: L) -> Result<ShardedCache<L>, ConfigError> {
        self.config.validate()?;
        info!(
            shards = self.config.shards,
            capacity = self.config.capacity,
            mode = ?self.config.capacity_mode,
            strategy = ?self.config.strategy,
            "building sharded cache"
        );
        Ok(ShardedCache::from_validated(loader, self.config))
    }
}
