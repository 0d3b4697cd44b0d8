//! Deterministic key-to-shard routing.
//!
//! ```text
//!   "ab"  ──► ByteSum: (0x61 + 0x62) % 19 = 195 % 19 = 5
//!
//!   ┌─────────┬─────────┬─────┬─────────┬─────┬──────────┐
//!   │ Shard 0 │ Shard 1 │ ... │ Shard 5 │ ... │ Shard 18 │
//!   └─────────┴─────────┴─────┴─────────┴─────┴──────────┘
//! ```
//!
//! The mapping is a pure function of `(key, strategy, shard count)`, so the
//! shard table never needs rehashing once a cache is built. Colliding keys
//! only share a lock; they never affect each other's correctness.
//!
//! ## Example
//!
//! ```
//! use shardcache::ds::{ShardSelector, ShardStrategy};
//!
//! let selector = ShardSelector::new(19, ShardStrategy::ByteSum);
//! assert_eq!(selector.shard_for_key("ab"), 5);
//! assert_eq!(selector.shard_for_key("ba"), 5);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Shard count used when none is configured. Prime, so byte sums of
/// typical string keys spread evenly.
pub const DEFAULT_SHARDS: usize = 19;

/// How a key is reduced to a shard index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShardStrategy {
    /// Sum of the key's bytes modulo the shard count.
    #[default]
    ByteSum,
    /// `DefaultHasher` over `(seed, key)` modulo the shard count. Use when
    /// keys are anagrams of each other or otherwise share byte sums.
    Seeded { seed: u64 },
}

/// Maps string keys to a shard index in `[0, shards)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    strategy: ShardStrategy,
}

impl ShardSelector {
    /// Creates a selector over `shards` shards. The count is clamped to at
    /// least 1; callers that must reject zero validate before this point.
    pub fn new(shards: usize, strategy: ShardStrategy) -> Self {
        Self {
            shards: shards.max(1),
            strategy,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    pub fn strategy(&self) -> ShardStrategy {
        self.strategy
    }

    /// Returns the shard that owns `key`.
    pub fn shard_for_key(&self, key: &str) -> usize {
        match self.strategy {
            ShardStrategy::ByteSum => byte_sum(key) % self.shards,
            ShardStrategy::Seeded { seed } => {
                let mut hasher = DefaultHasher::new();
                seed.hash(&mut hasher);
                key.hash(&mut hasher);
                (hasher.finish() % self.shards as u64) as usize
            },
        }
    }
}

impl Default for ShardSelector {
    fn default() -> Self {
        Self::new(DEFAULT_SHARDS, ShardStrategy::ByteSum)
    }
}

fn byte_sum(key: &str) -> usize {
    key.bytes().map(usize::from).sum()
}
