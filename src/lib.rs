//! shardcache: a sharded, load-through LRU cache for slow key-value sources.
//!
//! Keys are routed to one of N independently locked shards. Each shard is an
//! LRU index over an arena-backed recency list; a miss is filled from the
//! [`Loader`](traits::Loader) while the shard's lock is held, so a key is
//! never loaded twice into the same shard and the index never disagrees
//! with the list.
//!
//! ```
//! use shardcache::prelude::*;
//!
//! let cache = CacheBuilder::new(2)
//!     .shards(1)
//!     .try_build(|key: &str| -> Result<String, LoadError> { Ok(format!("v-{key}")) })
//!     .unwrap();
//!
//! cache.get("a").unwrap();
//! cache.get("b").unwrap();
//! cache.get("a").unwrap(); // hit, "a" becomes most recent
//! cache.get("c").unwrap(); // evicts "b"
//! assert_eq!(cache.keys_by_recency(0).unwrap(), vec!["c", "a"]);
//! ```

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod shard;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;
