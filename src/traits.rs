//! Traits at the boundary between the cache and its backing source.
//!
//! ## Architecture
//!
//! ```text
//!   ShardedCache::get(key)
//!        │ miss
//!        ▼
//!   ┌──────────────────────────────┐
//!   │ Loader::load(&self, key)     │  synchronous, may be slow, may fail
//!   │   -> Result<String, LoadError>│
//!   └──────────────────────────────┘
//!        │
//!        ▼
//!   database / service / file / closure
//! ```
//!
//! A loader is called while the owning shard's lock is held, so it must not
//! call back into the same cache. Any timeout or retry policy belongs to the
//! loader; the cache never cancels a load.
//!
//! ## Example
//!
//! ```
//! use shardcache::error::LoadError;
//! use shardcache::traits::Loader;
//!
//! struct Upper;
//!
//! impl Loader for Upper {
//!     fn load(&self, key: &str) -> Result<String, LoadError> {
//!         Ok(key.to_uppercase())
//!     }
//! }
//!
//! assert_eq!(Upper.load("abc").unwrap(), "ABC");
//!
//! // Closures are loaders too.
//! let echo = |key: &str| -> Result<String, LoadError> { Ok(key.to_string()) };
//! assert_eq!(echo.load("k").unwrap(), "k");
//! ```

use crate::error::LoadError;

/// Synchronous source of values for keys missing from the cache.
///
/// Implementations are shared by every shard, hence `Send + Sync`.
pub trait Loader: Send + Sync {
    /// Produces the current value for `key`.
    fn load(&self, key: &str) -> Result<String, LoadError>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> Result<String, LoadError> + Send + Sync,
{
    fn load(&self, key: &str) -> Result<String, LoadError> {
        self(key)
    }
}
