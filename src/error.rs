//! Error types for shardcache.
//!
//! ## Key Components
//!
//! - [`LoadError`]: raised by a [`Loader`](crate::traits::Loader) that cannot
//!   produce a value.
//! - [`CacheError`]: returned by [`ShardedCache::get`](crate::cache::ShardedCache::get)
//!   when a miss could not be filled. The cache is left exactly as it was.
//! - [`ConfigError`]: returned by [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build)
//!   for zero capacity or zero shards.
//! - [`InvariantError`]: returned by `check_invariants` when the index and
//!   the recency list disagree.
//!
//! ## Example Usage
//!
//! ```
//! use shardcache::builder::CacheBuilder;
//! use shardcache::error::LoadError;
//!
//! let cache = CacheBuilder::new(4)
//!     .shards(1)
//!     .try_build(|key: &str| -> Result<String, LoadError> {
//!         Err(LoadError::NotFound { key: key.to_string() })
//!     })
//!     .unwrap();
//!
//! let err = cache.get("missing").unwrap_err();
//! assert!(err.to_string().contains("missing"));
//! assert_eq!(cache.size(), (0, 0));
//! ```

use std::error::Error as StdError;

/// Result alias for cache lookups.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Failure reported by a backing loader.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source has no value for the key.
    #[error("key `{key}` not found in source")]
    NotFound { key: String },

    /// The source could not be reached or refused the request.
    #[error("source unavailable: {reason}")]
    Unavailable { reason: String },

    /// Any other loader-specific failure.
    #[error(transparent)]
    Other(Box<dyn StdError + Send + Sync>),
}

impl LoadError {
    /// Wraps an arbitrary error as [`LoadError::Other`].
    pub fn other<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Other(err.into())
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Failure of a cache lookup.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The miss for `key` could not be filled from the source.
    #[error("failed to load `{key}` into shard {shard}")]
    Load {
        key: String,
        shard: usize,
        #[source]
        source: LoadError,
    },
}

impl CacheError {
    /// Key whose lookup failed.
    pub fn key(&self) -> &str {
        match self {
            Self::Load { key, .. } => key,
        }
    }

    /// Loader error behind this failure, if any.
    pub fn load_error(&self) -> Option<&LoadError> {
        match self {
            Self::Load { source, .. } => Some(source),
        }
    }
}

/// Invalid cache configuration, caught at construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Internal consistency violation between a shard's index and recency list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}
