pub use crate::builder::{CacheBuilder, CacheConfig, CapacityMode, DEFAULT_CAPACITY};
pub use crate::cache::ShardedCache;
pub use crate::ds::{ShardSelector, ShardStrategy, DEFAULT_SHARDS};
pub use crate::error::{CacheError, ConfigError, InvariantError, LoadError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{
    CacheMetricsSnapshot, MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter,
};
pub use crate::policy::lru::LruCore;
pub use crate::traits::Loader;
