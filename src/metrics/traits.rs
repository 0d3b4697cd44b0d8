//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and exporting are split into separate traits so
//! the shard hot path only depends on the recorder.
//!
//! ```text
//!   Shard::get_or_load ──► ShardMetricsRecorder   (counters, &self)
//!
//!   ShardedCache ────────► MetricsSnapshotProvider<CacheMetricsSnapshot>
//!                                   │
//!                                   ▼
//!                          MetricsExporter<CacheMetricsSnapshot>
//!                          (e.g. PrometheusTextExporter)
//! ```
//!
//! Recorders take `&self` because shards record from behind a shared
//! reference; implementations use atomic cells.

/// Counters recorded by a shard while serving lookups.
pub trait ShardMetricsRecorder {
    fn record_get_call(&self);
    fn record_get_hit(&self);
    fn record_get_miss(&self);
    fn record_load(&self);
    fn record_load_failure(&self);
    fn record_eviction(&self);
}

/// Produces a point-in-time snapshot of metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
