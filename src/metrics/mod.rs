//! Cache metrics: per-shard counters, merged snapshots and exporters.
//!
//! Enabled by the `metrics` feature (on by default).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::ShardMetrics;
pub use snapshot::CacheMetricsSnapshot;
pub use traits::{MetricsExporter, MetricsSnapshotProvider, ShardMetricsRecorder};
