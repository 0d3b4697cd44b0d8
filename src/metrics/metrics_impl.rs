use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::ShardMetricsRecorder;

/// Per-shard lookup counters.
#[derive(Debug, Default)]
pub struct ShardMetrics {
    pub get_calls: MetricsCell,
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub loads: MetricsCell,
    pub load_failures: MetricsCell,
    pub evictions: MetricsCell,
}

impl ShardMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of this shard's counters together with its gauges.
    pub fn snapshot(&self, cache_len: usize, list_len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls.get(),
            get_hits: self.get_hits.get(),
            get_misses: self.get_misses.get(),
            loads: self.loads.get(),
            load_failures: self.load_failures.get(),
            evictions: self.evictions.get(),
            cache_len,
            list_len,
            capacity,
            shards: 1,
        }
    }
}

impl ShardMetricsRecorder for ShardMetrics {
    #[inline]
    fn record_get_call(&self) {
        self.get_calls.incr();
    }

    #[inline]
    fn record_get_hit(&self) {
        self.get_hits.incr();
    }

    #[inline]
    fn record_get_miss(&self) {
        self.get_misses.incr();
    }

    #[inline]
    fn record_load(&self) {
        self.loads.incr();
    }

    #[inline]
    fn record_load_failure(&self) {
        self.load_failures.incr();
    }

    #[inline]
    fn record_eviction(&self) {
        self.evictions.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_carries_counters_and_gauges() {
        let metrics = ShardMetrics::new();
        metrics.record_get_call();
        metrics.record_get_call();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_load();
        metrics.record_eviction();

        let snap = metrics.snapshot(3, 3, 10);
        assert_eq!(snap.get_calls, 2);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 1);
        assert_eq!(snap.loads, 1);
        assert_eq!(snap.load_failures, 0);
        assert_eq!(snap.evictions, 1);
        assert_eq!((snap.cache_len, snap.list_len, snap.capacity), (3, 3, 10));
        assert_eq!(snap.shards, 1);
    }
}
