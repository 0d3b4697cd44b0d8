use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be
/// scraped directly or forwarded to an OpenTelemetry collector. Write errors
/// are logged and dropped; metrics never fail a caller.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let result = writeln!(writer, "# TYPE {name} {kind}")
            .and_then(|()| writeln!(writer, "{name} {value}"));
        if let Err(err) = result {
            tracing::warn!(metric = %name, error = %err, "failed to write metric");
        }
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<CacheMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &CacheMetricsSnapshot) {
        self.write_metric("counter", "get_calls_total", snapshot.get_calls);
        self.write_metric("counter", "get_hits_total", snapshot.get_hits);
        self.write_metric("counter", "get_misses_total", snapshot.get_misses);
        self.write_metric("counter", "loads_total", snapshot.loads);
        self.write_metric("counter", "load_failures_total", snapshot.load_failures);
        self.write_metric("counter", "evictions_total", snapshot.evictions);
        self.write_metric("gauge", "cache_len", snapshot.cache_len as u64);
        self.write_metric("gauge", "list_len", snapshot.list_len as u64);
        self.write_metric("gauge", "capacity", snapshot.capacity as u64);
        self.write_metric("gauge", "shards", snapshot.shards as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("shardcache", Vec::new());
        let snapshot = CacheMetricsSnapshot {
            get_calls: 7,
            get_hits: 5,
            get_misses: 2,
            loads: 2,
            cache_len: 2,
            list_len: 2,
            capacity: 100,
            shards: 19,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE shardcache_get_calls_total counter\nshardcache_get_calls_total 7\n"));
        assert!(text.contains("shardcache_get_hits_total 5\n"));
        assert!(text.contains("# TYPE shardcache_cache_len gauge\nshardcache_cache_len 2\n"));
        assert!(text.contains("shardcache_shards 19\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&CacheMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.starts_with("# TYPE get_calls_total counter\n"));
    }
}
