use std::ops::AddAssign;

/// Point-in-time view of one shard or, once merged, the whole cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub loads: u64,
    pub load_failures: u64,
    pub evictions: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub list_len: usize,
    pub capacity: usize,
    pub shards: usize,
}

impl CacheMetricsSnapshot {
    /// Fraction of lookups served without the loader; 0.0 before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

impl AddAssign for CacheMetricsSnapshot {
    fn add_assign(&mut self, rhs: Self) {
        self.get_calls += rhs.get_calls;
        self.get_hits += rhs.get_hits;
        self.get_misses += rhs.get_misses;
        self.loads += rhs.loads;
        self.load_failures += rhs.load_failures;
        self.evictions += rhs.evictions;
        self.cache_len += rhs.cache_len;
        self.list_len += rhs.list_len;
        self.capacity += rhs.capacity;
        self.shards += rhs.shards;
    }
}

impl std::iter::Sum for CacheMetricsSnapshot {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, snap| {
            acc += snap;
            acc
        })
    }
}
