use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter readable without the shard lock.
///
/// Counters are observational; `Relaxed` ordering is enough because no
/// other memory is published through them.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}
