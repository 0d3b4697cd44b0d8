// ==============================================
// LOAD-THROUGH CACHE BEHAVIOR (integration)
// ==============================================
//
// Hit accounting, capacity bounds, eviction order, index/list consistency
// and failure isolation, exercised through the public ShardedCache API.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use shardcache::prelude::*;

/// Mock database: answers `"v-" + key`, fails for keys in `broken`, and
/// records every key it was asked for.
#[derive(Default)]
struct MockDb {
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
    broken: Mutex<HashSet<String>>,
}

impl MockDb {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn break_key(&self, key: &str) {
        self.broken.lock().insert(key.to_string());
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

impl Loader for MockDb {
    fn load(&self, key: &str) -> Result<String, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(key.to_string());
        if self.broken.lock().contains(key) {
            return Err(LoadError::unavailable(format!("no route to {key}")));
        }
        Ok(format!("v-{key}"))
    }
}

fn single_shard(capacity: usize) -> ShardedCache<MockDb> {
    CacheBuilder::new(capacity)
        .shards(1)
        .try_build(MockDb::default())
        .unwrap()
}

// ==============================================
// Walkthrough
// ==============================================

mod walkthrough {
    use super::*;

    #[test]
    fn capacity_two_single_shard_sequence() {
        let cache = single_shard(2);

        assert_eq!(cache.get("a").unwrap(), "v-a");
        assert_eq!(cache.get("b").unwrap(), "v-b");
        assert_eq!(cache.loader().calls(), 2);

        // hit: no loader call, "a" moves to the front
        assert_eq!(cache.get("a").unwrap(), "v-a");
        assert_eq!(cache.loader().calls(), 2);

        // "b" is now least recently used
        assert_eq!(cache.get("c").unwrap(), "v-c");
        assert!(!cache.contains("b"));
        assert_eq!(cache.keys_by_recency(0).unwrap(), vec!["c", "a"]);

        // "b" misses again and pushes out "a"
        assert_eq!(cache.get("b").unwrap(), "v-b");
        assert_eq!(cache.loader().calls(), 4);
        assert_eq!(cache.keys_by_recency(0).unwrap(), vec!["b", "c"]);
        assert_eq!(cache.loader().requested(), vec!["a", "b", "c", "b"]);
        assert_eq!(cache.size(), (2, 2));
    }
}

// ==============================================
// Hit correctness
// ==============================================

mod hits {
    use super::*;

    #[test]
    fn cached_keys_are_served_without_loading() {
        let cache = ShardedCache::new(MockDb::default());
        let keys: Vec<String> = (0..50).map(|i| format!("key-{i}")).collect();

        for key in &keys {
            assert_eq!(cache.get(key).unwrap(), format!("v-{key}"));
        }
        let after_fill = cache.loader().calls();
        assert_eq!(after_fill, keys.len());

        for key in keys.iter().rev() {
            assert_eq!(cache.get(key).unwrap(), format!("v-{key}"));
        }
        assert_eq!(cache.loader().calls(), after_fill);
    }

    #[test]
    fn evicted_key_is_loaded_again() {
        let cache = single_shard(1);
        cache.get("a").unwrap();
        cache.get("b").unwrap();
        cache.get("a").unwrap();
        assert_eq!(cache.loader().calls(), 3);
    }
}

// ==============================================
// Capacity bound
// ==============================================

mod capacity {
    use super::*;

    #[test]
    fn no_shard_ever_exceeds_its_capacity() {
        let cache = CacheBuilder::new(3)
            .shards(5)
            .try_build(MockDb::default())
            .unwrap();

        for i in 0..500 {
            let key = format!("k{}", (i * 7) % 97);
            cache.get(&key).unwrap();

            let shard = cache.shard_of(&key);
            let held = cache.keys_by_recency(shard).unwrap().len();
            assert!(held <= cache.shard_capacity(shard).unwrap());
        }
        let (entries, nodes) = cache.size();
        assert_eq!(entries, nodes);
        assert!(entries <= cache.total_capacity());
    }

    #[test]
    fn per_shard_mode_total_is_capacity_times_shards() {
        let cache = CacheBuilder::new(4)
            .shards(3)
            .try_build(MockDb::default())
            .unwrap();
        assert_eq!(cache.total_capacity(), 12);
    }

    #[test]
    fn zero_capacity_and_zero_shards_fail_at_construction() {
        assert!(CacheBuilder::new(0).try_build(MockDb::default()).is_err());
        assert!(CacheBuilder::new(1)
            .shards(0)
            .try_build(MockDb::default())
            .is_err());
    }
}

// ==============================================
// LRU eviction order
// ==============================================

mod eviction_order {
    use super::*;

    #[test]
    fn insertion_order_evicts_oldest() {
        let cache = single_shard(2);
        for key in ["A", "B", "C"] {
            cache.get(key).unwrap();
        }
        assert!(!cache.contains("A"));
        assert!(cache.contains("B"));
        assert!(cache.contains("C"));
    }

    #[test]
    fn reaccess_protects_key_from_eviction() {
        let cache = single_shard(2);
        for key in ["A", "B", "A", "C"] {
            cache.get(key).unwrap();
        }
        assert!(cache.contains("A"));
        assert!(!cache.contains("B"));
        assert!(cache.contains("C"));
    }

    #[test]
    fn peek_does_not_protect_key() {
        let cache = single_shard(2);
        cache.get("A").unwrap();
        cache.get("B").unwrap();
        assert_eq!(cache.peek("A").as_deref(), Some("v-A"));
        cache.get("C").unwrap();
        assert!(!cache.contains("A"));
    }
}

// ==============================================
// Index / list consistency
// ==============================================

mod consistency {
    use super::*;

    #[test]
    fn index_and_list_agree_after_every_call() {
        let cache = CacheBuilder::new(4)
            .shards(3)
            .try_build(MockDb::default())
            .unwrap();
        cache.loader().break_key("k5");

        for i in 0..300 {
            let key = format!("k{}", (i * 13) % 23);
            let _ = cache.get(&key);
            cache.check_invariants().unwrap();

            let (entries, nodes) = cache.size();
            assert_eq!(entries, nodes);
        }
    }

    #[test]
    fn seeded_routing_keeps_same_guarantees() {
        let cache = CacheBuilder::new(2)
            .shards(4)
            .strategy(ShardStrategy::Seeded { seed: 7 })
            .try_build(MockDb::default())
            .unwrap();
        for i in 0..100 {
            cache.get(&format!("user:{i}")).unwrap();
            cache.check_invariants().unwrap();
        }
        assert!(cache.size().0 <= 8);
    }
}

// ==============================================
// Failure isolation
// ==============================================

mod failure_isolation {
    use super::*;

    #[test]
    fn failed_load_preserves_entries_and_recency() {
        let cache = single_shard(3);
        cache.loader().break_key("x");
        for key in ["a", "b", "c", "a"] {
            cache.get(key).unwrap();
        }
        let before = cache.keys_by_recency(0).unwrap();
        let size_before = cache.size();

        let err = cache.get("x").unwrap_err();
        assert_eq!(err.key(), "x");
        assert!(matches!(err.load_error(), Some(LoadError::Unavailable { .. })));

        assert_eq!(cache.keys_by_recency(0).unwrap(), before);
        assert_eq!(cache.size(), size_before);
        assert!(!cache.contains("x"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn failed_load_on_full_shard_does_not_evict() {
        let cache = single_shard(2);
        cache.loader().break_key("x");
        cache.get("a").unwrap();
        cache.get("b").unwrap();

        assert!(cache.get("x").is_err());
        assert!(cache.contains("a"));
        assert!(cache.contains("b"));
    }

    #[test]
    fn failure_is_not_cached() {
        let cache = single_shard(2);
        cache.loader().break_key("x");
        assert!(cache.get("x").is_err());
        assert!(cache.get("x").is_err());
        assert_eq!(cache.loader().calls(), 2);
    }
}

// ==============================================
// Metrics
// ==============================================

#[cfg(feature = "metrics")]
mod metrics {
    use super::*;

    #[test]
    fn exported_text_reflects_lookups() {
        let cache = single_shard(1);
        cache.loader().break_key("bad");
        cache.get("a").unwrap();
        cache.get("a").unwrap();
        cache.get("b").unwrap();
        let _ = cache.get("bad");

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.get_calls, 4);
        assert_eq!(snapshot.get_hits, 1);
        assert_eq!(snapshot.load_failures, 1);
        assert_eq!(snapshot.evictions, 1);

        let exporter = PrometheusTextExporter::new("db_cache", Vec::new());
        exporter.export(&snapshot);
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("db_cache_load_failures_total 1\n"));
        assert!(text.contains("db_cache_cache_len 1\n"));
    }
}
