#![no_main]

use libfuzzer_sys::fuzz_target;
use shardcache::policy::lru::LruCore;

// Fuzz arbitrary operation sequences on LruCore
//
// First byte picks the capacity; remaining byte pairs drive get, peek,
// insert and pop_lru. Index/list consistency and the capacity bound are
// checked after every step.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = cap as usize % 16;
    let mut core: LruCore<u8, u32> = LruCore::new(capacity);

    for pair in ops.chunks_exact(2) {
        let key = pair[1] % 32;

        match pair[0] % 5 {
            0 => {
                if core.get(&key).is_some() {
                    assert_eq!(core.recency_rank(&key), Some(0));
                }
            },
            1 => {
                let before: Vec<u8> = core.keys().copied().collect();
                let _ = core.peek(&key);
                assert!(core.keys().copied().eq(before));
            },
            2 | 3 => {
                let was_full = core.len() == capacity && !core.contains(&key);
                let evicted = core.insert(key, u32::from(pair[0]));

                if capacity == 0 {
                    assert_eq!(evicted.map(|(k, _)| k), Some(key));
                    assert!(core.is_empty());
                } else {
                    assert_eq!(evicted.is_some(), was_full);
                    assert_eq!(core.recency_rank(&key), Some(0));
                }
            },
            4 => {
                let tail = core.peek_lru().map(|(k, _)| *k);
                assert_eq!(core.pop_lru().map(|(k, _)| k), tail);
            },
            _ => unreachable!(),
        }

        assert!(core.check_invariants().is_ok());
        assert!(core.len() <= capacity);
    }
});
