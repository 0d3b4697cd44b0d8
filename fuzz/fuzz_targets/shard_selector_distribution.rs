#![no_main]

use libfuzzer_sys::fuzz_target;
use shardcache::ds::{ShardSelector, ShardStrategy};

// Fuzz key routing
//
// Every key must land in [0, shards), byte-sum routing must equal the byte
// sum mod shards, and both strategies must be deterministic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let shard_count = (data[0] as usize % 32) + 1;
    let seed = u64::from(data[1]);
    let key = String::from_utf8_lossy(&data[2..]);

    let byte_sum = ShardSelector::new(shard_count, ShardStrategy::ByteSum);
    let seeded = ShardSelector::new(shard_count, ShardStrategy::Seeded { seed });

    let expected = key.bytes().map(usize::from).sum::<usize>() % shard_count;
    assert_eq!(byte_sum.shard_for_key(&key), expected);

    let shard = seeded.shard_for_key(&key);
    assert!(shard < shard_count);
    assert_eq!(seeded.shard_for_key(&key), shard);

    // Byte sums ignore order, so a reversed key routes to the same shard.
    let reversed: String = key.chars().rev().collect();
    assert_eq!(byte_sum.shard_for_key(&reversed), expected);

    let mut counts = vec![0usize; shard_count];
    for window in data[2..].windows(2) {
        let k = String::from_utf8_lossy(window);
        counts[byte_sum.shard_for_key(&k)] += 1;
    }
    assert_eq!(counts.iter().sum::<usize>(), data.len().saturating_sub(3));
});
