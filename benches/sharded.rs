use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shardcache::prelude::*;

fn source(key: &str) -> Result<String, LoadError> {
    Ok(format!("v-{key}"))
}

fn key_stream(universe: usize, len: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| format!("user:{}", rng.gen_range(0..universe)))
        .collect()
}

fn bench_get_hits(c: &mut Criterion) {
    let cache = ShardedCache::new(source);
    let keys = key_stream(500, 4096, 1);
    for key in &keys {
        let _ = cache.get(key);
    }

    c.bench_function("sharded_get_hits", |b| {
        b.iter(|| {
            for key in &keys {
                let _ = black_box(cache.get(black_box(key)));
            }
        })
    });
}

fn bench_get_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharded_get_mixed");
    for strategy in [ShardStrategy::ByteSum, ShardStrategy::Seeded { seed: 42 }] {
        let keys = key_stream(20_000, 4096, 2);
        let cache = CacheBuilder::new(64)
            .strategy(strategy)
            .try_build(source)
            .unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{strategy:?}")),
            &keys,
            |b, keys| {
                b.iter(|| {
                    for key in keys {
                        let _ = black_box(cache.get(key));
                    }
                })
            },
        );
    }
    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharded_contended");
    for threads in [1usize, 4, 8] {
        let cache = ShardedCache::new(source);
        let streams: Vec<Vec<String>> = (0..threads)
            .map(|t| key_stream(2_000, 1024, t as u64))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(threads), &streams, |b, streams| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let start = Instant::now();
                    thread::scope(|scope| {
                        for stream in streams {
                            let cache = &cache;
                            scope.spawn(move || {
                                for key in stream {
                                    let _ = black_box(cache.get(key));
                                }
                            });
                        }
                    });
                    total += start.elapsed();
                }
                total
            })
        });
    }
    group.finish();
}

fn bench_size(c: &mut Criterion) {
    let cache = ShardedCache::new(source);
    for key in key_stream(5_000, 5_000, 3) {
        let _ = cache.get(&key);
    }
    c.bench_function("sharded_size", |b| b.iter(|| black_box(cache.size())));
}

criterion_group!(
    benches,
    bench_get_hits,
    bench_get_mixed,
    bench_contended,
    bench_size
);
criterion_main!(benches);
