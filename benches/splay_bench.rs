use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use splaycache::{Cache, SplayCache};

fn bench_splay_cache(c: &mut Criterion) {
    c.bench_function("splay_set_1k_ascending", |b| {
        b.iter(|| {
            let cache = SplayCache::new();
            for i in 0..1000u64 {
                cache.set(i, black_box(i + 1));
            }
        })
    });

    c.bench_function("splay_get_hot_keys", |b| {
        let cache = SplayCache::new();
        for i in 0..1000u64 {
            cache.set(i, i + 1);
        }
        // repeated re-access of a small working set, the splay tree's best case
        b.iter(|| {
            for i in 490..510u64 {
                black_box(cache.get(&i));
            }
        })
    });

    c.bench_function("splay_get_random_1k", |b| {
        let cache = SplayCache::new();
        for i in 0..1000u64 {
            cache.set(i, i + 1);
        }
        let mut rng = rand::rng();
        b.iter(|| {
            for _ in 0..1000 {
                let key = rng.random_range(0..1000u64);
                black_box(cache.get(&key));
            }
        })
    });

    c.bench_function("splay_miss_heavy", |b| {
        let cache = SplayCache::new();
        for i in (0..2000u64).step_by(2) {
            cache.set(i, i);
        }
        // every odd key misses but still re-roots the tree
        b.iter(|| {
            for i in (1..2000u64).step_by(2) {
                black_box(cache.get(&i));
            }
        })
    });
}

criterion_group!(benches, bench_splay_cache);
criterion_main!(benches);
