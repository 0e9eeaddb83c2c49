use splaycache::{memoized_fib, naive_fib, Cache, LRUCache, SplayCache};
use std::time::{Duration, Instant};

fn mean_time<F: FnMut() -> u128>(runs: u32, mut f: F) -> Duration {
    let start = Instant::now();
    for _ in 0..runs {
        std::hint::black_box(f());
    }
    start.elapsed() / runs
}

fn main() {
    let n = 35;

    // Measure naive Fibonacci time
    let start = Instant::now();
    let result_naive = naive_fib(n);
    let duration_naive = start.elapsed();
    println!(
        "Naive Fibonacci({}) = {} (Time: {:?})",
        n, result_naive, duration_naive
    );

    // Measure splay cached Fibonacci time
    let cache = SplayCache::new();
    let start = Instant::now();
    let result_cached = memoized_fib(n, &cache);
    let duration_cached = start.elapsed();
    println!(
        "Splay Cached Fibonacci({}) = {} (Time: {:?})",
        n, result_cached, duration_cached
    );

    assert_eq!(result_naive, result_cached);

    let speedup = duration_naive.as_secs_f64() / duration_cached.as_secs_f64();
    println!("Speedup: {:.2}x", speedup);
    println!("Splay Cache Stats: {:?}", cache.stats());
    println!("Rotations: {}", cache.rotations());

    // Sweep n and compare the two caches, fresh cache per trial
    let runs = 10;
    println!();
    println!("{:>5} {:>18} {:>18}", "n", "LRU mean (s)", "Splay mean (s)");
    for n in (0..=180u64).step_by(10) {
        let lru_mean = mean_time(runs, || {
            let cache = LRUCache::new(1000);
            memoized_fib(n, &cache)
        });
        let splay_mean = mean_time(runs, || {
            let cache = SplayCache::new();
            memoized_fib(n, &cache)
        });
        println!(
            "{:>5} {:>18.9} {:>18.9}",
            n,
            lru_mean.as_secs_f64(),
            splay_mean.as_secs_f64()
        );
    }
}
