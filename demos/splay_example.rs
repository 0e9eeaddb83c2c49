use splaycache::{memoized_fib, Cache, SplayCache};

fn main() {
    let cache = SplayCache::new();
    println!("{}", memoized_fib(10, &cache));
    println!("{:?}", cache.stats());
    println!("{}", memoized_fib(10, &cache));
    println!("{:?}", cache.stats());
    println!("{}", memoized_fib(20, &cache));
    println!("{:?}", cache.stats());

    // the last touched key sits at the root
    println!("root: {:?}", cache.root_key());
    println!("rotations so far: {}", cache.rotations());
    println!("keys: {:?}", cache.keys_in_order());
}
