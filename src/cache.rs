use std::hash::Hash;
use std::sync::Arc;

/// CacheStats contains cache statistics
///
/// `capacity` is `None` for unbounded caches.
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: u64,
    pub capacity: Option<u64>,
}

/// Cache trait defines the methods that a cache should implement and provides a shared interface for different cache implementations
///
/// The cache trait is useful for defining generic functions that can work with any cache implementation,
/// such as a memoized function that is agnostic to which cache backs it.
///
/// Keys must be totally ordered (`Ord`) because the splay cache is a binary search tree, and hashable
/// (`Hash`) because the LRU cache is map backed.
///
/// Note the differing `set` policies: [`SplayCache`](crate::SplayCache) never overwrites an existing
/// key and returns the retained value on a duplicate, while [`LRUCache`](crate::LRUCache) overwrites
/// and returns the replaced value.
///
/// Example:
/// ```
/// use splaycache::{Cache, LRUCache, SplayCache};
///
/// fn do_something<C>(cache: C)
/// where
///     C: Cache<u64, String>,
/// {
///     cache.set(1, "one".to_string());
///     if let Some(val) = cache.get(&1) {
///         println!("Got: {}", val);
///     }
/// }
///
/// fn main() {
///     let splay_cache = SplayCache::<u64, String>::new();
///     do_something(splay_cache);
///
///     let lru_cache = LRUCache::<u64, String>::new(2);
///     do_something(lru_cache);
/// }
/// ```
pub trait Cache<K: Ord + Hash + Clone + Send + Sync, V: Send + Sync>: Send + Sync {
    fn get(&self, key: &K) -> Option<Arc<V>>;
    fn set(&self, key: K, value: V) -> Option<Arc<V>>;
    fn clear(&self);
    fn stats(&self) -> CacheStats;
}

pub mod lru;
pub mod splay;
