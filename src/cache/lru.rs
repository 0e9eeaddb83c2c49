use linked_hash_map::LinkedHashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use crate::cache::{Cache, CacheStats};

/// The inner data structure for the LRUCache.
struct LRUCacheInner<K: Eq + Hash + Clone + Sync + Send, V: Send + Sync> {
    capacity: u64,
    key_value_map: LinkedHashMap<K, Arc<V>>,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash + Clone + Sync + Send, V: Send + Sync> LRUCacheInner<K, V> {
    /// Create a new LRUCacheInner with the given capacity, internally capacity is reserved for the necessary data structures.
    fn new(capacity: u64) -> Self {
        LRUCacheInner {
            capacity,
            key_value_map: LinkedHashMap::with_capacity(capacity as usize),
            hits: 0,
            misses: 0,
        }
    }
}

/// LRUCache is a cache that uses the Least Recently Used (LRU) algorithm to evict items.
///
/// When the cache is full, the item whose last access is oldest is removed to make space for the
/// new item. Unlike [`SplayCache`](crate::SplayCache), a `set` on an existing key overwrites the
/// stored value. This is the bounded reference cache the memoized Fibonacci driver is compared
/// against.
///
/// All mutability is handled internally with a Mutex, so the cache can be shared between threads. Values are returned as Arcs to allow for shared ownership.
///
/// Example:
/// ```
/// use splaycache::{Cache, LRUCache};
///
/// let cache = LRUCache::<&str, String>::new(10);
///
/// let original_value = cache.set("key", "value".to_string());
///
/// assert!(original_value.is_none());
///
/// let value = cache.get(&"key");
///
/// assert!(value.is_some());
/// assert_eq!(*value.unwrap(), "value".to_string());
/// println!("{:?}", cache.stats());
/// ```
pub struct LRUCache<K: Eq + Hash + Clone + Sync + Send, V: Send + Sync> {
    inner: Mutex<LRUCacheInner<K, V>>,
}

impl<K: Eq + Hash + Clone + Sync + Send, V: Send + Sync> LRUCache<K, V> {
    /// Create a new LRUCache with the given capacity. Capacity is fixed for the
    /// lifetime of the cache and is its only configuration.
    pub fn new(capacity: u64) -> Self {
        LRUCache {
            inner: Mutex::new(LRUCacheInner::new(capacity)),
        }
    }
}

impl<K: Ord + Hash + Clone + Sync + Send, V: Send + Sync> Cache<K, V> for LRUCache<K, V> {
    /// Get a value from the cache. A hit refreshes the entry's recency.
    fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut inner = self.inner.lock().unwrap();
        let result = inner.key_value_map.get_refresh(key).cloned();

        if result.is_some() {
            inner.hits += 1;
        } else {
            inner.misses += 1;
        }
        result
    }

    /// Set a value in the cache, evicting the least recently used entry if the
    /// cache is at capacity. Returns the replaced value if the key was present.
    fn set(&self, key: K, value: V) -> Option<Arc<V>> {
        let mut inner = self.inner.lock().unwrap();
        let arc_value = Arc::new(value);

        let previous = inner.key_value_map.insert(key, arc_value);
        if previous.is_none() && inner.key_value_map.len() as u64 > inner.capacity {
            inner.key_value_map.pop_front();
        }
        previous
    }

    /// Clear the cache, removing all items.
    fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.key_value_map.clear();
    }

    /// Get the cache statistics.
    fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            size: inner.key_value_map.len() as u64,
            capacity: Some(inner.capacity),
        }
    }
}
