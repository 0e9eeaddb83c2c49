use std::cmp::Ordering;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use crate::cache::{Cache, CacheStats};

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A node of the splay tree. Children are owned; there are no parent pointers,
/// restructuring happens top-down through recursive return values.
struct Node<K, V> {
    key: K,
    value: Arc<V>,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: Arc<V>) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// Single right rotation: the left child becomes the subtree root.
/// Returns the subtree unchanged if there is no left child to promote.
fn rotate_right<K, V>(mut root: Box<Node<K, V>>, rotations: &mut u64) -> Box<Node<K, V>> {
    match root.left.take() {
        Some(mut pivot) => {
            root.left = pivot.right.take();
            pivot.right = Some(root);
            *rotations += 1;
            pivot
        }
        None => root,
    }
}

/// Single left rotation, mirror of [`rotate_right`].
fn rotate_left<K, V>(mut root: Box<Node<K, V>>, rotations: &mut u64) -> Box<Node<K, V>> {
    match root.right.take() {
        Some(mut pivot) => {
            root.right = pivot.left.take();
            pivot.left = Some(root);
            *rotations += 1;
            pivot
        }
        None => root,
    }
}

/// Top-down recursive splay. Moves the node holding `key` to the root of the
/// subtree, or the last node visited on the search path when `key` is absent,
/// so that even a miss shortens future searches near `key`.
///
/// Takes the subtree by value and hands back the restructured subtree, so all
/// rewiring is ownership transfer with no aliasing.
fn splay<K: Ord, V>(link: Link<K, V>, key: &K, rotations: &mut u64) -> Link<K, V> {
    let mut root = match link {
        Some(root) => root,
        None => return None,
    };

    match key.cmp(&root.key) {
        Ordering::Equal => Some(root),
        Ordering::Less => {
            let mut left = match root.left.take() {
                Some(left) => left,
                None => return Some(root), // key absent, root is the nearest anchor
            };
            match key.cmp(&left.key) {
                Ordering::Less => {
                    // zig-zig: splay the grandchild, then rotate twice at the top
                    left.left = splay(left.left.take(), key, rotations);
                    root.left = Some(left);
                    root = rotate_right(root, rotations);
                }
                Ordering::Greater => {
                    // zig-zag: splay the inner grandchild and promote it one level
                    left.right = splay(left.right.take(), key, rotations);
                    if left.right.is_some() {
                        left = rotate_left(left, rotations);
                    }
                    root.left = Some(left);
                }
                Ordering::Equal => root.left = Some(left),
            }
            if root.left.is_some() {
                Some(rotate_right(root, rotations))
            } else {
                Some(root)
            }
        }
        Ordering::Greater => {
            let mut right = match root.right.take() {
                Some(right) => right,
                None => return Some(root),
            };
            match key.cmp(&right.key) {
                Ordering::Greater => {
                    // zag-zag
                    right.right = splay(right.right.take(), key, rotations);
                    root.right = Some(right);
                    root = rotate_left(root, rotations);
                }
                Ordering::Less => {
                    // zag-zig
                    right.left = splay(right.left.take(), key, rotations);
                    if right.left.is_some() {
                        right = rotate_right(right, rotations);
                    }
                    root.right = Some(right);
                }
                Ordering::Equal => root.right = Some(right),
            }
            if root.right.is_some() {
                Some(rotate_left(root, rotations))
            } else {
                Some(root)
            }
        }
    }
}

fn in_order<'a, K, V>(link: &'a Link<K, V>, keys: &mut Vec<&'a K>) {
    if let Some(node) = link {
        in_order(&node.left, keys);
        keys.push(&node.key);
        in_order(&node.right, keys);
    }
}

/// The inner data structure for the SplayCache.
struct SplayCacheInner<K: Ord, V> {
    root: Link<K, V>,
    len: u64,
    rotations: u64,
    hits: u64,
    misses: u64,
}

impl<K: Ord, V> SplayCacheInner<K, V> {
    fn new() -> Self {
        SplayCacheInner {
            root: None,
            len: 0,
            rotations: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Splay around `key` and read the root. The tree is restructured whether
    /// or not the key is present.
    fn search(&mut self, key: &K) -> Option<Arc<V>> {
        self.root = splay(self.root.take(), key, &mut self.rotations);
        let result = match &self.root {
            Some(root) if root.key == *key => Some(root.value.clone()),
            _ => None,
        };
        debug_assert!(self.is_ordered());
        if result.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        result
    }

    /// Splay around `key`, then either keep the existing entry (first write
    /// wins) or make a new node the root by splitting the splayed tree.
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.root = splay(self.root.take(), &key, &mut self.rotations);
        let mut root = match self.root.take() {
            Some(root) => root,
            None => {
                self.root = Some(Node::new(key, value));
                self.len += 1;
                return None;
            }
        };
        let result = match key.cmp(&root.key) {
            Ordering::Equal => {
                // A memoized result is never recomputed, so it is never replaced.
                let kept = root.value.clone();
                self.root = Some(root);
                Some(kept)
            }
            Ordering::Less => {
                // The splayed root is the nearest key, so its left subtree holds
                // exactly the keys smaller than the new one. Constant-time split.
                let mut node = Node::new(key, value);
                node.left = root.left.take();
                node.right = Some(root);
                self.root = Some(node);
                self.len += 1;
                None
            }
            Ordering::Greater => {
                let mut node = Node::new(key, value);
                node.right = root.right.take();
                node.left = Some(root);
                self.root = Some(node);
                self.len += 1;
                None
            }
        };
        debug_assert!(self.is_ordered());
        result
    }

    fn keys_in_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len as usize);
        in_order(&self.root, &mut keys);
        keys
    }

    fn is_ordered(&self) -> bool {
        self.keys_in_order().windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// SplayCache is an unbounded cache backed by a splay tree, a self-adjusting
/// binary search tree.
///
/// Every `get` and `set` splays the accessed key to the root, so recently and
/// frequently used keys stay near the top of the tree. No entry is ever
/// evicted, and a duplicate `set` keeps the value already stored, which is the
/// right policy for memoizing a deterministic function: the first computed
/// value for a key is the only correct one. Individual operations can be as
/// deep as the tree, but any sequence of m operations on a tree of up to n
/// keys performs O(m log n) rotations in total.
///
/// All mutability is handled internally with a Mutex, so the cache can be shared between threads. Values are returned as Arcs to allow for shared ownership.
///
/// Example:
/// ```
/// use splaycache::{Cache, SplayCache};
///
/// let cache = SplayCache::<u64, String>::new();
///
/// let original_value = cache.set(1, "value".to_string());
///
/// assert!(original_value.is_none());
///
/// let value = cache.get(&1);
///
/// assert!(value.is_some());
/// assert_eq!(*value.unwrap(), "value".to_string());
/// println!("{:?}", cache.stats());
/// ```
pub struct SplayCache<K: Ord + Clone + Sync + Send, V: Send + Sync> {
    inner: Mutex<SplayCacheInner<K, V>>,
}

impl<K: Ord + Clone + Sync + Send, V: Send + Sync> SplayCache<K, V> {
    /// Create a new, empty SplayCache. There is no capacity: the tree grows
    /// with the number of distinct keys inserted.
    pub fn new() -> Self {
        SplayCache {
            inner: Mutex::new(SplayCacheInner::new()),
        }
    }

    /// Number of entries in the cache.
    pub fn len(&self) -> u64 {
        self.inner.lock().unwrap().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of rotations performed since creation. Useful for checking
    /// the amortized cost of an access sequence without timing it.
    pub fn rotations(&self) -> u64 {
        self.inner.lock().unwrap().rotations
    }

    /// The key currently at the root, if any. After a `get` or `set` of a key
    /// that is present, this is that key.
    pub fn root_key(&self) -> Option<K> {
        let inner = self.inner.lock().unwrap();
        inner.root.as_ref().map(|root| root.key.clone())
    }

    /// All keys in ascending order.
    pub fn keys_in_order(&self) -> Vec<K> {
        let inner = self.inner.lock().unwrap();
        inner.keys_in_order().into_iter().cloned().collect()
    }
}

impl<K: Ord + Clone + Sync + Send, V: Send + Sync> Default for SplayCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Hash + Clone + Sync + Send, V: Send + Sync> Cache<K, V> for SplayCache<K, V> {
    /// Get a value from the cache. The tree is splayed around the key even on
    /// a miss, re-rooting at the nearest visited key.
    fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut inner = self.inner.lock().unwrap();
        inner.search(key)
    }

    /// Set a value in the cache. If the key is already present, the stored
    /// value is kept and returned and the new value is dropped; otherwise the
    /// new entry becomes the root and `None` is returned.
    fn set(&self, key: K, value: V) -> Option<Arc<V>> {
        let mut inner = self.inner.lock().unwrap();
        inner.insert(key, Arc::new(value))
    }

    /// Clear the cache, removing all entries.
    fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.root = None;
        inner.len = 0;
    }

    /// Get the cache statistics. Capacity is always `None`: the cache is unbounded.
    fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            size: inner.len,
            capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splay_cache() {
        let cache = SplayCache::new();
        cache.set(1, 1);
        cache.set(2, 2);
        cache.set(3, 3);
        assert_eq!(cache.get(&1).map(|v| *v), Some(1));
        assert_eq!(cache.get(&2).map(|v| *v), Some(2));
        assert_eq!(cache.get(&3).map(|v| *v), Some(3));
        assert_eq!(cache.get(&4), None);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_accessed_key_becomes_root() {
        let cache = SplayCache::new();
        for k in [5, 1, 4, 2, 3] {
            cache.set(k, k * 10);
            assert_eq!(cache.root_key(), Some(k));
        }
        cache.get(&1);
        assert_eq!(cache.root_key(), Some(1));
        cache.get(&4);
        assert_eq!(cache.root_key(), Some(4));
        // a duplicate set also splays the existing entry to the root
        cache.set(2, 999);
        assert_eq!(cache.root_key(), Some(2));
    }

    #[test]
    fn test_miss_reroots_at_nearest_visited_key() {
        let cache = SplayCache::new();
        cache.set(10, 10);
        cache.set(20, 20);
        cache.set(30, 30);
        assert_eq!(cache.get(&25), None);
        // 25 is absent; the search path ends between 20 and 30
        assert_eq!(cache.root_key(), Some(20));
        assert_eq!(cache.keys_in_order(), vec![10, 20, 30]);
    }

    #[test]
    fn test_no_overwrite_on_duplicate_set() {
        let cache = SplayCache::new();
        assert_eq!(cache.set(7, "first"), None);
        assert_eq!(cache.set(7, "second").map(|v| *v), Some("first"));
        assert_eq!(cache.get(&7).map(|v| *v), Some("first"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_on_empty_tree() {
        let cache = SplayCache::<u64, u64>::new();
        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
        assert_eq!(cache.root_key(), None);
    }

    #[test]
    fn test_keys_stay_sorted_under_mixed_ops() {
        let cache = SplayCache::new();
        let mut state: u64 = 42;
        let mut inserted = Vec::new();
        for _ in 0..500 {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let key = (state >> 33) % 1000;
            cache.set(key, key + 1);
            cache.get(&(key / 2));
            if !inserted.contains(&key) {
                inserted.push(key);
            }
        }
        inserted.sort_unstable();
        assert_eq!(cache.keys_in_order(), inserted);
        for key in &inserted {
            assert_eq!(cache.get(key).map(|v| *v), Some(key + 1));
        }
    }

    #[test]
    fn test_round_trip_descending_insert() {
        let cache = SplayCache::new();
        for k in (0..100u64).rev() {
            cache.set(k, k * 2);
        }
        assert_eq!(cache.len(), 100);
        for k in 0..100u64 {
            assert_eq!(cache.get(&k).map(|v| *v), Some(k * 2));
        }
        assert_eq!(cache.keys_in_order(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_rotation_count_is_amortized_logarithmic() {
        let cache = SplayCache::new();
        let n: u64 = 512;
        for k in 0..n {
            cache.set(k, k);
        }
        let m: u64 = 10_000;
        let mut state: u64 = 7;
        for _ in 0..m {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            cache.get(&((state >> 33) % n));
        }
        // O((m + n) log n) with a generous constant; log2(512) = 9
        let ops = m + n;
        let bound = 20 * ops * 9;
        assert!(
            cache.rotations() < bound,
            "rotations {} exceeded bound {}",
            cache.rotations(),
            bound
        );
    }

    #[test]
    fn test_splay_cache_clear() {
        let cache = SplayCache::new();
        cache.set(1, 1);
        cache.set(2, 2);
        cache.clear();
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_splay_cache_stats() {
        let cache = SplayCache::new();
        cache.set(1, 1);
        cache.set(2, 2);
        cache.get(&1);
        cache.get(&3);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, None);
    }
}
