pub mod cache;
pub mod fib;
pub use crate::cache::lru::LRUCache;
pub use crate::cache::splay::SplayCache;
pub use crate::cache::{Cache, CacheStats};
pub use crate::fib::{memoized_fib, naive_fib};
