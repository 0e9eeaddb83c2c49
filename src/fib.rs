use crate::cache::Cache;

/// Fibonacci memoized through any [`Cache`] implementation.
///
/// The cache is consulted before recursing; the result is stored only after
/// both recursive calls return, and only when the lookup missed. With the
/// no-overwrite [`SplayCache`](crate::SplayCache) this means each value is
/// computed and stored exactly once.
///
/// Values are `u128`, which holds fib(n) up to n = 186. Past that the addition
/// overflows; keeping n in range is the caller's responsibility.
///
/// Example:
/// ```
/// use splaycache::{memoized_fib, SplayCache};
///
/// let cache = SplayCache::new();
/// assert_eq!(memoized_fib(10, &cache), 55);
/// assert_eq!(cache.len(), 9); // entries for 2..=10
/// ```
pub fn memoized_fib<C>(n: u64, cache: &C) -> u128
where
    C: Cache<u64, u128> + ?Sized,
{
    if n <= 1 {
        return u128::from(n);
    }
    if let Some(v) = cache.get(&n) {
        return *v;
    }
    let result = memoized_fib(n - 1, cache) + memoized_fib(n - 2, cache);
    cache.set(n, result);
    result
}

/// Fibonacci without caching (naive recursion). Exponential; only useful as a
/// correctness reference and a timing baseline for small n.
pub fn naive_fib(n: u64) -> u128 {
    if n <= 1 {
        return u128::from(n);
    }
    naive_fib(n - 1) + naive_fib(n - 2)
}
