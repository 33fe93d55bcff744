//! # Cache Trait Hierarchy
//!
//! This module defines the trait hierarchy for the cache subsystem, providing
//! a unified interface over the two eviction policies (LRU, LFU) while
//! keeping policy-specific operations on policy-specific traits.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌─────────────────────────────────────────┐
//!                  │            CoreCache<K, V>              │
//!                  │                                         │
//!                  │  put(&mut, K, V) → bool                 │
//!                  │  get(&mut, &K) → Option<&V>             │
//!                  │  contains(&, &K) → bool                 │
//!                  │  len(&) → usize                         │
//!                  │  is_empty(&) → bool                     │
//!                  │  capacity(&) → usize                    │
//!                  │  clear(&mut)                            │
//!                  └──────────────────┬──────────────────────┘
//!                                     │
//!                                     ▼
//!                  ┌─────────────────────────────────────────┐
//!                  │           MutableCache<K, V>            │
//!                  │                                         │
//!                  │  remove(&K) → Option<V>                 │
//!                  │  remove_batch(&[K])                     │
//!                  └──────────────────┬──────────────────────┘
//!                                     │
//!                ┌────────────────────┴────────────────────┐
//!                ▼                                         ▼
//!   ┌────────────────────────────┐          ┌────────────────────────────┐
//!   │   LruCacheTrait<K, V>      │          │   LfuCacheTrait<K, V>      │
//!   │                            │          │                            │
//!   │  pop_lru() → (K, V)        │          │  pop_lfu() → (K, V)        │
//!   │  peek_lru() → (&K, &V)     │          │  peek_lfu() → (&K, &V)     │
//!   │  touch(&K) → bool          │          │  frequency(&K) → u64       │
//!   │  recency_rank(&K) → usize  │          │  min_frequency() → u64     │
//!   └────────────────────────────┘          └────────────────────────────┘
//! ```
//!
//! ## The `put` contract
//!
//! `put` reports whether a **new** entry was stored: `true` means the key
//! was absent and now occupies a capacity slot (possibly after an
//! eviction); `false` means the key was already present and the call acted
//! as an access. What happens to the stored value on that access is
//! policy-defined: the LFU cache replaces it, the LRU cache keeps the
//! original. Both treat the call as a touch for eviction ordering.
//!
//! ## Policy Comparison
//!
//! | Policy | Eviction Basis                | Tie-break            |
//! |--------|-------------------------------|----------------------|
//! | LRU    | Last access time              | —                    |
//! | LFU    | Access count                  | Least recently used  |
//!
//! ## Thread Safety
//!
//! Core implementations take `&mut self` and are single-threaded. The
//! [`ConcurrentCache`] marker is implemented by lock-based wrappers
//! (`ConcurrentLruCache`, `ConcurrentLfuCache`) behind the `concurrency`
//! feature.

/// Operations every cache supports regardless of eviction policy.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachecore::traits::CoreCache;
/// use cachecore::policy::lru::LruCore;
///
/// fn warm<C: CoreCache<u64, Arc<&'static str>>>(cache: &mut C) {
///     cache.put(1, Arc::new("one"));
///     cache.put(2, Arc::new("two"));
/// }
///
/// let mut cache = LruCore::new(10);
/// warm(&mut cache);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Stores a key-value pair, returning `true` iff a new entry was
    /// created.
    ///
    /// When the cache is full, storing a new key evicts one entry first
    /// according to the policy. When the key is already present the call
    /// returns `false` and counts as an access; see the module docs for
    /// the per-policy value semantics.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use cachecore::traits::CoreCache;
    /// use cachecore::policy::lru::LruCore;
    ///
    /// let mut cache = LruCore::new(10);
    /// assert!(cache.put(1, Arc::new("first")));
    /// assert!(!cache.put(1, Arc::new("again")));
    /// ```
    fn put(&mut self, key: K, value: V) -> bool;

    /// Gets a reference to a value by key.
    ///
    /// A hit updates the policy's access state (recency order or access
    /// count). Use [`contains`](Self::contains) to check existence without
    /// affecting eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use cachecore::traits::CoreCache;
    /// use cachecore::policy::lru::LruCore;
    ///
    /// let mut cache = LruCore::new(10);
    /// cache.put(1, Arc::new("value"));
    ///
    /// assert_eq!(cache.get(&1).map(|v| **v), Some("value"));
    /// assert!(cache.get(&99).is_none());
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries and resets policy state.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// Removal is idempotent: removing an absent key returns `None` and leaves
/// the cache unchanged.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachecore::traits::{CoreCache, MutableCache};
/// use cachecore::policy::lru::LruCore;
///
/// fn invalidate<C: MutableCache<u64, Arc<String>>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LruCore::new(100);
/// cache.put(1, Arc::new("one".to_string()));
/// cache.put(2, Arc::new("two".to_string()));
///
/// invalidate(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value, or `None` if the key was absent.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use cachecore::traits::{CoreCache, MutableCache};
    /// use cachecore::policy::lru::LruCore;
    ///
    /// let mut cache = LruCore::new(10);
    /// cache.put(1, Arc::new("value"));
    ///
    /// assert!(cache.remove(&1).is_some());
    /// assert_eq!(cache.remove(&1), None);
    /// ```
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning the removed values in input order.
    ///
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-cache operations.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachecore::traits::{CoreCache, LruCacheTrait};
/// use cachecore::policy::lru::LruCore;
///
/// let mut cache = LruCore::new(10);
/// cache.put(1, Arc::new("first"));
/// cache.put(2, Arc::new("second"));
///
/// // Key 1 is least recently used until touched.
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
/// assert!(cache.touch(&1));
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry, or `None` if
    /// empty.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or updating recency.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as most recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found.
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent).
    ///
    /// O(n) walk of the recency list; intended for diagnostics and tests,
    /// not hot paths.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use cachecore::traits::{CoreCache, LruCacheTrait};
    /// use cachecore::policy::lru::LruCore;
    ///
    /// let mut cache = LruCore::new(10);
    /// cache.put(1, Arc::new("first"));
    /// cache.put(2, Arc::new("second"));
    /// cache.put(3, Arc::new("third"));
    ///
    /// assert_eq!(cache.recency_rank(&3), Some(0));
    /// assert_eq!(cache.recency_rank(&1), Some(2));
    /// assert_eq!(cache.recency_rank(&99), None);
    /// ```
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Frequency-cache operations.
///
/// Eviction targets the lowest access count; among entries sharing that
/// count, the least recently touched one goes first.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachecore::traits::{CoreCache, LfuCacheTrait};
/// use cachecore::policy::lfu::LfuCache;
///
/// let mut cache: LfuCache<u64, &str> = LfuCache::new(3);
/// cache.put(1, Arc::new("first"));
/// cache.put(2, Arc::new("second"));
/// cache.get(&1);
///
/// // 1 insert + 1 get
/// assert_eq!(cache.frequency(&1), Some(2));
/// assert_eq!(cache.frequency(&2), Some(1));
///
/// let (key, _) = cache.pop_lfu().unwrap();
/// assert_eq!(key, 2);
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least frequently used entry, breaking count
    /// ties by least recent touch. Returns `None` if empty.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Peeks at the eviction candidate without removing it or incrementing
    /// its count.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Gets the access count for a key, or `None` if absent.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Returns the lowest access count currently present, or `None` when
    /// the cache is empty.
    fn min_frequency(&self) -> Option<u64>;
}

/// Marker trait for thread-safe cache implementations.
///
/// Implemented by the lock-based wrappers; bound it alongside the
/// operational traits when an API requires sharing across threads.
pub trait ConcurrentCache: Send + Sync {}
