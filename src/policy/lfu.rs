//! # Least Frequently Used (LFU) Cache Implementation
//!
//! Frequency-based bounded cache: every entry carries an access count
//! (1 at insert, +1 per access), and eviction removes the entry with the
//! lowest count, breaking ties by least recent touch within that count.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                       LfuCache<K, V>                         │
//!   │                                                              │
//!   │   values: FxHashMap<K, Arc<V>>       (ownership of values)   │
//!   │   freq:   FrequencyBuckets<K>        (eviction metadata)     │
//!   │                                                              │
//!   │   min_count = 1                                              │
//!   │        │                                                     │
//!   │        ▼                                                     │
//!   │   count=1: head ──► [c] ◄──► [b] ◄── tail (evict "b" first)  │
//!   │   count=3: head ──► [a] ◄── tail                             │
//!   │                                                              │
//!   │   bucket chain ascending: 1 ◄──► 3                           │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All bucket maintenance is O(1): a touch moves a key to the adjacent
//! `count + 1` bucket, and the cached minimum makes eviction a tail pop.
//! See [`FrequencyBuckets`] for the mechanics.
//!
//! ## Existing-Key `put`
//!
//! `put` on a present key **replaces** the stored value and counts as an
//! access (the count increments exactly as for `get`). This is the
//! opposite of the recency cache, which keeps the old value; both
//! behaviors are deliberate and documented on [`CoreCache::put`].
//!
//! ## Capacity
//!
//! A frequency cache with capacity 0 is meaningless (nothing could ever
//! be retained, yet the structure must maintain a minimum bucket), so
//! construction rejects it: [`LfuCache::try_new`] returns a
//! [`ConfigError`] and [`LfuCache::new`] panics.
//!
//! ## Thread Safety
//!
//! - `LfuCache`: **not** thread-safe, `&mut self` throughout
//! - `ConcurrentLfuCache`: thread-safe via `parking_lot::RwLock`; `get`
//!   takes the write lock because a hit increments the count

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

/// Single-threaded LFU core: value map + frequency-bucket tracker.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachecore::policy::lfu::LfuCache;
/// use cachecore::traits::{CoreCache, LfuCacheTrait};
///
/// let mut cache: LfuCache<u32, &str> = LfuCache::new(2);
/// cache.put(1, Arc::new("one"));
/// cache.put(2, Arc::new("two"));
/// cache.get(&1); // count(1)=2, count(2)=1
///
/// cache.put(3, Arc::new("three")); // evicts 2
/// assert!(cache.contains(&1));
/// assert!(!cache.contains(&2));
/// assert_eq!(cache.frequency(&3), Some(1));
/// ```
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    values: FxHashMap<K, Arc<V>>,
    freq: FrequencyBuckets<K>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new LFU cache, validating the capacity.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `capacity` is 0: a frequency cache
    /// has no degenerate no-storage mode.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lfu::LfuCache;
    ///
    /// assert!(LfuCache::<u32, String>::try_new(16).is_ok());
    /// assert!(LfuCache::<u32, String>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("lfu capacity must be greater than 0"));
        }
        Ok(LfuCache {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            freq: FrequencyBuckets::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        })
    }

    /// Creates a new LFU cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Use [`try_new`](Self::try_new) to
    /// validate user-supplied capacities.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checks structural invariants, returning a description of the first
    /// violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.values.len() != self.freq.len() {
            return Err(InvariantError::new(format!(
                "value map holds {} entries, frequency tracker {}",
                self.values.len(),
                self.freq.len()
            )));
        }
        if self.values.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.values.len(),
                self.capacity
            )));
        }
        if !self.values.is_empty() && self.freq.min_freq().is_none() {
            return Err(InvariantError::new(
                "non-empty cache has no minimum frequency",
            ));
        }
        for key in self.values.keys() {
            match self.freq.frequency(key) {
                Some(count) if count >= 1 => {}
                Some(count) => {
                    return Err(InvariantError::new(format!(
                        "tracked count {count} below 1"
                    )));
                }
                None => {
                    return Err(InvariantError::new("stored key missing from tracker"));
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn debug_check(&self) {
        #[cfg(debug_assertions)]
        {
            if let Err(err) = self.check_invariants() {
                panic!("lfu invariant violated: {err}");
            }
            self.freq.debug_validate_invariants();
        }
    }
}

impl<K, V> CoreCache<K, Arc<V>> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Stores `key`; returns `true` iff a new entry was created.
    ///
    /// Present key: the stored value is replaced and the access count
    /// increments (an updating `put` is an access). New key at capacity:
    /// the current minimum-count victim is evicted first, then the key
    /// starts at count 1.
    #[inline]
    fn put(&mut self, key: K, value: Arc<V>) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_put_call();

        if let Some(slot) = self.values.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();

            *slot = value;
            self.freq.touch(&key);
            self.debug_check();
            return false;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        if self.values.len() >= self.capacity
            && let Some((victim, _)) = self.freq.pop_min()
        {
            self.values.remove(&victim);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        self.freq.insert(key.clone());
        self.values.insert(key, value);

        self.debug_check();
        true
    }

    /// Lookup that increments the access count on a hit.
    #[inline]
    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        if self.freq.touch(key).is_none() {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.values.get(key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes everything; the minimum count resets with the tracker.
    fn clear(&mut self) {
        self.values.clear();
        self.freq.clear();
        self.debug_check();
    }
}

impl<K, V> MutableCache<K, Arc<V>> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let value = self.values.remove(key)?;
        self.freq.remove(key);
        self.debug_check();
        Some(value)
    }
}

impl<K, V> LfuCacheTrait<K, Arc<V>> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lfu(&mut self) -> Option<(K, Arc<V>)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();

        let (key, _) = self.freq.pop_min()?;
        let value = self.values.remove(&key)?;
        self.debug_check();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_found();

        Some((key, value))
    }

    #[inline]
    fn peek_lfu(&self) -> Option<(&K, &Arc<V>)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lfu_call();

        let (key, _) = self.freq.peek_min()?;
        let value = self.values.get(key)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lfu_found();
        Some((key, value))
    }

    #[inline]
    fn frequency(&self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        self.metrics.record_frequency_call();

        let count = self.freq.frequency(key);
        #[cfg(feature = "metrics")]
        if count.is_some() {
            self.metrics.record_frequency_found();
        }
        count
    }

    #[inline]
    fn min_frequency(&self) -> Option<u64> {
        self.freq.min_freq()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            put_calls: self.metrics.put_calls,
            put_updates: self.metrics.put_updates,
            put_new: self.metrics.put_new,
            evicted_entries: self.metrics.evicted_entries,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            peek_lfu_calls: self.metrics.peek_lfu_calls.get(),
            peek_lfu_found: self.metrics.peek_lfu_found.get(),
            frequency_calls: self.metrics.frequency_calls.get(),
            frequency_found: self.metrics.frequency_found.get(),
            min_frequency: self.freq.min_freq(),
            cache_len: self.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("min_frequency", &self.freq.min_freq())
            .finish_non_exhaustive()
    }
}

/// Thread-safe LFU cache wrapping [`LfuCache`] in `parking_lot::RwLock`.
///
/// Count-updating operations (including `get`) take the write lock;
/// `contains`, `frequency` and size queries share the read lock.
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<LfuCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLfuCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a new thread-safe LFU cache, validating the capacity.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `capacity` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lfu::ConcurrentLfuCache;
    ///
    /// let cache = ConcurrentLfuCache::<u32, String>::try_new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(ConcurrentLfuCache::<u32, String>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(ConcurrentLfuCache {
            inner: Arc::new(RwLock::new(LfuCache::try_new(capacity)?)),
        })
    }

    /// Creates a new thread-safe LFU cache.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        ConcurrentLfuCache {
            inner: Arc::new(RwLock::new(LfuCache::new(capacity))),
        }
    }

    /// Stores a value, wrapping it in `Arc<V>` internally.
    ///
    /// Returns `true` iff a new entry was created; on `false` the stored
    /// value was replaced and the access count incremented.
    pub fn put(&self, key: K, value: V) -> bool {
        let mut cache = self.inner.write();
        cache.put(key, Arc::new(value))
    }

    /// Stores an `Arc<V>` directly.
    pub fn put_arc(&self, key: K, value: Arc<V>) -> bool {
        let mut cache = self.inner.write();
        cache.put(key, value)
    }

    /// Gets a value by key, incrementing its access count.
    ///
    /// Takes the write lock because a hit mutates the count buckets.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.get(key).map(Arc::clone)
    }

    /// Removes an entry and returns its `Arc<V>`.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    /// Returns the access count for `key` without incrementing it.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let cache = self.inner.read();
        cache.frequency(key)
    }

    /// Returns the lowest access count currently present.
    pub fn min_frequency(&self) -> Option<u64> {
        let cache = self.inner.read();
        cache.min_frequency()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.is_empty()
    }

    /// Returns the maximum capacity.
    pub fn capacity(&self) -> usize {
        let cache = self.inner.read();
        cache.capacity()
    }

    /// Returns `true` if the key exists; does not affect counts.
    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    /// Clears all entries and count state.
    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear()
    }

    /// Removes and returns the least frequently used entry.
    pub fn pop_lfu(&self) -> Option<(K, Arc<V>)> {
        let mut cache = self.inner.write();
        cache.pop_lfu()
    }

    /// Peeks at the eviction candidate without removing it.
    pub fn peek_lfu(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache.peek_lfu().map(|(k, v)| (k.clone(), Arc::clone(v)))
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        let cache = self.inner.read();
        cache.metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CoreCache;

    mod basic_behavior {
        use super::*;

        #[test]
        fn put_and_get_roundtrip() {
            let mut cache = LfuCache::new(4);
            assert!(cache.put(1, Arc::new("one")));
            assert!(cache.put(2, Arc::new("two")));

            assert_eq!(**cache.get(&1).unwrap(), "one");
            assert!(cache.get(&3).is_none());
            assert_eq!(cache.len(), 2);
        }

        #[test]
        fn put_existing_key_replaces_value_and_counts_access() {
            let mut cache = LfuCache::new(4);
            assert!(cache.put(1, Arc::new(100)));
            assert_eq!(cache.frequency(&1), Some(1));

            assert!(!cache.put(1, Arc::new(200)));
            assert_eq!(cache.frequency(&1), Some(2));
            assert_eq!(**cache.get(&1).unwrap(), 200);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn counts_start_at_one_and_increment_per_get() {
            let mut cache = LfuCache::new(4);
            cache.put(1, Arc::new("v"));
            assert_eq!(cache.frequency(&1), Some(1));

            cache.get(&1);
            cache.get(&1);
            assert_eq!(cache.frequency(&1), Some(3));
            assert_eq!(cache.frequency(&99), None);
        }

        #[test]
        fn contains_does_not_touch() {
            let mut cache = LfuCache::new(4);
            cache.put(1, Arc::new("v"));

            assert!(cache.contains(&1));
            assert!(cache.contains(&1));
            assert_eq!(cache.frequency(&1), Some(1));
        }

        #[test]
        fn remove_is_idempotent_and_drops_count_state() {
            let mut cache = LfuCache::new(4);
            cache.put(1, Arc::new("v"));
            cache.get(&1);

            assert!(cache.remove(&1).is_some());
            assert_eq!(cache.remove(&1), None);
            assert_eq!(cache.frequency(&1), None);
            assert_eq!(cache.len(), 0);
        }

        #[test]
        fn reinsert_after_remove_starts_fresh_at_one() {
            let mut cache = LfuCache::new(4);
            cache.put(1, Arc::new("old"));
            cache.get(&1);
            cache.get(&1);
            cache.remove(&1);

            assert!(cache.put(1, Arc::new("new")));
            assert_eq!(cache.frequency(&1), Some(1));
            assert_eq!(**cache.get(&1).unwrap(), "new");
        }

        #[test]
        fn clear_resets_counts_and_minimum() {
            let mut cache = LfuCache::new(4);
            cache.put(1, Arc::new("a"));
            cache.put(2, Arc::new("b"));
            cache.get(&1);

            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.min_frequency(), None);
            assert_eq!(cache.frequency(&1), None);

            // Fresh inserts behave like a new cache.
            cache.put(3, Arc::new("c"));
            assert_eq!(cache.frequency(&3), Some(1));
            assert_eq!(cache.min_frequency(), Some(1));
        }
    }

    mod eviction {
        use super::*;

        #[test]
        fn eviction_removes_lowest_count() {
            let mut cache = LfuCache::new(2);
            cache.put(1, Arc::new("one"));
            cache.put(2, Arc::new("two"));
            cache.get(&1); // count(1)=2

            cache.put(3, Arc::new("three")); // evicts 2
            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
            assert!(cache.contains(&3));
            assert_eq!(cache.len(), 2);
        }

        #[test]
        fn ties_evict_least_recently_touched() {
            let mut cache = LfuCache::new(3);
            cache.put(1, Arc::new("a"));
            cache.put(2, Arc::new("b"));
            cache.put(3, Arc::new("c"));

            // All at count 1; key 1 is the least recently touched tie.
            cache.put(4, Arc::new("d")); // evicts 1
            assert!(!cache.contains(&1));
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
            assert!(cache.contains(&4));
        }

        #[test]
        fn new_entry_is_immediately_eligible_for_eviction() {
            let mut cache = LfuCache::new(2);
            cache.put(1, Arc::new("hot"));
            cache.get(&1);
            cache.get(&1); // count(1)=3

            cache.put(2, Arc::new("cold")); // count(2)=1
            cache.put(3, Arc::new("colder")); // evicts 2, not 1

            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
            assert!(cache.contains(&3));
            assert_eq!(cache.min_frequency(), Some(1));
        }

        #[test]
        fn min_frequency_recovers_after_min_bucket_drains() {
            let mut cache = LfuCache::new(3);
            cache.put(1, Arc::new("a"));
            cache.put(2, Arc::new("b"));
            cache.get(&1);
            cache.get(&1); // count(1)=3
            cache.get(&2); // count(2)=2
            assert_eq!(cache.min_frequency(), Some(2));

            cache.remove(&2);
            assert_eq!(cache.min_frequency(), Some(3));
        }

        #[test]
        fn pop_lfu_drains_in_count_then_recency_order() {
            let mut cache = LfuCache::new(4);
            cache.put(1, Arc::new("a"));
            cache.put(2, Arc::new("b"));
            cache.put(3, Arc::new("c"));
            cache.get(&2); // count(2)=2

            assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some(1));
            assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some(3));
            assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some(2));
            assert_eq!(cache.pop_lfu(), None);
            assert!(cache.is_empty());
        }

        #[test]
        fn peek_lfu_matches_next_eviction() {
            let mut cache = LfuCache::new(3);
            assert!(cache.peek_lfu().is_none());

            cache.put(1, Arc::new("a"));
            cache.put(2, Arc::new("b"));
            cache.get(&1);

            assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(2));
            assert_eq!(cache.len(), 2); // nondestructive

            let (key, _) = cache.pop_lfu().unwrap();
            assert_eq!(key, 2);
        }

        #[test]
        fn single_capacity_cache_churns_correctly() {
            let mut cache = LfuCache::new(1);
            cache.put(1, Arc::new("a"));
            cache.get(&1);
            cache.get(&1);

            cache.put(2, Arc::new("b")); // even hot entries go when alone
            assert!(!cache.contains(&1));
            assert_eq!(cache.frequency(&2), Some(1));
            assert_eq!(cache.len(), 1);
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn try_new_rejects_zero_capacity() {
            let err = LfuCache::<u32, String>::try_new(0).unwrap_err();
            assert!(err.to_string().contains("capacity"));
        }

        #[test]
        #[should_panic(expected = "capacity")]
        fn new_panics_on_zero_capacity() {
            let _ = LfuCache::<u32, String>::new(0);
        }

        #[test]
        fn try_new_accepts_positive_capacity() {
            let cache = LfuCache::<u32, String>::try_new(8).unwrap();
            assert_eq!(cache.capacity(), 8);
            assert!(cache.is_empty());
            assert_eq!(cache.min_frequency(), None);
        }
    }

    mod state_consistency {
        use super::*;

        #[test]
        fn invariants_hold_under_mixed_workload() {
            let mut cache = LfuCache::new(8);
            for i in 0..32u32 {
                cache.put(i % 12, Arc::new(i));
                if i % 3 == 0 {
                    cache.get(&(i % 5));
                }
                if i % 7 == 0 {
                    cache.remove(&(i % 4));
                }
            }
            assert!(cache.check_invariants().is_ok());
            assert!(cache.len() <= 8);
        }

        #[test]
        fn len_tracks_all_mutations() {
            let mut cache = LfuCache::new(3);
            assert_eq!(cache.len(), 0);

            cache.put(1, Arc::new("a"));
            cache.put(2, Arc::new("b"));
            assert_eq!(cache.len(), 2);

            cache.put(1, Arc::new("a2")); // update, no growth
            assert_eq!(cache.len(), 2);

            cache.remove(&2);
            assert_eq!(cache.len(), 1);

            cache.pop_lfu();
            assert_eq!(cache.len(), 0);
        }

        #[test]
        fn counts_accumulate_one_per_touch_over_long_runs() {
            let mut cache = LfuCache::new(2);
            cache.put(1, Arc::new("v"));
            for _ in 0..100 {
                cache.get(&1);
            }
            assert_eq!(cache.frequency(&1), Some(101));
            assert_eq!(cache.min_frequency(), Some(101));
        }
    }

    #[cfg(feature = "concurrency")]
    mod concurrency {
        use super::*;
        use std::thread;

        #[test]
        fn concurrent_cache_basic_ops() {
            let cache: ConcurrentLfuCache<u32, String> = ConcurrentLfuCache::new(4);

            assert!(cache.put(1, "one".to_string()));
            assert!(!cache.put(1, "updated".to_string()));
            assert_eq!(*cache.get(&1).unwrap(), "updated");
            assert_eq!(cache.frequency(&1), Some(3)); // insert + put + get

            assert_eq!(*cache.remove(&1).unwrap(), "updated");
            assert!(cache.is_empty());
        }

        #[test]
        fn concurrent_eviction_respects_capacity() {
            let cache: ConcurrentLfuCache<u32, u32> = ConcurrentLfuCache::new(16);
            let mut handles = Vec::new();

            for t in 0..4u32 {
                let cache = cache.clone();
                handles.push(thread::spawn(move || {
                    for i in 0..200u32 {
                        cache.put(t * 1000 + i, i);
                        cache.get(&(t * 1000));
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }

            assert!(cache.len() <= 16);
        }

        #[test]
        fn pop_and_peek_lfu_through_wrapper() {
            let cache: ConcurrentLfuCache<u32, u32> = ConcurrentLfuCache::new(4);
            cache.put(1, 10);
            cache.put(2, 20);
            cache.get(&1);

            assert_eq!(cache.peek_lfu().map(|(k, _)| k), Some(2));
            assert_eq!(cache.min_frequency(), Some(1));

            let (key, value) = cache.pop_lfu().unwrap();
            assert_eq!((key, *value), (2, 20));
            assert_eq!(cache.len(), 1);
        }
    }
}
