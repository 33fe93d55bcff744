//! # Least Recently Used (LRU) Cache Implementation
//!
//! Recency-based bounded cache: every hit moves the entry to the front of
//! a recency list, and eviction always takes the back.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                     ConcurrentLruCache<K, V>                   │
//!   │                   Arc<RwLock<LruCore<K, V>>>                   │
//!   │                             │                                  │
//!   │                             ▼                                  │
//!   │   ┌──────────────────────────────────────────────────────────┐ │
//!   │   │                     LruCore<K, V>                        │ │
//!   │   │                                                          │ │
//!   │   │   index: FxHashMap<K, SlotId>                            │ │
//!   │   │   ┌─────────┬─────────┐                                  │ │
//!   │   │   │  page_1 │  id_1   │──────────────┐                   │ │
//!   │   │   │  page_2 │  id_2   │────────┐     │                   │ │
//!   │   │   │  page_3 │  id_3   │──┐     │     │                   │ │
//!   │   │   └─────────┴─────────┘  │     │     │                   │ │
//!   │   │                          ▼     ▼     ▼                   │ │
//!   │   │   list: IntrusiveList<Entry<K, V>>                       │ │
//!   │   │   head ──► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail       │ │
//!   │   │            (MRU)                    (LRU)                │ │
//!   │   └──────────────────────────────────────────────────────────┘ │
//!   └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nodes live in a `SlotArena` and are addressed by stable `SlotId`
//! indices, so the hot paths splice list links without any raw pointers
//! or manual `Drop` handling.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(D) with cache full:
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail      (capacity = 3)
//!     1. pop [C] from tail, drop its index entry
//!     2. push [D] at head
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   put(B) with B present:
//!     value kept, [B] moves to head, returns false
//!
//!   get(B):
//!     index lookup O(1), move [B] to head, return the value
//!
//!   peek(C):
//!     index lookup O(1), order unchanged
//! ```
//!
//! ## Capacity Zero
//!
//! A capacity of 0 is a valid no-storage mode: `put` reports `true` (the
//! caller's entry was "accepted") but nothing is stored and every `get`
//! misses. Compare `LfuCache`, which rejects capacity 0 outright.
//!
//! ## Existing-Key `put`
//!
//! `put` on a present key refreshes recency but keeps the stored value;
//! the incoming value is dropped. Callers that need replacement remove
//! the key first. The frequency cache makes the opposite choice.
//!
//! ## Thread Safety
//!
//! - `LruCore`: **not** thread-safe, `&mut self` throughout
//! - `ConcurrentLruCache`: thread-safe via `parking_lot::RwLock`; `get`
//!   takes the write lock because a hit reorders the list
//! - Values are `Arc<V>` so handles stay valid after eviction

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Recency-list node payload. The key rides along so eviction can drop
/// the index entry without a reverse lookup.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: Arc<V>,
}

/// Single-threaded LRU core: hash index + arena-backed recency list.
///
/// All operations are O(1) except [`recency_rank`](LruCacheTrait::recency_rank).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cachecore::policy::lru::LruCore;
/// use cachecore::traits::CoreCache;
///
/// let mut cache: LruCore<u32, String> = LruCore::new(2);
/// cache.put(1, Arc::new("one".to_string()));
/// cache.put(2, Arc::new("two".to_string()));
/// cache.get(&1);
/// cache.put(3, Arc::new("three".to_string())); // evicts 2
///
/// assert!(cache.contains(&1));
/// assert!(!cache.contains(&2));
/// ```
pub struct LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    list: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new LRU cache core with the given capacity.
    ///
    /// A capacity of 0 creates a no-storage cache: `put` reports `true`
    /// but nothing is retained.
    ///
    /// # Example
    /// ```
    /// use cachecore::policy::lru::LruCore;
    ///
    /// let cache: LruCore<u32, String> = LruCore::new(100);
    /// ```
    #[inline]
    pub fn new(capacity: usize) -> Self {
        LruCore {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Read-only lookup without a recency update.
    ///
    /// Returns an `Arc<V>` clone. Unlike [`get`](CoreCache::get), the
    /// entry stays wherever it is in the recency order.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use cachecore::policy::lru::LruCore;
    /// use cachecore::traits::CoreCache;
    ///
    /// let mut cache: LruCore<u32, String> = LruCore::new(2);
    /// cache.put(1, Arc::new("first".to_string()));
    /// cache.put(2, Arc::new("second".to_string()));
    ///
    /// assert_eq!(*cache.peek(&1).unwrap(), "first");
    ///
    /// // Key 1 is still LRU and goes first
    /// cache.put(3, Arc::new("third".to_string()));
    /// assert!(!cache.contains(&1));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let id = *self.index.get(key)?;
        let entry = self.list.get(id)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_found();
        Some(Arc::clone(&entry.value))
    }

    /// Checks structural invariants, returning a description of the first
    /// violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "list length {} != index length {}",
                self.list.len(),
                self.index.len()
            )));
        }
        if self.capacity > 0 && self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        let mut walked = 0usize;
        for (id, entry) in self.list.iter() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new("listed key not indexed at its node"));
            }
            walked += 1;
            if walked > self.index.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
        }
        if walked != self.index.len() {
            return Err(InvariantError::new(format!(
                "walked {} nodes, index holds {}",
                walked,
                self.index.len()
            )));
        }
        Ok(())
    }

    #[inline]
    fn debug_check(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_invariants() {
            panic!("lru invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, Arc<V>> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Stores `key`; returns `true` iff a new entry was created.
    ///
    /// Present key: recency refresh only, the incoming value is dropped.
    /// Capacity 0: reports `true`, stores nothing.
    #[inline]
    fn put(&mut self, key: K, value: Arc<V>) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_put_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_touch();

            self.list.move_to_front(id);
            self.debug_check();
            return false;
        }

        // No-storage mode still reports acceptance.
        if self.capacity == 0 {
            return true;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        if self.index.len() >= self.capacity
            && let Some(evicted) = self.list.pop_back()
        {
            self.index.remove(&evicted.key);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        self.debug_check();
        true
    }

    /// Lookup that promotes a hit to the MRU position.
    #[inline]
    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            }
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
        self.debug_check();
    }
}

impl<K, V> MutableCache<K, Arc<V>> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let id = self.index.remove(key)?;
        let entry = self.list.remove(id);
        self.debug_check();
        entry.map(|entry| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, Arc<V>> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, Arc<V>)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        self.debug_check();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &Arc<V>)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        if let Some(&id) = self.index.get(key) {
            self.list.move_to_front(id);
            self.debug_check();

            #[cfg(feature = "metrics")]
            self.metrics.record_touch_found();

            true
        } else {
            false
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let &target = self.index.get(key)?;
        for (rank, (id, _)) in self.list.iter().enumerate() {
            if id == target {
                #[cfg(feature = "metrics")]
                self.metrics.record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            put_calls: self.metrics.put_calls,
            put_touches: self.metrics.put_touches,
            put_new: self.metrics.put_new,
            evicted_entries: self.metrics.evicted_entries,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            cache_len: self.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V> fmt::Debug for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Type alias for single-threaded usage under the policy's common name.
pub type LruCache<K, V> = LruCore<K, V>;

/// Thread-safe LRU cache wrapping [`LruCore`] in `parking_lot::RwLock`.
///
/// Every recency-updating operation (including `get`) takes the write
/// lock; `peek`, `contains` and size queries share the read lock.
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<LruCore<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a new thread-safe LRU cache with the given capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        ConcurrentLruCache {
            inner: Arc::new(RwLock::new(LruCore::new(capacity))),
        }
    }

    /// Stores a value, wrapping it in `Arc<V>` internally.
    ///
    /// Returns `true` iff a new entry was created; `false` means the key
    /// was already present and only its recency was refreshed.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    /// assert!(cache.put(1, "first".to_string()));
    /// assert!(!cache.put(1, "ignored".to_string()));
    /// assert_eq!(*cache.peek(&1).unwrap(), "first");
    /// ```
    pub fn put(&self, key: K, value: V) -> bool {
        let mut cache = self.inner.write();
        cache.put(key, Arc::new(value))
    }

    /// Stores an `Arc<V>` directly, avoiding a re-wrap for values that are
    /// already shared.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lru::ConcurrentLruCache;
    /// use std::sync::Arc;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    /// let shared = Arc::new("shared".to_string());
    /// cache.put_arc(1, Arc::clone(&shared));
    ///
    /// assert!(Arc::ptr_eq(&shared, &cache.get(&1).unwrap()));
    /// ```
    pub fn put_arc(&self, key: K, value: Arc<V>) -> bool {
        let mut cache = self.inner.write();
        cache.put(key, value)
    }

    /// Gets a value by key, moving it to the MRU position.
    ///
    /// Takes the write lock because it updates recency order.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.get(key).map(Arc::clone)
    }

    /// Peeks a value without affecting recency order. Read lock only.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let cache = self.inner.read();
        cache.peek(key)
    }

    /// Removes an entry and returns its `Arc<V>`.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    /// Marks an entry as most recently used. Returns `true` if found.
    pub fn touch(&self, key: &K) -> bool {
        let mut cache = self.inner.write();
        cache.touch(key)
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

    /// Returns `true` if the key exists; does not affect recency order.
    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    /// Clears all entries.
    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear()
    }

    /// Removes and returns the least recently used entry.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(10);
    /// cache.put(1, "first".to_string());
    /// cache.put(2, "second".to_string());
    ///
    /// let (key, value) = cache.pop_lru().unwrap();
    /// assert_eq!(key, 1);
    /// assert_eq!(*value, "first");
    /// ```
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        let mut cache = self.inner.write();
        cache.pop_lru()
    }

    /// Peeks at the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache.peek_lru().map(|(k, v)| (k.clone(), Arc::clone(v)))
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        let cache = self.inner.read();
        cache.metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CoreCache;

    mod correctness {
        use super::*;

        mod basic_behavior {
            use super::*;

            #[test]
            fn new_cache_reports_capacity_and_len() {
                let cache: LruCore<i32, i32> = LruCore::new(10);
                assert_eq!(cache.capacity(), 10);
                assert_eq!(cache.len(), 0);
                assert!(cache.is_empty());
            }

            #[test]
            fn put_reports_new_entries() {
                let mut cache = LruCore::new(5);
                assert!(cache.put(1, Arc::new(100)));
                assert_eq!(cache.len(), 1);
                assert!(cache.contains(&1));
            }

            #[test]
            fn put_existing_key_reports_false_and_keeps_value() {
                let mut cache = LruCore::new(5);
                assert!(cache.put(1, Arc::new(100)));
                assert!(!cache.put(1, Arc::new(200)));

                assert_eq!(cache.len(), 1);
                // Recency refresh only; the original value survives.
                assert_eq!(**cache.get(&1).unwrap(), 100);
            }

            #[test]
            fn get_hit_and_miss() {
                let mut cache = LruCore::new(5);
                cache.put(1, Arc::new(100));

                assert_eq!(**cache.get(&1).unwrap(), 100);
                assert!(cache.get(&2).is_none());
            }

            #[test]
            fn peek_returns_value_without_reordering() {
                let mut cache = LruCore::new(5);
                cache.put(1, Arc::new(100));

                assert_eq!(*cache.peek(&1).unwrap(), 100);
                assert!(cache.peek(&2).is_none());
                assert_eq!(cache.recency_rank(&1), Some(0));
            }

            #[test]
            fn remove_is_idempotent() {
                let mut cache = LruCore::new(5);
                cache.put(1, Arc::new(100));

                assert_eq!(*cache.remove(&1).unwrap(), 100);
                assert_eq!(cache.remove(&1), None);
                assert_eq!(cache.len(), 0);
                assert!(!cache.contains(&1));
            }

            #[test]
            fn remove_batch_preserves_input_order() {
                let mut cache = LruCore::new(5);
                for i in 1..=3 {
                    cache.put(i, Arc::new(i * 10));
                }

                let removed = cache.remove_batch(&[1, 99, 3]);
                assert_eq!(removed.len(), 3);
                assert_eq!(removed[0].as_deref(), Some(&10));
                assert!(removed[1].is_none());
                assert_eq!(removed[2].as_deref(), Some(&30));
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn clear_empties_and_cache_stays_usable() {
                let mut cache = LruCore::new(3);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));

                cache.clear();
                assert_eq!(cache.len(), 0);
                assert!(!cache.contains(&1));

                assert!(cache.put(1, Arc::new(11)));
                assert_eq!(**cache.get(&1).unwrap(), 11);
            }

            #[test]
            fn invariants_hold_after_mixed_operations() {
                let mut cache = LruCore::new(4);
                for i in 0..10 {
                    cache.put(i, Arc::new(i));
                }
                cache.get(&7);
                cache.remove(&8);
                cache.touch(&9);
                assert!(cache.check_invariants().is_ok());
            }
        }

        mod lru_operations {
            use super::*;

            #[test]
            fn eviction_takes_least_recently_used() {
                let mut cache = LruCore::new(3);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));
                cache.put(3, Arc::new(30));

                cache.put(4, Arc::new(40)); // evicts 1
                assert!(!cache.contains(&1));
                assert!(cache.contains(&2));
                assert_eq!(cache.len(), 3);
            }

            #[test]
            fn get_promotes_entry_to_mru() {
                let mut cache = LruCore::new(3);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));
                cache.put(3, Arc::new(30));

                cache.get(&1); // 2 is now LRU
                cache.put(4, Arc::new(40));

                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
            }

            #[test]
            fn put_existing_key_promotes_entry() {
                let mut cache = LruCore::new(3);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));
                cache.put(3, Arc::new(30));

                assert!(!cache.put(1, Arc::new(99))); // touch, not replace
                cache.put(4, Arc::new(40)); // evicts 2

                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
                assert_eq!(**cache.get(&1).unwrap(), 10);
            }

            #[test]
            fn peek_does_not_disturb_eviction_order() {
                let mut cache = LruCore::new(2);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));

                cache.peek(&1);
                cache.put(3, Arc::new(30)); // 1 still LRU, evicted

                assert!(!cache.contains(&1));
                assert!(cache.contains(&2));
            }

            #[test]
            fn touch_refreshes_without_value_access() {
                let mut cache = LruCore::new(2);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));

                assert!(cache.touch(&1));
                assert!(!cache.touch(&99));

                cache.put(3, Arc::new(30)); // 2 evicted
                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
            }

            #[test]
            fn pop_lru_drains_in_recency_order() {
                let mut cache = LruCore::new(3);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));
                cache.put(3, Arc::new(30));
                cache.get(&1);

                let order: Vec<i32> = std::iter::from_fn(|| cache.pop_lru().map(|(k, _)| k))
                    .collect();
                assert_eq!(order, vec![2, 3, 1]);
                assert!(cache.is_empty());
            }

            #[test]
            fn peek_lru_is_nondestructive() {
                let mut cache = LruCore::new(3);
                assert!(cache.peek_lru().is_none());

                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));
                assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
                assert_eq!(cache.len(), 2);
            }

            #[test]
            fn recency_rank_tracks_order() {
                let mut cache = LruCore::new(3);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));
                cache.put(3, Arc::new(30));

                assert_eq!(cache.recency_rank(&3), Some(0));
                assert_eq!(cache.recency_rank(&2), Some(1));
                assert_eq!(cache.recency_rank(&1), Some(2));
                assert_eq!(cache.recency_rank(&99), None);

                cache.get(&1);
                assert_eq!(cache.recency_rank(&1), Some(0));
            }
        }

        mod edge_cases {
            use super::*;

            #[test]
            fn zero_capacity_accepts_but_never_stores() {
                let mut cache: LruCore<i32, i32> = LruCore::new(0);

                assert!(cache.put(1, Arc::new(10)));
                assert!(cache.put(1, Arc::new(10)));
                assert_eq!(cache.len(), 0);
                assert!(cache.get(&1).is_none());
                assert!(!cache.contains(&1));
                assert!(cache.check_invariants().is_ok());
            }

            #[test]
            fn single_capacity_always_replaces() {
                let mut cache = LruCore::new(1);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));

                assert!(!cache.contains(&1));
                assert_eq!(**cache.get(&2).unwrap(), 20);
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn removing_then_reinserting_counts_as_new() {
                let mut cache = LruCore::new(2);
                cache.put(1, Arc::new(10));
                cache.remove(&1);

                assert!(cache.put(1, Arc::new(11)));
                assert_eq!(**cache.get(&1).unwrap(), 11);
            }

            #[test]
            fn remove_head_middle_and_tail() {
                let mut cache = LruCore::new(3);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));
                cache.put(3, Arc::new(30));

                cache.remove(&2); // middle
                assert!(cache.check_invariants().is_ok());
                cache.remove(&3); // head (MRU)
                assert!(cache.check_invariants().is_ok());
                cache.remove(&1); // tail (LRU)
                assert!(cache.is_empty());
                assert!(cache.check_invariants().is_ok());
            }

            #[test]
            fn evicted_arc_survives_in_caller() {
                let mut cache = LruCore::new(1);
                cache.put(1, Arc::new("held".to_string()));
                let held = cache.peek(&1).unwrap();

                cache.put(2, Arc::new("new".to_string())); // evicts 1
                assert_eq!(*held, "held");
            }

            #[test]
            fn eviction_after_clear_restarts_cleanly() {
                let mut cache = LruCore::new(2);
                cache.put(1, Arc::new(10));
                cache.put(2, Arc::new(20));
                cache.clear();

                cache.put(3, Arc::new(30));
                cache.put(4, Arc::new(40));
                cache.put(5, Arc::new(50)); // evicts 3

                assert!(!cache.contains(&3));
                assert!(cache.contains(&4));
                assert!(cache.contains(&5));
            }
        }
    }

    #[cfg(feature = "concurrency")]
    mod concurrency {
        use super::*;
        use std::thread;

        #[test]
        fn concurrent_cache_basic_ops() {
            let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(10);

            assert!(cache.put(1, "one".to_string()));
            assert!(!cache.put(1, "ignored".to_string()));
            assert_eq!(*cache.get(&1).unwrap(), "one");
            assert_eq!(cache.len(), 1);

            assert!(cache.touch(&1));
            assert_eq!(*cache.remove(&1).unwrap(), "one");
            assert!(cache.is_empty());
        }

        #[test]
        fn concurrent_eviction_respects_capacity() {
            let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::new(8);
            let mut handles = Vec::new();

            for t in 0..4u32 {
                let cache = cache.clone();
                handles.push(thread::spawn(move || {
                    for i in 0..100u32 {
                        cache.put(t * 1000 + i, i);
                        cache.get(&(t * 1000));
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }

            assert!(cache.len() <= 8);
        }

        #[test]
        fn shared_arc_identity_preserved() {
            let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(4);
            let shared = Arc::new("payload".to_string());

            cache.put_arc(1, Arc::clone(&shared));
            let fetched = cache.get(&1).unwrap();
            assert!(Arc::ptr_eq(&shared, &fetched));
        }

        #[test]
        fn pop_and_peek_lru_through_wrapper() {
            let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::new(4);
            cache.put(1, 10);
            cache.put(2, 20);

            assert_eq!(cache.peek_lru().map(|(k, _)| k), Some(1));
            let (key, value) = cache.pop_lru().unwrap();
            assert_eq!((key, *value), (1, 10));
            assert_eq!(cache.len(), 1);
        }
    }
}
