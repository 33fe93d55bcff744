//! Frequency buckets for O(1) LFU tracking.
//!
//! Tracks per-key access counts for LFU eviction with O(1) insert, touch,
//! remove, and eviction. Keys are partitioned into buckets by exact access
//! count; within a bucket, entries form a doubly linked list ordered by
//! recency so ties evict the least-recently-touched key first.
//!
//! ## Architecture
//!
//! ```text
//!   index: HashMap<K, SlotId>        entries: SlotArena<Entry<K>>
//!   ┌──────────┬──────────┐          ┌──────┬─────────────────────┐
//!   │   "a"    │   id_0   │─────────►│ id_0 │ count:2, prev/next  │
//!   │   "b"    │   id_1   │─────────►│ id_1 │ count:1, prev/next  │
//!   │   "c"    │   id_2   │─────────►│ id_2 │ count:1, prev/next  │
//!   └──────────┴──────────┘          └──────┴─────────────────────┘
//!
//!   buckets: HashMap<u64, Bucket>   (count → recency list)
//!
//!   min_count = 1
//!        │
//!        ▼
//!   count=1: head ──► [id_2] ◄──► [id_1] ◄── tail (evict first)
//!   count=2: head ──► [id_0] ◄── tail
//!
//!   Bucket chain: count=1 ──next──► count=2 (ascending, no gaps tracked)
//! ```
//!
//! A touch moves a key from bucket `c` to bucket `c + 1`. Because counts
//! only ever advance by one, the destination bucket is always adjacent to
//! the source in the chain, so bucket creation never searches: the new
//! bucket is spliced in right after (or in place of) the old one. The
//! cached `min_count` makes eviction O(1); it only changes when the
//! minimum bucket empties or a fresh key resets it to 1.
//!
//! ## Example Usage
//!
//! ```
//! use cachecore::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("a");
//! freq.insert("b");
//! freq.touch(&"a"); // "a" now at count=2
//!
//! assert_eq!(freq.frequency(&"a"), Some(2));
//! assert_eq!(freq.min_freq(), Some(1));
//! assert_eq!(freq.pop_min(), Some(("b", 1)));
//! ```

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::ds::slot_arena::{SlotArena, SlotId};

/// Link fields come first: they are touched on every operation, the key
/// only on eviction.
#[derive(Debug)]
#[repr(C)]
struct Entry<K> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    count: u64,
    key: K,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// Typical workloads cluster at low counts, so a small bucket map covers
/// most distinct frequencies.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

/// O(1) LFU metadata tracker with recency tie-breaking within a count.
///
/// # Example
///
/// ```
/// use cachecore::ds::FrequencyBuckets;
///
/// let mut freq = FrequencyBuckets::new();
/// freq.insert("a");
/// freq.insert("b");
/// freq.touch(&"b");
///
/// // "a" is the only key left at the minimum count
/// let (key, count) = freq.pop_min().unwrap();
/// assert_eq!((key, count), ("a", 1));
/// ```
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    entries: SlotArena<Entry<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    min_count: u64,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_count: 0,
        }
    }

    /// Creates an empty tracker with reserved capacity for entries and
    /// index, and [`DEFAULT_BUCKET_PREALLOC`] buckets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::with_capacity_and_hasher(
                DEFAULT_BUCKET_PREALLOC,
                Default::default(),
            ),
            min_count: 0,
        }
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no tracked keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is tracked.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current access count for `key`, if tracked.
    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.count)
    }

    /// Returns the lowest access count currently present, or `None` when
    /// empty.
    pub fn min_freq(&self) -> Option<u64> {
        (self.min_count > 0).then_some(self.min_count)
    }

    /// Returns the eviction candidate `(key, count)` without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let bucket = self.buckets.get(&self.min_count)?;
        let entry = self.entries.get(bucket.tail?)?;
        Some((&entry.key, entry.count))
    }

    /// Starts tracking `key` at count 1; returns `false` if already
    /// tracked.
    ///
    /// A fresh key is by definition the minimum, so `min_count` becomes 1.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// assert!(freq.insert("a"));
    /// assert!(!freq.insert("a"));
    /// assert_eq!(freq.frequency(&"a"), Some(1));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            count: 1,
            key: key.clone(),
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&1) {
            let next = (self.min_count != 0).then_some(self.min_count);
            self.link_bucket(1, None, next);
        }
        self.bucket_push_front(1, id);
        self.min_count = 1;
        true
    }

    /// Increments the count for `key` and returns the new count, or `None`
    /// if `key` is not tracked.
    ///
    /// The key moves from bucket `c` to bucket `c + 1`, taking the
    /// most-recently-touched position there. An emptied source bucket is
    /// destroyed, and `min_count` advances with it when it was the minimum.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("key");
    /// assert_eq!(freq.touch(&"key"), Some(2));
    /// assert_eq!(freq.touch(&"key"), Some(3));
    /// assert_eq!(freq.touch(&"missing"), None);
    /// ```
    #[inline]
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let count = self.entries.get(id)?.count;
        // Counts start at 1 and grow by one per touch; overflow is out of
        // reach for any realizable access sequence.
        let next_count = count + 1;

        let (chain_prev, chain_next) = {
            let bucket = self.buckets.get(&count)?;
            (bucket.prev, bucket.next)
        };

        self.bucket_unlink(count, id)?;
        let emptied = self.bucket_is_empty(count);

        if emptied {
            self.unlink_bucket(count, chain_prev, chain_next);
            if self.min_count == count {
                self.min_count = chain_next.unwrap_or(0);
            }
        }

        if !self.buckets.contains_key(&next_count) {
            // Counts move by exactly one, so the destination sits right
            // where the source was (or just after it): no search needed.
            let prev = if emptied { chain_prev } else { Some(count) };
            self.link_bucket(next_count, prev, chain_next);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.count = next_count;
        }
        self.bucket_push_front(next_count, id);
        if self.min_count == 0 || next_count < self.min_count {
            self.min_count = next_count;
        }

        Some(next_count)
    }

    /// Stops tracking `key` and returns its previous count.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("key");
    /// freq.touch(&"key");
    ///
    /// assert_eq!(freq.remove(&"key"), Some(2));
    /// assert_eq!(freq.remove(&"key"), None);
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let id = self.index.remove(key)?;
        let count = self.entries.get(id)?.count;

        self.bucket_unlink(count, id)?;
        let emptied = self.bucket_is_empty(count);
        let (chain_prev, chain_next) = {
            let bucket = self.buckets.get(&count)?;
            (bucket.prev, bucket.next)
        };

        if emptied {
            self.unlink_bucket(count, chain_prev, chain_next);
            if self.min_count == count {
                self.min_count = chain_next.unwrap_or(0);
            }
        }

        self.entries.remove(id).map(|entry| entry.count)
    }

    /// Removes and returns the eviction candidate `(key, count)`: the
    /// least-recently-touched key in the minimum-count bucket.
    ///
    /// # Example
    ///
    /// ```
    /// use cachecore::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("a");
    /// freq.insert("b");
    /// freq.touch(&"b"); // "b" at count=2
    ///
    /// assert_eq!(freq.pop_min(), Some(("a", 1)));
    /// assert_eq!(freq.pop_min(), Some(("b", 2)));
    /// assert_eq!(freq.pop_min(), None);
    /// ```
    #[inline]
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let count = self.min_count;
        if count == 0 {
            return None;
        }

        let id = self.buckets.get(&count)?.tail?;
        self.bucket_unlink(count, id)?;
        let emptied = self.bucket_is_empty(count);
        let (chain_prev, chain_next) = {
            let bucket = self.buckets.get(&count)?;
            (bucket.prev, bucket.next)
        };

        if emptied {
            self.unlink_bucket(count, chain_prev, chain_next);
            if self.min_count == count {
                self.min_count = chain_next.unwrap_or(0);
            }
        }

        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.count))
    }

    /// Clears all state; `min_count` resets to the empty sentinel.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_count = 0;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.len(), self.index.len());

        if self.is_empty() {
            assert!(self.buckets.is_empty());
            assert_eq!(self.min_count, 0);
            return;
        }

        assert!(self.min_count > 0);
        assert!(self.buckets.contains_key(&self.min_count));

        for (&count, bucket) in &self.buckets {
            assert!(bucket.head.is_some());
            assert!(bucket.tail.is_some());
            if let Some(prev) = bucket.prev {
                assert!(prev < count);
                assert_eq!(self.buckets[&prev].next, Some(count));
            } else {
                assert_eq!(self.min_count, count);
            }
            if let Some(next) = bucket.next {
                assert!(next > count);
                assert_eq!(self.buckets[&next].prev, Some(count));
            }

            let mut current = bucket.head;
            let mut last = None;
            let mut seen = 0usize;
            while let Some(id) = current {
                let entry = self.entries.get(id).expect("bucket entry missing");
                assert_eq!(entry.count, count);
                assert_eq!(entry.prev, last);
                assert_eq!(self.index.get(&entry.key), Some(&id));
                last = Some(id);
                current = entry.next;
                seen += 1;
                assert!(seen <= self.len());
            }
            assert_eq!(bucket.tail, last);
            assert!(seen > 0);
        }
    }

    fn bucket_is_empty(&self, count: u64) -> bool {
        self.buckets
            .get(&count)
            .is_none_or(|bucket| bucket.head.is_none())
    }

    fn link_bucket(&mut self, count: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            count,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );
        if let Some(prev) = prev
            && let Some(prev_bucket) = self.buckets.get_mut(&prev)
        {
            prev_bucket.next = Some(count);
        }
        if let Some(next) = next
            && let Some(next_bucket) = self.buckets.get_mut(&next)
        {
            next_bucket.prev = Some(count);
        }
    }

    fn unlink_bucket(&mut self, count: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(prev) = prev
            && let Some(prev_bucket) = self.buckets.get_mut(&prev)
        {
            prev_bucket.next = next;
        }
        if let Some(next) = next
            && let Some(next_bucket) = self.buckets.get_mut(&next)
        {
            next_bucket.prev = prev;
        }
        self.buckets.remove(&count);
    }

    fn bucket_push_front(&mut self, count: u64, id: SlotId) {
        let bucket = self.buckets.get_mut(&count).expect("bucket missing");

        let old_head = bucket.head;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(old_head) => {
                if let Some(entry) = self.entries.get_mut(old_head) {
                    entry.prev = Some(id);
                }
            }
            None => bucket.tail = Some(id),
        }
        bucket.head = Some(id);
    }

    fn bucket_unlink(&mut self, count: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.prev, entry.next)
        };

        let bucket = self.buckets.get_mut(&count)?;
        match prev {
            Some(prev) => {
                if let Some(entry) = self.entries.get_mut(prev) {
                    entry.next = next;
                }
            }
            None => bucket.head = next,
        }
        let bucket = self.buckets.get_mut(&count)?;
        match next {
            Some(next) => {
                if let Some(entry) = self.entries.get_mut(next) {
                    entry.prev = prev;
                }
            }
            None => bucket.tail = prev,
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }

        Some(())
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_starts_at_count_one() {
        let mut freq = FrequencyBuckets::new();
        assert!(freq.insert("a"));
        assert!(!freq.insert("a"));
        assert_eq!(freq.frequency(&"a"), Some(1));
        assert_eq!(freq.min_freq(), Some(1));
        freq.debug_validate_invariants();
    }

    #[test]
    fn fresh_insert_resets_min_count() {
        let mut freq = FrequencyBuckets::new();
        freq.insert("a");
        freq.touch(&"a");
        freq.touch(&"a");
        assert_eq!(freq.min_freq(), Some(3));

        freq.insert("b");
        assert_eq!(freq.min_freq(), Some(1));
        freq.debug_validate_invariants();
    }

    #[test]
    fn touch_increments_and_advances_min() {
        let mut freq = FrequencyBuckets::new();
        freq.insert("only");
        assert_eq!(freq.touch(&"only"), Some(2));
        // Bucket 1 emptied; minimum follows the key.
        assert_eq!(freq.min_freq(), Some(2));
        assert_eq!(freq.touch(&"only"), Some(3));
        assert_eq!(freq.min_freq(), Some(3));
        freq.debug_validate_invariants();
    }

    #[test]
    fn touch_missing_key_is_none() {
        let mut freq: FrequencyBuckets<&str> = FrequencyBuckets::new();
        assert_eq!(freq.touch(&"ghost"), None);
    }

    #[test]
    fn pop_min_breaks_ties_by_recency() {
        let mut freq = FrequencyBuckets::new();
        freq.insert("a");
        freq.insert("b");
        freq.insert("c");
        // All at count 1; "a" is the least recently touched.
        freq.touch(&"a"); // a=2
        freq.insert("d");

        assert_eq!(freq.pop_min(), Some(("b", 1)));
        assert_eq!(freq.pop_min(), Some(("c", 1)));
        assert_eq!(freq.pop_min(), Some(("d", 1)));
        assert_eq!(freq.pop_min(), Some(("a", 2)));
        assert_eq!(freq.pop_min(), None);
        freq.debug_validate_invariants();
    }

    #[test]
    fn peek_min_does_not_remove() {
        let mut freq = FrequencyBuckets::new();
        freq.insert("a");
        freq.insert("b");
        assert_eq!(freq.peek_min(), Some((&"a", 1)));
        assert_eq!(freq.len(), 2);
    }

    #[test]
    fn remove_recovers_min_count_from_chain() {
        let mut freq = FrequencyBuckets::new();
        freq.insert("low");
        freq.insert("high");
        for _ in 0..4 {
            freq.touch(&"high");
        }
        assert_eq!(freq.min_freq(), Some(1));

        assert_eq!(freq.remove(&"low"), Some(1));
        assert_eq!(freq.min_freq(), Some(5));

        assert_eq!(freq.remove(&"high"), Some(5));
        assert_eq!(freq.min_freq(), None);
        freq.debug_validate_invariants();
    }

    #[test]
    fn buckets_stay_adjacent_under_interleaving() {
        let mut freq = FrequencyBuckets::new();
        for key in ["a", "b", "c", "d"] {
            freq.insert(key);
        }
        freq.touch(&"a");
        freq.touch(&"a");
        freq.touch(&"b");
        freq.touch(&"c");
        freq.touch(&"b");
        freq.debug_validate_invariants();

        assert_eq!(freq.frequency(&"a"), Some(3));
        assert_eq!(freq.frequency(&"b"), Some(3));
        assert_eq!(freq.frequency(&"c"), Some(2));
        assert_eq!(freq.frequency(&"d"), Some(1));
        assert_eq!(freq.min_freq(), Some(1));

        // Drain in ascending count order.
        assert_eq!(freq.pop_min(), Some(("d", 1)));
        assert_eq!(freq.pop_min(), Some(("c", 2)));
        assert_eq!(freq.pop_min(), Some(("a", 3)));
        assert_eq!(freq.pop_min(), Some(("b", 3)));
        freq.debug_validate_invariants();
    }

    #[test]
    fn clear_resets_all_state() {
        let mut freq = FrequencyBuckets::with_capacity(8);
        freq.insert("a");
        freq.touch(&"a");

        freq.clear();
        assert!(freq.is_empty());
        assert_eq!(freq.min_freq(), None);
        assert_eq!(freq.frequency(&"a"), None);
        freq.debug_validate_invariants();

        // Usable again after clear.
        assert!(freq.insert("a"));
        assert_eq!(freq.min_freq(), Some(1));
    }
}
