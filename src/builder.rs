//! Unified cache builder for the two eviction policies.
//!
//! Provides a simple API to pick a policy at construction time while
//! hiding the internal implementation details (like `Arc<V>` wrapping).
//!
//! ## Example
//!
//! ```rust
//! use cachecore::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! assert!(cache.put(1, "hello".to_string()));
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCore;
use crate::traits::{CoreCache, MutableCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction, ties broken by recency.
    Lfu,
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
#[derive(Debug)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    Lru(LruCore<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Stores a key-value pair. Returns `true` iff a new entry was created.
    ///
    /// On a present key the policy's touch side effect runs and `false` is
    /// returned; see [`CoreCache::put`] for the per-policy treatment of
    /// the stored value.
    pub fn put(&mut self, key: K, value: V) -> bool {
        let value = Arc::new(value);
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.put(key, value),
            CacheInner::Lfu(lfu) => lfu.put(key, value),
        }
    }

    /// Gets a reference to a value by key, running the policy's touch
    /// side effect on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key).map(|arc| arc.as_ref()),
            CacheInner::Lfu(lfu) => lfu.get(key).map(|arc| arc.as_ref()),
        }
    }

    /// Checks if a key exists without touching it.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
        }
    }

    /// Removes an entry, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let arc = match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::Lfu(lfu) => lfu.remove(key),
        }?;
        Some(Arc::try_unwrap(arc).unwrap_or_else(|arc| (*arc).clone()))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
        }
    }

    /// Checks if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity.
    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
        }
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
        }
    }

    /// Returns the eviction policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }
}

/// Builder for creating cache instances.
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Creates a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builds a cache with the specified policy, validating the capacity.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the capacity is invalid for the
    /// policy (the frequency policy rejects capacity 0; the recency
    /// policy accepts it as a no-storage cache).
    ///
    /// # Example
    ///
    /// ```rust
    /// use cachecore::builder::{CacheBuilder, CachePolicy};
    ///
    /// let cache = CacheBuilder::new(100).try_build::<u64, String>(CachePolicy::Lfu);
    /// assert!(cache.is_ok());
    ///
    /// let cache = CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Lfu);
    /// assert!(cache.is_err());
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCore::new(self.capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::try_new(self.capacity)?),
        };
        Ok(Cache { inner })
    }

    /// Builds a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is invalid for the policy. Use
    /// [`try_build`](Self::try_build) for user-supplied capacities.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cachecore::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// let lfu = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lfu);
    /// assert_eq!(lru.capacity(), lfu.capacity());
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }
}
