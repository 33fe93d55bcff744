//! Eviction policy implementations.
//!
//! Two bounded caches with O(1) operations:
//!
//! - [`lru`]: recency-based, evicts the least recently used entry
//! - [`lfu`]: frequency-based, evicts the least frequently used entry,
//!   breaking count ties by least recent touch

pub mod lfu;
pub mod lru;

pub use lfu::LfuCache;
pub use lru::{LruCache, LruCore};

#[cfg(feature = "concurrency")]
pub use lfu::ConcurrentLfuCache;
#[cfg(feature = "concurrency")]
pub use lru::ConcurrentLruCache;
