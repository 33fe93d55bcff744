pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::ds::{FrequencyBuckets, IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::{LruCache, LruCore};
pub use crate::traits::{CoreCache, LfuCacheTrait, LruCacheTrait, MutableCache};

#[cfg(feature = "concurrency")]
pub use crate::policy::{lfu::ConcurrentLfuCache, lru::ConcurrentLruCache};
#[cfg(feature = "concurrency")]
pub use crate::traits::ConcurrentCache;

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{LfuMetricsSnapshot, LruMetricsSnapshot};
