//! Plain-data snapshots of policy metrics.
//!
//! Snapshots copy the counters plus current len/capacity so callers can
//! export or log them without holding a reference into the cache.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LruMetricsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_touches: u64,
    pub put_new: u64,

    pub evicted_entries: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_calls: u64,
    pub peek_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LfuMetricsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,

    pub evicted_entries: u64,

    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_lfu_calls: u64,
    pub peek_lfu_found: u64,
    pub frequency_calls: u64,
    pub frequency_found: u64,

    pub min_frequency: Option<u64>,
    pub cache_len: usize,
    pub capacity: usize,
}
