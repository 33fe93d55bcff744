//! Per-policy operation counters.
//!
//! Counters on `&mut self` paths are plain `u64`; counters recorded from
//! `&self` paths (peek, rank, frequency queries) use [`MetricsCell`] so the
//! read path stays `&self`. Synchronization comes from the lock above.

use crate::metrics::cell::MetricsCell;

#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_hits: u64,
    pub get_misses: u64,
    pub put_calls: u64,
    pub put_touches: u64,
    pub put_new: u64,
    pub evicted_entries: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
}

impl LruMetrics {
    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_put_call(&mut self) {
        self.put_calls += 1;
    }

    #[inline]
    pub fn record_put_touch(&mut self) {
        self.put_touches += 1;
    }

    #[inline]
    pub fn record_put_new(&mut self) {
        self.put_new += 1;
    }

    #[inline]
    pub fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    #[inline]
    pub fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    #[inline]
    pub fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    #[inline]
    pub fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    #[inline]
    pub fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    #[inline]
    pub fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    #[inline]
    pub fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }

    #[inline]
    pub fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    #[inline]
    pub fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }
}

#[derive(Debug, Default)]
pub struct LfuMetrics {
    pub get_hits: u64,
    pub get_misses: u64,
    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,
    pub evicted_entries: u64,
    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_lfu_calls: MetricsCell,
    pub peek_lfu_found: MetricsCell,
    pub frequency_calls: MetricsCell,
    pub frequency_found: MetricsCell,
}

impl LfuMetrics {
    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_put_call(&mut self) {
        self.put_calls += 1;
    }

    #[inline]
    pub fn record_put_update(&mut self) {
        self.put_updates += 1;
    }

    #[inline]
    pub fn record_put_new(&mut self) {
        self.put_new += 1;
    }

    #[inline]
    pub fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    #[inline]
    pub fn record_pop_lfu_call(&mut self) {
        self.pop_lfu_calls += 1;
    }

    #[inline]
    pub fn record_pop_lfu_found(&mut self) {
        self.pop_lfu_found += 1;
    }

    #[inline]
    pub fn record_peek_lfu_call(&self) {
        self.peek_lfu_calls.incr();
    }

    #[inline]
    pub fn record_peek_lfu_found(&self) {
        self.peek_lfu_found.incr();
    }

    #[inline]
    pub fn record_frequency_call(&self) {
        self.frequency_calls.incr();
    }

    #[inline]
    pub fn record_frequency_found(&self) {
        self.frequency_found.incr();
    }
}
