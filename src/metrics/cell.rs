use std::cell::Cell;

/// Interior-mutable counter for metrics recorded on `&self` paths.
///
/// Peek-style operations (`peek`, `peek_lru`, `peek_lfu`, `frequency`,
/// `recency_rank`) take `&self`, so their counters cannot be plain `u64`
/// fields bumped through `&mut self`. A `Cell` lets them record without
/// widening those signatures and without atomic traffic on the hot path.
///
/// # Safety
///
/// `Cell` is not `Sync` on its own. Sharing a cache across threads goes
/// through the `Concurrent*` wrappers, whose `RwLock` serializes every
/// call that reaches a cell.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

// SAFETY: every cell is owned by one cache, and concurrent callers reach
// that cache only through the wrappers' RwLock. The counters feed
// snapshots and never steer eviction.
unsafe impl Sync for MetricsCell {}
unsafe impl Send for MetricsCell {}
