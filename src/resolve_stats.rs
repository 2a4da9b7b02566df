use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::ResolutionSource;

/// Write-only counters shared by concurrent resolutions.
#[derive(Debug)]
pub struct ResolveStats {
    queries: AtomicU64,
    failures: AtomicU64,
    short_circuited: AtomicU64,
    txpool_pending_hits: AtomicU64,
    pending_block_hits: AtomicU64,
    txpool_base_fee_hits: AtomicU64,
    predicted: AtomicU64,
}

impl Default for ResolveStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveStats {
    pub const fn new() -> Self {
        Self {
            queries: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            short_circuited: AtomicU64::new(0),
            txpool_pending_hits: AtomicU64::new(0),
            pending_block_hits: AtomicU64::new(0),
            txpool_base_fee_hits: AtomicU64::new(0),
            predicted: AtomicU64::new(0),
        }
    }

    pub fn inc_queries(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failures(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record(&self, source: ResolutionSource) {
        let counter = match source {
            ResolutionSource::None => &self.short_circuited,
            ResolutionSource::TxpoolPending => &self.txpool_pending_hits,
            ResolutionSource::PendingBlock => &self.pending_block_hits,
            ResolutionSource::TxpoolBaseFee => &self.txpool_base_fee_hits,
            ResolutionSource::Predicted => &self.predicted,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ResolveSnapshot {
        ResolveSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            short_circuited: self.short_circuited.load(Ordering::Relaxed),
            txpool_pending_hits: self.txpool_pending_hits.load(Ordering::Relaxed),
            pending_block_hits: self.pending_block_hits.load(Ordering::Relaxed),
            txpool_base_fee_hits: self.txpool_base_fee_hits.load(Ordering::Relaxed),
            predicted: self.predicted.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResolveSnapshot {
    pub queries: u64,
    pub failures: u64,
    pub short_circuited: u64,
    pub txpool_pending_hits: u64,
    pub pending_block_hits: u64,
    pub txpool_base_fee_hits: u64,
    pub predicted: u64,
}
