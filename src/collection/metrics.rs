use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Request counters for the collection client using lock-free atomics.
///
/// Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct ClientMetrics {
    pub search_requests: Arc<AtomicU64>,
    pub detail_requests: Arc<AtomicU64>,
    pub cache_hits: Arc<AtomicU64>,
    pub failures: Arc<AtomicU64>,
    pub cancellations: Arc<AtomicU64>,
}

impl ClientMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_search(&self) {
        self.search_requests.fetch_add(1, Ordering::SeqCst);
    }

    /// Detail request that went to the network
    pub fn increment_detail(&self) {
        self.detail_requests.fetch_add(1, Ordering::SeqCst);
    }

    pub fn increment_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::SeqCst);
    }

    pub fn increment_failure(&self) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    pub fn increment_cancelled(&self) {
        self.cancellations.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn snapshot(&self) -> ClientMetricsSnapshot {
        ClientMetricsSnapshot {
            search_requests: self.search_requests.load(Ordering::SeqCst),
            detail_requests: self.detail_requests.load(Ordering::SeqCst),
            cache_hits: self.cache_hits.load(Ordering::SeqCst),
            failures: self.failures.load(Ordering::SeqCst),
            cancellations: self.cancellations.load(Ordering::SeqCst),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientMetricsSnapshot {
    pub search_requests: u64,
    pub detail_requests: u64,
    pub cache_hits: u64,
    pub failures: u64,
    pub cancellations: u64,
}

impl ClientMetricsSnapshot {
    /// Share of detail lookups answered from the cache
    #[must_use]
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.detail_requests + self.cache_hits;
        if total == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / total as f64
    }
}
