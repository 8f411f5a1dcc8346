//! Cache Statistics Module
//!
//! Tracks how requests were served: from cache, remote, or the degrade chain.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Requests served from a valid entry
    pub hits: u64,
    /// Requests that found no valid entry
    pub misses: u64,
    /// Degraded requests answered with an expired entry
    pub stale_served: u64,
    /// Degraded requests answered with bundled local data
    pub fallback_served: u64,
    /// Degraded requests answered with an empty collection
    pub empty_served: u64,
    /// Failed remote fetches
    pub remote_failures: u64,
    /// Entries removed by the background sweep
    pub swept: u64,
    /// Current number of entries across all namespaces
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_stale(&mut self) {
        self.stale_served += 1;
    }

    pub fn record_fallback(&mut self) {
        self.fallback_served += 1;
    }

    pub fn record_empty(&mut self) {
        self.empty_served += 1;
    }

    pub fn record_remote_failure(&mut self) {
        self.remote_failures += 1;
    }

    pub fn record_swept(&mut self, count: usize) {
        self.swept += count as u64;
    }

    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.stale_served, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_degrade_counters() {
        let mut stats = CacheStats::new();
        stats.record_remote_failure();
        stats.record_stale();
        stats.record_remote_failure();
        stats.record_fallback();
        stats.record_empty();

        assert_eq!(stats.remote_failures, 2);
        assert_eq!(stats.stale_served, 1);
        assert_eq!(stats.fallback_served, 1);
        assert_eq!(stats.empty_served, 1);
    }

    #[test]
    fn test_record_swept() {
        let mut stats = CacheStats::new();
        stats.record_swept(3);
        stats.record_swept(0);
        stats.record_swept(2);
        assert_eq!(stats.swept, 5);
    }
}
