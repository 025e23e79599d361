//! Translation observability counters.
//!
//! Tracks where resolutions were served from and how the remote provider
//! is behaving. Purely informational: nothing here ever affects which
//! text a caller receives.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global translation metrics singleton.
pub struct TranslationMetrics {
    /// Resolutions served from the ephemeral cache
    cache_hits: AtomicUsize,

    /// Cache lookups that missed
    cache_misses: AtomicUsize,

    /// Resolutions served from a static bundle
    bundle_hits: AtomicUsize,

    /// Requests sent to the remote translation provider
    provider_calls: AtomicUsize,

    /// Provider requests that failed (after retries)
    provider_failures: AtomicUsize,

    /// Language auto-detections that degraded to the default
    detect_failures: AtomicUsize,
}

static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    /// Get the global metrics instance, initializing it on first use.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(|| TranslationMetrics {
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
            bundle_hits: AtomicUsize::new(0),
            provider_calls: AtomicUsize::new(0),
            provider_failures: AtomicUsize::new(0),
            detect_failures: AtomicUsize::new(0),
        })
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bundle_hit(&self) {
        self.bundle_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_call(&self) {
        self.provider_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_failure(&self) {
        self.provider_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_detect_failure(&self) {
        self.detect_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn bundle_hits(&self) -> usize {
        self.bundle_hits.load(Ordering::Relaxed)
    }

    pub fn provider_calls(&self) -> usize {
        self.provider_calls.load(Ordering::Relaxed)
    }

    pub fn provider_failures(&self) -> usize {
        self.provider_failures.load(Ordering::Relaxed)
    }

    pub fn detect_failures(&self) -> usize {
        self.detect_failures.load(Ordering::Relaxed)
    }

    /// Snapshot the counters into a serializable report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_lookups = hits + misses;
        let cache_hit_rate = if total_lookups > 0 {
            (hits as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        let calls = self.provider_calls();
        let failures = self.provider_failures();
        let provider_success_rate = if calls > 0 {
            ((calls - failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            bundle_hits: self.bundle_hits(),
            provider_calls: calls,
            provider_failures: failures,
            provider_success_rate,
            detect_failures: self.detect_failures(),
        }
    }

    /// Fresh, non-global instance. The global singleton is shared by
    /// every test in the process, so count assertions use this instead.
    #[cfg(test)]
    fn new_isolated() -> Self {
        Self {
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
            bundle_hits: AtomicUsize::new(0),
            provider_calls: AtomicUsize::new(0),
            provider_failures: AtomicUsize::new(0),
            detect_failures: AtomicUsize::new(0),
        }
    }
}

/// Point-in-time translation statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,
    pub bundle_hits: usize,
    pub provider_calls: usize,
    pub provider_failures: usize,
    /// Provider success rate as a percentage (0-100)
    pub provider_success_rate: f64,
    pub detect_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let metrics = TranslationMetrics::new_isolated();

        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();
        metrics.record_bundle_hit();
        metrics.record_provider_call();
        metrics.record_provider_failure();
        metrics.record_detect_failure();

        assert_eq!(metrics.cache_hits(), 2);
        assert_eq!(metrics.cache_misses(), 1);
        assert_eq!(metrics.bundle_hits(), 1);
        assert_eq!(metrics.provider_calls(), 1);
        assert_eq!(metrics.provider_failures(), 1);
        assert_eq!(metrics.detect_failures(), 1);
    }

    #[test]
    fn test_report_empty() {
        let report = TranslationMetrics::new_isolated().report();

        assert_eq!(report.cache_hits, 0);
        assert_eq!(report.cache_hit_rate, 0.0);
        assert_eq!(report.provider_calls, 0);
        assert_eq!(report.provider_success_rate, 0.0);
    }

    #[test]
    fn test_report_cache_hit_rate() {
        let metrics = TranslationMetrics::new_isolated();

        // 3 hits, 1 miss = 75%
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();

        let report = metrics.report();
        assert_eq!(report.cache_hit_rate, 75.0);
    }

    #[test]
    fn test_report_provider_success_rate() {
        let metrics = TranslationMetrics::new_isolated();

        // 4 calls, 1 failure = 75%
        for _ in 0..4 {
            metrics.record_provider_call();
        }
        metrics.record_provider_failure();

        let report = metrics.report();
        assert_eq!(report.provider_success_rate, 75.0);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let json = serde_json::to_string(&TranslationMetrics::new_isolated().report())
            .expect("Should serialize");
        assert!(json.contains("cacheHits"));
        assert!(json.contains("providerSuccessRate"));
        assert!(!json.contains("cache_hits"));
    }

    #[test]
    fn test_global_returns_same_instance() {
        let metrics1 = TranslationMetrics::global();
        let metrics2 = TranslationMetrics::global();
        assert!(std::ptr::eq(metrics1, metrics2));
    }

    #[test]
    fn test_global_counters_are_monotonic() {
        let metrics = TranslationMetrics::global();
        let before = metrics.cache_hits();
        metrics.record_cache_hit();
        // Other tests may record concurrently, so only a lower bound holds
        assert!(metrics.cache_hits() >= before + 1);
    }
}
