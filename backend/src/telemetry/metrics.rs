use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::ErrorKind;

/// Process-local counters. Lost on restart.
#[derive(Debug, Default)]
pub struct Metrics {
    upstream_requests: AtomicU64,
    upstream_failures: AtomicU64,
    upstream_millis: AtomicU64,
    retries: AtomicU64,
    fallbacks: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    errors: [AtomicU64; ErrorKind::ALL.len()],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub upstream_requests: u64,
    pub upstream_failures: u64,
    pub average_upstream_millis: u64,
    pub retries: u64,
    pub fallbacks: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub errors_by_type: BTreeMap<String, u64>,
}

impl Metrics {
    pub fn record_upstream(&self, millis: u64, success: bool) {
        self.upstream_requests.fetch_add(1, Ordering::Relaxed);
        self.upstream_millis.fetch_add(millis, Ordering::Relaxed);
        if !success {
            self.upstream_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache(&self, hit: bool) {
        let counter = if hit { &self.cache_hits } else { &self.cache_misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self, kind: ErrorKind) {
        self.errors[Self::kind_index(kind)].fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.upstream_requests.load(Ordering::Relaxed);
        let millis = self.upstream_millis.load(Ordering::Relaxed);

        let errors_by_type = ErrorKind::ALL
            .iter()
            .map(|kind| {
                let count = self.errors[Self::kind_index(*kind)].load(Ordering::Relaxed);
                (kind.to_string(), count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        MetricsSnapshot {
            upstream_requests: requests,
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            average_upstream_millis: millis.checked_div(requests).unwrap_or(0),
            retries: self.retries.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            errors_by_type,
        }
    }

    fn kind_index(kind: ErrorKind) -> usize {
        ErrorKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(ErrorKind::ALL.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_aggregates() {
        let metrics = Metrics::default();
        metrics.record_upstream(100, true);
        metrics.record_upstream(300, false);
        metrics.record_cache(true);
        metrics.record_cache(false);
        metrics.record_cache(false);
        metrics.record_error(ErrorKind::Timeout);
        metrics.record_error(ErrorKind::Timeout);
        metrics.record_error(ErrorKind::Authentication);

        let snapshot = metrics.snapshot();

        assert_eq!(snapshot.upstream_requests, 2);
        assert_eq!(snapshot.upstream_failures, 1);
        assert_eq!(snapshot.average_upstream_millis, 200);
        assert_eq!(snapshot.cache_hits, 1);
        assert_eq!(snapshot.cache_misses, 2);
        assert_eq!(snapshot.errors_by_type.get("timeout"), Some(&2));
        assert_eq!(snapshot.errors_by_type.get("authentication"), Some(&1));
        assert!(!snapshot.errors_by_type.contains_key("network"));
    }

    #[test]
    fn test_empty_snapshot_has_no_division_by_zero() {
        let snapshot = Metrics::default().snapshot();
        assert_eq!(snapshot.average_upstream_millis, 0);
        assert!(snapshot.errors_by_type.is_empty());
    }
}
