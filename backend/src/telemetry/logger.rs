use log::{debug, log, warn, Level};
use std::time::Duration;

use super::metrics::{Metrics, MetricsSnapshot};
use crate::errors::{ApiError, Endpoint, Severity};

const SLOW_OPERATION: Duration = Duration::from_secs(3);

/// Structured log lines and counters for errors, timings and upstream calls
#[derive(Debug, Default)]
pub struct ProductionLogger {
    metrics: Metrics,
}

impl ProductionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a categorized failure. The message is sanitized first.
    pub fn log_error(&self, error: &ApiError) {
        let error = error.sanitized();
        let category = error.category();
        let context = error.context();

        self.metrics.record_error(category.kind);

        log!(
            level_for(category.severity),
            "vis_error type={} endpoint={} severity={} status={} attempt={} tournament={} fallback_attempted={} message=\"{}\"",
            category.kind,
            category.endpoint,
            category.severity,
            display_opt(error.status()),
            display_opt(context.attempt),
            display_opt(context.tournament_number),
            context.fallback_attempted,
            error.message()
        );
    }

    pub fn log_performance(&self, operation: &str, elapsed: Duration) {
        let millis = elapsed.as_millis();
        if elapsed >= SLOW_OPERATION {
            warn!("performance operation={} duration_ms={} slow=true", operation, millis);
        } else {
            debug!("performance operation={} duration_ms={}", operation, millis);
        }
    }

    pub fn log_network_event(&self, endpoint: Endpoint, status: Option<u16>, elapsed: Duration) {
        let success = matches!(status, Some(code) if (200..300).contains(&code));
        self.metrics.record_upstream(elapsed.as_millis() as u64, success);

        debug!(
            "network endpoint={} status={} duration_ms={}",
            endpoint,
            display_opt(status),
            elapsed.as_millis()
        );
    }

    pub fn log_retry(&self, endpoint: Endpoint, attempt: u32, delay: Duration) {
        self.metrics.record_retry();
        debug!(
            "retry endpoint={} attempt={} delay_ms={}",
            endpoint,
            attempt,
            delay.as_millis()
        );
    }

    pub fn log_fallback(&self, number: u32, error: &ApiError) {
        self.metrics.record_fallback();
        log!(
            level_for(error.severity()),
            "fallback tournament={} reason={}",
            number,
            error.kind()
        );
    }

    pub fn log_cache(&self, key: &str, hit: bool) {
        self.metrics.record_cache(hit);
        debug!("cache key={} hit={}", key, hit);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

pub fn level_for(severity: Severity) -> Level {
    match severity {
        Severity::Low => Level::Info,
        Severity::Medium => Level::Warn,
        Severity::High => Level::Error,
    }
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{categorize, ErrorContext, RawError};

    #[test]
    fn test_severity_levels() {
        assert_eq!(level_for(Severity::Low), Level::Info);
        assert_eq!(level_for(Severity::Medium), Level::Warn);
        assert_eq!(level_for(Severity::High), Level::Error);
    }

    #[test]
    fn test_events_feed_metrics() {
        let logger = ProductionLogger::new();
        let error = categorize(
            RawError::Status { status: 401, message: String::new() },
            Endpoint::TournamentDetail,
            ErrorContext::for_tournament(3),
        );

        logger.log_error(&error);
        logger.log_fallback(3, &error);
        logger.log_network_event(Endpoint::TournamentDetail, Some(401), Duration::from_millis(40));
        logger.log_retry(Endpoint::TournamentList, 0, Duration::from_millis(1));
        logger.log_cache("all", false);

        let snapshot = logger.snapshot();
        assert_eq!(snapshot.errors_by_type.get("authentication"), Some(&1));
        assert_eq!(snapshot.fallbacks, 1);
        assert_eq!(snapshot.upstream_failures, 1);
        assert_eq!(snapshot.retries, 1);
        assert_eq!(snapshot.cache_misses, 1);
    }
}
