use serde::Serialize;

use crate::config::VisSettings;
use crate::domain::Tournament;
use crate::pagination::PaginationInfo;
use crate::services::tournaments::CacheStats;
use crate::telemetry::MetricsSnapshot;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedTournamentResponse {
    pub tournaments: Vec<Tournament>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheHealth {
    pub list_entries: usize,
    pub detail_entries: usize,
    pub ttl_seconds: u64,
}

impl CacheHealth {
    pub fn new(stats: CacheStats, ttl_seconds: u64) -> Self {
        Self {
            list_entries: stats.lists,
            detail_entries: stats.details,
            ttl_seconds,
        }
    }
}

/// Upstream settings in effect, without credentials
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamHealth {
    pub base_url: String,
    pub timeout_ms: u128,
    pub max_retries: u32,
}

impl UpstreamHealth {
    pub fn new(settings: &VisSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout_ms: settings.timeout.as_millis(),
            max_retries: settings.max_retries,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub upstream: UpstreamHealth,
    pub cache: CacheHealth,
    pub metrics: MetricsSnapshot,
}
