use axum::{extract::State, response::Json};
use std::sync::Arc;

use super::AppState;
use crate::api::models::{CacheHealth, HealthResponse, UpstreamHealth};

/// `GET /api/health`
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.service.cache_stats().await;

    Json(HealthResponse {
        status: "ok",
        upstream: UpstreamHealth::new(&state.config.vis),
        cache: CacheHealth::new(stats, state.service.ttl().as_secs()),
        metrics: state.service.logger().snapshot(),
    })
}
