use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

use super::{error_response, service_error_response, AppState, ParamError, TournamentParams};
use crate::api::models::PaginatedTournamentResponse;
use crate::cache::{etag_for_text, matches_if_none_match};
use crate::errors::ErrorKind;
use crate::pagination::paginate;
use crate::services::tournaments::ServiceError;

/// `GET /api/tournaments?[year&page&limit]`
pub async fn get_tournaments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TournamentParams>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();

    let query = match params.validate() {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };

    let snapshot = match state.service.tournaments(query.year, Utc::now()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            // Upstream failures are already logged, sanitized, by the client
            if let ServiceError::Cache(cache_error) = &e {
                log::error!("Failed to cache tournaments: {}", cache_error);
            }
            return service_error_response(&e);
        }
    };

    let payload = match query.page {
        Some(request) => {
            let (tournaments, pagination) = paginate(&snapshot.entry.data, request, query.year);
            serde_json::to_string(&PaginatedTournamentResponse { tournaments, pagination })
        }
        None => serde_json::to_string(&*snapshot.entry.data),
    };

    let json = match payload {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize tournaments: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None);
        }
    };

    let etag = etag_for_text(&json);
    let cache_control = cache_control_value(state.service.ttl().as_secs());

    let not_modified = snapshot.cache_hit
        && if_none_match(&headers).is_some_and(|value| {
            matches_if_none_match(value, &etag) || matches_if_none_match(value, &snapshot.entry.etag)
        });

    state
        .service
        .logger()
        .log_performance("GET /api/tournaments", started.elapsed());

    let mut response = if not_modified {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            json,
        )
            .into_response()
    };

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&cache_control) {
        headers.insert(header::CACHE_CONTROL, value);
    }

    response
}

/// `GET /api/tournaments/:number`
pub async fn get_tournament_detail(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Response {
    let number = match number.trim().parse::<u32>() {
        Ok(number) if number > 0 => number,
        _ => {
            return ParamError {
                error: "Invalid tournament number",
                details: "Tournament number must be a positive integer".to_string(),
            }
            .into_response();
        }
    };

    match state.service.tournament_detail(number, Utc::now()).await {
        Ok(result) => Json(result).into_response(),
        Err(e) if e.kind() == ErrorKind::Data => {
            error_response(StatusCode::NOT_FOUND, "Tournament not found", Some(&e))
        }
        Err(e) => {
            let status = super::upstream_status(&e);
            error_response(status, "Failed to fetch tournament", Some(&e))
        }
    }
}

fn if_none_match(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
}

fn cache_control_value(max_age: u64) -> String {
    format!("public, max-age={}, s-maxage={}", max_age, max_age)
}
