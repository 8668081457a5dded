use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::api::models::ErrorBody;
use crate::config::AppConfig;
use crate::errors::{ApiError, ErrorKind};
use crate::pagination::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
use crate::services::tournaments::{ServiceError, TournamentService};

pub mod health;
pub mod tournaments;

pub const MIN_YEAR: i32 = 2023;
pub const MAX_YEAR: i32 = 2025;
const RETRY_AFTER_SECS: &str = "60";

pub struct AppState {
    pub service: TournamentService,
    pub config: AppConfig,
}

/// Raw query string values; validated by [`TournamentParams::validate`]
#[derive(Debug, Default, Deserialize)]
pub struct TournamentParams {
    pub year: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentQuery {
    pub year: Option<i32>,
    /// `None` means the legacy, unpaginated array
    pub page: Option<PageRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamError {
    pub error: &'static str,
    pub details: String,
}

impl TournamentParams {
    pub fn validate(&self) -> Result<TournamentQuery, ParamError> {
        let year = parse_param::<i32>(&self.year)
            .filter(|y| y.map_or(true, |y| (MIN_YEAR..=MAX_YEAR).contains(&y)))
            .ok_or_else(|| ParamError {
                error: "Invalid year parameter",
                details: format!("Year must be between {} and {}", MIN_YEAR, MAX_YEAR),
            })?;

        let page = parse_param::<usize>(&self.page)
            .filter(|p| p.map_or(true, |p| p >= 1))
            .ok_or_else(|| ParamError {
                error: "Invalid page parameter",
                details: "Page must be a positive integer".to_string(),
            })?;

        let limit = parse_param::<usize>(&self.limit)
            .filter(|l| l.map_or(true, |l| (1..=MAX_LIMIT).contains(&l)))
            .ok_or_else(|| ParamError {
                error: "Invalid limit parameter",
                details: format!("Limit must be between 1 and {}", MAX_LIMIT),
            })?;

        let page = match (page, limit) {
            (None, None) => None,
            (page, limit) => Some(PageRequest::new(
                page.unwrap_or(DEFAULT_PAGE),
                limit.unwrap_or(DEFAULT_LIMIT),
            )),
        };

        Ok(TournamentQuery { year, page })
    }
}

/// `Some(None)` for an absent or blank value, `None` when it does not parse
fn parse_param<T: std::str::FromStr>(raw: &Option<String>) -> Option<Option<T>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Some(None),
        Some(value) => value.parse().ok().map(Some),
    }
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error.to_string(),
            details: self.details,
            category: None,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Status for a failed list fetch: upstream 404 becomes 503, other upstream
/// statuses pass through, unreachable upstream is 503, the rest 500
pub fn upstream_status(error: &ApiError) -> StatusCode {
    match error.status() {
        Some(404) => StatusCode::SERVICE_UNAVAILABLE,
        Some(code) => StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY),
        None => match error.kind() {
            ErrorKind::Network | ErrorKind::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

pub fn error_response(status: StatusCode, error: &str, api_error: Option<&ApiError>) -> Response {
    let body = ErrorBody {
        error: error.to_string(),
        details: api_error
            .map(|e| e.sanitized().message().to_string())
            .unwrap_or_else(|| "Unexpected error".to_string()),
        category: api_error.map(|e| e.kind().to_string()),
    };

    let mut response = (status, Json(body)).into_response();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
    }
    response
}

pub fn service_error_response(error: &ServiceError) -> Response {
    match error {
        ServiceError::Upstream(api_error) => {
            error_response(upstream_status(api_error), "Failed to fetch tournaments", Some(api_error))
        }
        ServiceError::Cache(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{categorize, Endpoint, ErrorContext, RawError};

    fn params(year: Option<&str>, page: Option<&str>, limit: Option<&str>) -> TournamentParams {
        TournamentParams {
            year: year.map(String::from),
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_no_params_is_legacy_mode() {
        let query = params(None, None, None).validate().unwrap();
        assert_eq!(query, TournamentQuery { year: None, page: None });

        let query = params(Some("2024"), None, None).validate().unwrap();
        assert_eq!(query.year, Some(2024));
        assert_eq!(query.page, None);
    }

    #[test]
    fn test_pagination_defaults() {
        let query = params(None, Some("2"), None).validate().unwrap();
        assert_eq!(query.page, Some(PageRequest::new(2, DEFAULT_LIMIT)));

        let query = params(None, None, Some("50")).validate().unwrap();
        assert_eq!(query.page, Some(PageRequest::new(1, 50)));
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(params(Some("2022"), None, None).validate().unwrap_err().error, "Invalid year parameter");
        assert_eq!(params(Some("2026"), None, None).validate().unwrap_err().error, "Invalid year parameter");
        assert_eq!(params(Some("abc"), None, None).validate().unwrap_err().error, "Invalid year parameter");
        assert!(params(Some("2023"), None, None).validate().is_ok());
        assert!(params(Some("2025"), None, None).validate().is_ok());
    }

    #[test]
    fn test_page_and_limit_bounds() {
        assert_eq!(params(None, Some("0"), None).validate().unwrap_err().error, "Invalid page parameter");
        assert_eq!(params(None, Some("-1"), None).validate().unwrap_err().error, "Invalid page parameter");
        assert_eq!(params(None, None, Some("0")).validate().unwrap_err().error, "Invalid limit parameter");
        assert_eq!(params(None, None, Some("101")).validate().unwrap_err().error, "Invalid limit parameter");
        assert!(params(None, Some("1"), Some("100")).validate().is_ok());
    }

    #[test]
    fn test_upstream_status_mapping() {
        let error = |raw| categorize(raw, Endpoint::TournamentList, ErrorContext::new());
        let http = |code| RawError::Status { status: code, message: String::new() };

        assert_eq!(upstream_status(&error(http(404))), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(upstream_status(&error(http(502))), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream_status(&error(http(401))), StatusCode::UNAUTHORIZED);
        assert_eq!(
            upstream_status(&error(RawError::Transport("refused".to_string()))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            upstream_status(&error(RawError::Parse("bad".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_503_carries_retry_after() {
        let response = error_response(StatusCode::SERVICE_UNAVAILABLE, "Failed to fetch tournaments", None);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "60");

        let response = error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[tokio::test]
    async fn test_upstream_error_body_is_sanitized() {
        let error = categorize(
            RawError::Transport("POST https://vis.example/XmlRequest.asmx?AppId=s3cret refused".to_string()),
            Endpoint::TournamentList,
            ErrorContext::new(),
        );

        let response = service_error_response(&ServiceError::Upstream(error));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("s3cret"));
        assert!(text.contains("\"category\":\"network\""));
    }
}
