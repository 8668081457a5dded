use chrono::Utc;
use std::time::Duration;

use super::types::{ApiError, Endpoint, ErrorCategory, ErrorContext, ErrorDetails, ErrorKind, Severity};

/// Failure as observed at the transport/parse layer, before categorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawError {
    /// Upstream answered with a non-2xx status
    Status { status: u16, message: String },
    /// Connection, DNS or body-read failure
    Transport(String),
    /// The call did not finish within the configured timeout
    Timeout(Duration),
    /// Response body was not the XML we expected
    Parse(String),
    /// Well-formed response without the requested record
    Missing(String),
    Other(String),
}

impl RawError {
    fn message(&self) -> String {
        match self {
            RawError::Status { status, message } if message.is_empty() => {
                format!("upstream returned HTTP {}", status)
            }
            RawError::Status { message, .. } => message.clone(),
            RawError::Transport(message) => message.clone(),
            RawError::Timeout(after) => format!("request timed out after {}ms", after.as_millis()),
            RawError::Parse(message) => message.clone(),
            RawError::Missing(message) => message.clone(),
            RawError::Other(message) => message.clone(),
        }
    }

    fn status(&self) -> Option<u16> {
        match self {
            RawError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RawError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            RawError::Timeout(Duration::ZERO)
        } else if let Some(status) = error.status() {
            RawError::Status {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else if error.is_connect() || error.is_request() || error.is_body() {
            RawError::Transport(error.to_string())
        } else {
            RawError::Other(error.to_string())
        }
    }
}

/// Classify a raw failure. The context timestamp is stamped here.
pub fn categorize(raw: RawError, endpoint: Endpoint, mut context: ErrorContext) -> ApiError {
    context.timestamp = Utc::now();
    let category = classify(&raw, endpoint);

    ApiError::from_details(ErrorDetails {
        message: raw.message(),
        status: raw.status(),
        category,
        context,
        sanitized_for_logging: false,
    })
}

fn classify(raw: &RawError, endpoint: Endpoint) -> ErrorCategory {
    use ErrorKind::*;
    use Severity::*;

    let (kind, recoverable, requires_fallback, severity) = match raw {
        RawError::Status { status: 401, .. } => {
            // Expected on the enhanced detail endpoint without elevated credentials
            let severity = if endpoint == Endpoint::TournamentDetail { Low } else { High };
            (Authentication, true, true, severity)
        }
        RawError::Status { status: 403, .. } => (Authorization, false, true, Medium),
        RawError::Status { status: 404, .. } => (Data, false, false, Medium),
        RawError::Status { status: 408, .. } => (Timeout, true, true, Medium),
        RawError::Status { status: 429, .. } => (Network, true, true, Medium),
        RawError::Status { status, .. } if *status >= 500 => (Network, true, true, High),
        RawError::Status { .. } => (Unknown, true, true, Medium),
        RawError::Transport(_) => (Network, true, true, High),
        RawError::Timeout(_) => (Timeout, true, true, Medium),
        RawError::Parse(_) => (Parsing, false, true, Medium),
        RawError::Missing(_) => (Data, false, false, Medium),
        RawError::Other(_) => (Unknown, true, true, High),
    };

    ErrorCategory {
        kind,
        endpoint,
        recoverable,
        requires_fallback,
        severity,
    }
}
