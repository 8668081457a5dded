use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Failure taxonomy shared by the client, the fallback resolver and the routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Network,
    Authentication,
    Authorization,
    Data,
    Parsing,
    Timeout,
    Unknown,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Network,
        ErrorKind::Authentication,
        ErrorKind::Authorization,
        ErrorKind::Data,
        ErrorKind::Parsing,
        ErrorKind::Timeout,
        ErrorKind::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Authorization => "authorization",
            ErrorKind::Data => "data",
            ErrorKind::Parsing => "parsing",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging weight. Never used for control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(label)
    }
}

/// Upstream VIS operations the client calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Endpoint {
    /// GetBeachTournamentList
    TournamentList,
    /// GetBeachTournament with the enhanced field set
    TournamentDetail,
    /// GetBeachTournamentList filtered by number, basic fields only
    TournamentFallback,
}

impl Endpoint {
    pub fn request_type(&self) -> &'static str {
        match self {
            Endpoint::TournamentList | Endpoint::TournamentFallback => "GetBeachTournamentList",
            Endpoint::TournamentDetail => "GetBeachTournament",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Endpoint::TournamentList => "tournament-list",
            Endpoint::TournamentDetail => "tournament-detail",
            Endpoint::TournamentFallback => "tournament-fallback",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCategory {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub endpoint: Endpoint,
    pub recoverable: bool,
    pub requires_fallback: bool,
    pub severity: Severity,
}

/// Where and when a failure happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    pub tournament_code: Option<String>,
    pub tournament_number: Option<u32>,
    pub attempt: Option<u32>,
    pub timestamp: DateTime<Utc>,
    pub fallback_attempted: bool,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            tournament_code: None,
            tournament_number: None,
            attempt: None,
            timestamp: Utc::now(),
            fallback_attempted: false,
        }
    }

    pub fn for_tournament(number: u32) -> Self {
        Self {
            tournament_number: Some(number),
            ..Self::new()
        }
    }

    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub message: String,
    pub status: Option<u16>,
    pub category: ErrorCategory,
    pub context: ErrorContext,
    pub sanitized_for_logging: bool,
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VIS {} error on {}",
            self.category.kind, self.category.endpoint
        )?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Categorized failure of a VIS call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(untagged)]
pub enum ApiError {
    #[error("{0}")]
    Network(ErrorDetails),
    #[error("{0}")]
    Authentication(ErrorDetails),
    #[error("{0}")]
    Authorization(ErrorDetails),
    #[error("{0}")]
    Data(ErrorDetails),
    #[error("{0}")]
    Parsing(ErrorDetails),
    #[error("{0}")]
    Timeout(ErrorDetails),
    #[error("{0}")]
    Unknown(ErrorDetails),
}

impl ApiError {
    /// Wrap details in the variant matching their category
    pub fn from_details(details: ErrorDetails) -> Self {
        match details.category.kind {
            ErrorKind::Network => ApiError::Network(details),
            ErrorKind::Authentication => ApiError::Authentication(details),
            ErrorKind::Authorization => ApiError::Authorization(details),
            ErrorKind::Data => ApiError::Data(details),
            ErrorKind::Parsing => ApiError::Parsing(details),
            ErrorKind::Timeout => ApiError::Timeout(details),
            ErrorKind::Unknown => ApiError::Unknown(details),
        }
    }

    pub fn details(&self) -> &ErrorDetails {
        match self {
            ApiError::Network(d)
            | ApiError::Authentication(d)
            | ApiError::Authorization(d)
            | ApiError::Data(d)
            | ApiError::Parsing(d)
            | ApiError::Timeout(d)
            | ApiError::Unknown(d) => d,
        }
    }

    fn details_mut(&mut self) -> &mut ErrorDetails {
        match self {
            ApiError::Network(d)
            | ApiError::Authentication(d)
            | ApiError::Authorization(d)
            | ApiError::Data(d)
            | ApiError::Parsing(d)
            | ApiError::Timeout(d)
            | ApiError::Unknown(d) => d,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.details().category.kind
    }

    pub fn category(&self) -> &ErrorCategory {
        &self.details().category
    }

    pub fn context(&self) -> &ErrorContext {
        &self.details().context
    }

    pub fn status(&self) -> Option<u16> {
        self.details().status
    }

    pub fn message(&self) -> &str {
        &self.details().message
    }

    pub fn recoverable(&self) -> bool {
        self.category().recoverable
    }

    pub fn requires_fallback(&self) -> bool {
        self.category().requires_fallback
    }

    pub fn severity(&self) -> Severity {
        self.category().severity
    }

    pub fn is_sanitized(&self) -> bool {
        self.details().sanitized_for_logging
    }

    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.details_mut().context.attempt = Some(attempt);
        self
    }

    pub fn with_tournament_code(mut self, code: impl Into<String>) -> Self {
        self.details_mut().context.tournament_code = Some(code.into());
        self
    }

    pub fn with_fallback_attempted(mut self) -> Self {
        self.details_mut().context.fallback_attempted = true;
        self
    }

    pub(crate) fn set_sanitized_message(&mut self, message: String) {
        let details = self.details_mut();
        details.message = message;
        details.sanitized_for_logging = true;
    }
}
