use crate::errors::{ApiError, ErrorKind};

/// Number of attempts an uncategorized failure is allowed before giving up
const UNKNOWN_RETRY_LIMIT: u32 = 2;

/// Decide whether a failed call should be attempted again.
///
/// `attempt` is the zero-based index of the attempt that just failed.
pub fn is_retryable(error: &ApiError, attempt: u32, max_retries: u32) -> bool {
    if attempt >= max_retries {
        return false;
    }

    if is_non_retryable_client_status(error.status()) {
        return false;
    }

    match error.kind() {
        ErrorKind::Network | ErrorKind::Timeout => true,
        ErrorKind::Authentication | ErrorKind::Authorization => false,
        ErrorKind::Parsing | ErrorKind::Data => false,
        ErrorKind::Unknown => attempt < UNKNOWN_RETRY_LIMIT,
    }
}

fn is_non_retryable_client_status(status: Option<u16>) -> bool {
    matches!(status, Some(code) if (400..500).contains(&code) && code != 408 && code != 429)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{categorize, Endpoint, ErrorContext, RawError};

    fn error_for(raw: RawError) -> ApiError {
        categorize(raw, Endpoint::TournamentList, ErrorContext::new())
    }

    fn status(code: u16) -> ApiError {
        error_for(RawError::Status {
            status: code,
            message: String::new(),
        })
    }

    #[test]
    fn test_never_retries_at_or_past_max() {
        let errors = [
            status(500),
            status(429),
            error_for(RawError::Transport("reset".to_string())),
            error_for(RawError::Timeout(std::time::Duration::from_secs(1))),
            error_for(RawError::Other("?".to_string())),
        ];

        for error in &errors {
            for max in 0..4 {
                for attempt in max..max + 3 {
                    assert!(!is_retryable(error, attempt, max), "{error} retried at {attempt}/{max}");
                }
            }
        }
    }

    #[test]
    fn test_client_errors_not_retried_except_408_and_429() {
        assert!(!is_retryable(&status(400), 0, 3));
        assert!(!is_retryable(&status(404), 0, 3));
        assert!(!is_retryable(&status(418), 0, 3));
        assert!(is_retryable(&status(408), 0, 3));
        assert!(is_retryable(&status(429), 0, 3));
    }

    #[test]
    fn test_auth_errors_fall_back_instead_of_retrying() {
        assert!(!is_retryable(&status(401), 0, 3));
        assert!(!is_retryable(&status(403), 0, 3));
    }

    #[test]
    fn test_network_timeout_and_parsing() {
        assert!(is_retryable(&status(503), 2, 3));
        assert!(is_retryable(&error_for(RawError::Transport("dns".to_string())), 1, 3));
        assert!(!is_retryable(&error_for(RawError::Parse("bad xml".to_string())), 0, 3));
    }

    #[test]
    fn test_unknown_retried_only_for_first_two_attempts() {
        let unknown = error_for(RawError::Other("strange".to_string()));
        assert!(is_retryable(&unknown, 0, 5));
        assert!(is_retryable(&unknown, 1, 5));
        assert!(!is_retryable(&unknown, 2, 5));
    }
}
