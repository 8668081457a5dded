use regex::Regex;
use std::sync::LazyLock;

use super::types::ApiError;

const MAX_MESSAGE_LEN: usize = 500;
const REDACTED: &str = "[redacted]";
const TRUNCATION_MARKER: char = '…';

static APP_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(x-fivb-app-id|app_?id)(\s*[:=]\s*)[^\s,;&]+").expect("valid app id pattern")
});

static QUERY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https?://[^\s?]+)\?[^\s]*").expect("valid query pattern"));

impl ApiError {
    /// Copy of the error that is safe to write to logs.
    /// Sanitizing an already sanitized error returns it unchanged.
    pub fn sanitized(&self) -> ApiError {
        if self.is_sanitized() {
            return self.clone();
        }

        let mut sanitized = self.clone();
        sanitized.set_sanitized_message(sanitize_message(self.message()));
        sanitized
    }
}

fn sanitize_message(message: &str) -> String {
    let without_app_id = APP_ID_PATTERN.replace_all(message, format!("${{1}}${{2}}{}", REDACTED));
    let without_query = QUERY_PATTERN.replace_all(&without_app_id, "$1");

    truncate(&without_query, MAX_MESSAGE_LEN)
}

/// At most `max_chars` characters, the trailing marker included
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push(TRUNCATION_MARKER);
    truncated
}
