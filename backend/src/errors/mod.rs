mod categorizer;
mod sanitize;
mod types;

pub use categorizer::{categorize, RawError};
pub use types::{ApiError, Endpoint, ErrorCategory, ErrorContext, ErrorDetails, ErrorKind, Severity};
