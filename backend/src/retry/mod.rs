mod backoff;
mod policy;

pub use backoff::{backoff_delay, calculate_retry_delay, Backoff, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY};
pub use policy::is_retryable;
