use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(10_000);

/// Upper bound of the random jitter, as a fraction of the capped delay
const JITTER_RATIO: f64 = 0.3;

/// Deterministic part of the delay: `min(base * 2^attempt, max)`
pub fn backoff_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    let factor = 2u32.saturating_pow(attempt);
    base.saturating_mul(factor).min(max)
}

/// Exponential backoff with 0-30% jitter, so concurrent clients spread out
pub fn calculate_retry_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    let capped = backoff_delay(attempt, base, max);
    let jitter = rand::thread_rng().gen_range(0.0..=JITTER_RATIO);
    capped + capped.mul_f64(jitter)
}

/// Waits between retry attempts of one call
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max: Duration,
}

impl Backoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self { base, max }
    }

    pub async fn wait(&self, attempt: u32) -> Duration {
        let delay = calculate_retry_delay(attempt, self.base, self.max);
        if !delay.is_zero() {
            sleep(delay).await;
        }
        delay
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY)
    }
}
