//! Production logging: structured `log` lines plus in-process counters.

mod logger;
mod metrics;

pub use logger::{level_for, ProductionLogger};
pub use metrics::{Metrics, MetricsSnapshot};
