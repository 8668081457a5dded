pub mod settings;

pub use settings::{AppConfig, CacheSettings, ServerSettings, VisSettings};
