use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct VisSettings {
    pub base_url: String,
    pub app_id: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub base_retry_delay: Duration,
    pub max_retry_delay: Duration,
}

impl Default for VisSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.fivb.org/Vis2009/XmlRequest.asmx".to_string(),
            app_id: String::new(),
            user_agent: "BeachTournaments/1.0".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            base_retry_delay: Duration::from_millis(1000),
            max_retry_delay: Duration::from_millis(10_000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub vis: VisSettings,
    pub cache: CacheSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            vis: VisSettings::default(),
            cache: CacheSettings::default(),
            server: ServerSettings::default(),
        }
    }

    /// Defaults overridden by `VIS_*`, `CACHE_TTL_SECS` and `PORT` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(url) = lookup("VIS_BASE_URL") {
            config.vis.base_url = url;
        }
        if let Some(app_id) = lookup("VIS_APP_ID") {
            config.vis.app_id = app_id;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "VIS_TIMEOUT_SECS")? {
            config.vis.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = parse_var::<u32, _>(&lookup, "VIS_MAX_RETRIES")? {
            config.vis.max_retries = retries;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "CACHE_TTL_SECS")? {
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(port) = parse_var::<u16, _>(&lookup, "PORT")? {
            config.server.port = port;
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().parse::<T>())
        .transpose()
        .with_context(|| format!("Invalid value for {}", key))
}
