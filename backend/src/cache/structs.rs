use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::etag::generate_etag;

/// Snapshot stored under one cache key
#[derive(Debug)]
pub struct CacheEntry<T> {
    pub data: Arc<T>,
    pub timestamp: DateTime<Utc>,
    pub etag: String,
    pub year: Option<i32>,
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            timestamp: self.timestamp,
            etag: self.etag.clone(),
            year: self.year,
        }
    }
}

impl<T: Serialize> CacheEntry<T> {
    /// Build an entry whose ETag is computed from `data`
    pub fn new(data: T, year: Option<i32>, timestamp: DateTime<Utc>) -> Result<Self, serde_json::Error> {
        let etag = generate_etag(&data)?;
        Ok(Self {
            data: Arc::new(data),
            timestamp,
            etag,
            year,
        })
    }
}

/// Key for a tournament list: `year-{year}` or `all`
pub fn cache_key(year: Option<i32>) -> String {
    match year {
        Some(year) => format!("year-{}", year),
        None => "all".to_string(),
    }
}

/// In-memory cache with a fixed time-to-live.
///
/// Entries are replaced wholesale by `set`. The lock is only held for map
/// access, so concurrent misses for one key may each refetch upstream.
pub struct TtlCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Entry under `key`, fresh or not
    pub async fn get(&self, key: &str) -> Option<CacheEntry<T>> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn set(&self, key: &str, entry: CacheEntry<T>) {
        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// An entry is fresh while `now - timestamp < ttl`
    pub fn is_valid(&self, entry: &CacheEntry<T>, now: DateTime<Utc>) -> bool {
        (now - entry.timestamp)
            .to_std()
            .map_or(true, |age| age < self.ttl)
    }

    /// Entry under `key` if it is still fresh at `now`
    pub async fn get_fresh(&self, key: &str, now: DateTime<Utc>) -> Option<CacheEntry<T>> {
        self.get(key).await.filter(|entry| self.is_valid(entry, now))
    }

    /// Number of stored entries, stale ones included
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}
