use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{FallbackResult, VisClient};
use crate::cache::{cache_key, CacheEntry, TtlCache};
use crate::domain::{DataSource, Tournament, TournamentDetail};
use crate::errors::ApiError;
use crate::telemetry::ProductionLogger;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Upstream(#[from] ApiError),
    #[error("Failed to build cache entry: {0}")]
    Cache(#[from] serde_json::Error),
}

/// Tournament list with where it came from
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub entry: CacheEntry<Vec<Tournament>>,
    pub cache_hit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub lists: usize,
    pub details: usize,
}

/// Cache-fronted access to VIS tournament data
pub struct TournamentService {
    client: VisClient,
    lists: TtlCache<Vec<Tournament>>,
    details: TtlCache<FallbackResult<TournamentDetail>>,
    logger: Arc<ProductionLogger>,
}

impl TournamentService {
    pub fn new(client: VisClient, ttl: Duration, logger: Arc<ProductionLogger>) -> Self {
        Self {
            client,
            lists: TtlCache::new(ttl),
            details: TtlCache::new(ttl),
            logger,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.lists.ttl()
    }

    /// Full tournament list for `year` (or all years), from cache while fresh
    pub async fn tournaments(&self, year: Option<i32>, now: DateTime<Utc>) -> Result<ListSnapshot, ServiceError> {
        let key = cache_key(year);

        if let Some(entry) = self.lists.get_fresh(&key, now).await {
            self.logger.log_cache(&key, true);
            return Ok(ListSnapshot { entry, cache_hit: true });
        }
        self.logger.log_cache(&key, false);

        let started = Instant::now();
        let response = self.client.fetch_tournaments(year).await?;
        self.logger.log_performance("fetch_tournaments", started.elapsed());

        let entry = CacheEntry::new(response.tournaments, year, now)?;
        self.lists.set(&key, entry.clone()).await;
        info!("Cached {} tournaments under {}", entry.data.len(), key);

        Ok(ListSnapshot { entry, cache_hit: false })
    }

    /// One tournament's detail; only complete primary results are cached
    pub async fn tournament_detail(
        &self,
        number: u32,
        now: DateTime<Utc>,
    ) -> Result<FallbackResult<TournamentDetail>, ApiError> {
        let key = format!("tournament-{}", number);

        if let Some(entry) = self.details.get_fresh(&key, now).await {
            self.logger.log_cache(&key, true);
            return Ok(entry.data.cached_copy());
        }
        self.logger.log_cache(&key, false);

        let result = self.client.fetch_tournament_detail(number).await?;

        if result.source == DataSource::Primary {
            match CacheEntry::new(result.clone(), None, now) {
                Ok(entry) => self.details.set(&key, entry).await,
                Err(e) => warn!("Failed to cache tournament {}: {:?}", number, e),
            }
        }

        Ok(result)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        CacheStats {
            lists: self.lists.entry_count().await,
            details: self.details.entry_count().await,
        }
    }

    pub fn logger(&self) -> &ProductionLogger {
        &self.logger
    }
}
