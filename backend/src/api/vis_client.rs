use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::api::fallback::{self, FallbackResult};
use crate::api::{parsers, request};
use crate::config::VisSettings;
use crate::domain::{TournamentDetail, VisResponse};
use crate::errors::{categorize, ApiError, Endpoint, ErrorContext, RawError};
use crate::http::{ReqwestTransport, VisTransport};
use crate::retry::{is_retryable, Backoff};
use crate::telemetry::ProductionLogger;

/// VIS XML API client
pub struct VisClient {
    transport: Arc<dyn VisTransport>,
    timeout: Duration,
    max_retries: u32,
    backoff: Backoff,
    logger: Arc<ProductionLogger>,
}

impl VisClient {
    /// Create a client talking to the configured VIS endpoint over HTTP
    pub fn new(settings: &VisSettings, logger: Arc<ProductionLogger>) -> Result<Self> {
        let transport = ReqwestTransport::new(settings)?;
        Ok(Self::with_transport(Arc::new(transport), settings, logger))
    }

    pub fn with_transport(
        transport: Arc<dyn VisTransport>,
        settings: &VisSettings,
        logger: Arc<ProductionLogger>,
    ) -> Self {
        Self {
            transport,
            timeout: settings.timeout,
            max_retries: settings.max_retries,
            backoff: Backoff::new(settings.base_retry_delay, settings.max_retry_delay),
            logger,
        }
    }

    /// Fetch the tournament list, optionally for one year
    pub async fn fetch_tournaments(&self, year: Option<i32>) -> Result<VisResponse, ApiError> {
        let body = request::tournament_list_request(year);

        let parsed = self
            .execute(Endpoint::TournamentList, body, ErrorContext::new(), |xml| {
                parsers::parse_tournament_list(xml).map_err(RawError::Parse)
            })
            .await?;

        info!(
            "Fetched {} tournaments from VIS for {}",
            parsed.tournaments.len(),
            year.map_or_else(|| "all years".to_string(), |y| y.to_string())
        );

        Ok(VisResponse {
            total_count: parsed.tournaments.len(),
            tournaments: parsed.tournaments,
            last_updated: Utc::now(),
        })
    }

    /// Fetch the enhanced record for one tournament.
    ///
    /// Failures that call for a fallback are answered from the basic list
    /// endpoint instead; only failures that cannot be degraded are returned
    /// as errors.
    pub async fn fetch_tournament_detail(
        &self,
        number: u32,
    ) -> Result<FallbackResult<TournamentDetail>, ApiError> {
        let body = request::tournament_detail_request(number);
        let context = ErrorContext::for_tournament(number);

        let primary = self
            .execute(Endpoint::TournamentDetail, body, context, |xml| {
                parsers::parse_tournament_detail(xml, number)
                    .map_err(RawError::Parse)?
                    .ok_or_else(|| RawError::Missing(format!("No tournament with number {}", number)))
            })
            .await;

        match primary {
            Ok(detail) => Ok(FallbackResult::primary(detail)),
            Err(error) if error.requires_fallback() => fallback::resolve(self, number, error).await,
            Err(error) => Err(error),
        }
    }

    /// Fetch the basic record for one tournament from the list endpoint
    pub(crate) async fn fetch_fallback_detail(
        &self,
        number: u32,
    ) -> Result<Option<TournamentDetail>, ApiError> {
        let body = request::tournament_fallback_request(number);
        let context = ErrorContext::for_tournament(number);

        self.execute(Endpoint::TournamentFallback, body, context, |xml| {
            parsers::parse_tournament_detail(xml, number).map_err(RawError::Parse)
        })
        .await
    }

    pub(crate) fn logger(&self) -> &ProductionLogger {
        &self.logger
    }

    /// Send one request document, retrying per the retry policy
    async fn execute<T, F>(
        &self,
        endpoint: Endpoint,
        body: String,
        context: ErrorContext,
        parse: F,
    ) -> Result<T, ApiError>
    where
        F: Fn(&str) -> Result<T, RawError>,
    {
        let mut attempt = 0;

        loop {
            let error = match self.attempt_once(endpoint, &body, &parse).await {
                Ok(value) => return Ok(value),
                Err(raw) => categorize(raw, endpoint, context.clone().with_attempt(attempt)),
            };

            self.logger.log_error(&error);

            if !is_retryable(&error, attempt, self.max_retries) {
                return Err(error);
            }

            let delay = self.backoff.wait(attempt).await;
            self.logger.log_retry(endpoint, attempt, delay);
            attempt += 1;
        }
    }

    async fn attempt_once<T, F>(&self, endpoint: Endpoint, body: &str, parse: &F) -> Result<T, RawError>
    where
        F: Fn(&str) -> Result<T, RawError>,
    {
        let started = Instant::now();
        let outcome = timeout(self.timeout, self.transport.post_xml(body.to_string())).await;
        let elapsed = started.elapsed();

        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(raw)) => {
                self.logger.log_network_event(endpoint, None, elapsed);
                return Err(raw);
            }
            Err(_) => {
                self.logger.log_network_event(endpoint, None, elapsed);
                return Err(RawError::Timeout(self.timeout));
            }
        };

        self.logger.log_network_event(endpoint, Some(response.status), elapsed);
        self.logger.log_performance(&endpoint.to_string(), elapsed);

        if !response.is_success() {
            return Err(RawError::Status {
                status: response.status,
                message: String::new(),
            });
        }

        parse(&response.body)
    }
}
