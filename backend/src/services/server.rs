use anyhow::{Context, Result};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::api::VisClient;
use crate::config::AppConfig;
use crate::services::tournaments::TournamentService;
use crate::telemetry::ProductionLogger;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let logger = Arc::new(ProductionLogger::new());
        let client = VisClient::new(&self.config.vis, logger.clone())?;
        let service = TournamentService::new(client, self.config.cache.ttl, logger);

        let state = Arc::new(AppState {
            service,
            config: self.config.clone(),
        });

        let app = create_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
