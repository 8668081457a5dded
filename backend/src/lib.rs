pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod pagination;
pub mod retry;
pub mod services;
pub mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::sync::Arc;

use crate::api::VisClient;
use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::server::ServerService;
use crate::telemetry::ProductionLogger;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: Option<u16>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env()?;
        let port = port.unwrap_or(config.server.port);
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_fetch(year: Option<i32>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let client = build_client()?;
        let response = client
            .fetch_tournaments(year)
            .await
            .context("Failed to fetch tournaments from VIS")?;
        print_json(&response)
    })
}

pub fn handle_detail(number: u32) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let client = build_client()?;
        let result = client
            .fetch_tournament_detail(number)
            .await
            .with_context(|| format!("Failed to fetch tournament {}", number))?;
        print_json(&result)
    })
}

fn build_client() -> Result<VisClient> {
    let config = AppConfig::from_env()?;
    VisClient::new(&config.vis, Arc::new(ProductionLogger::new()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
