use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::config::VisSettings;
use crate::errors::RawError;

const APP_ID_HEADER: &str = "X-FIVB-App-ID";
const XML_CONTENT_TYPE: &str = "application/xml";

/// Status and body of an upstream answer, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one XML request document to VIS
#[async_trait]
pub trait VisTransport: Send + Sync {
    async fn post_xml(&self, body: String) -> Result<TransportResponse, RawError>;
}

/// reqwest-backed transport used in production
pub struct ReqwestTransport {
    client: Client,
    url: String,
    app_id: String,
}

impl ReqwestTransport {
    pub fn new(settings: &VisSettings) -> Result<Self> {
        let client = Self::build_client(&settings.user_agent)?;

        Ok(Self {
            client,
            url: settings.base_url.clone(),
            app_id: settings.app_id.clone(),
        })
    }

    fn build_client(user_agent: &str) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")
    }
}

#[async_trait]
impl VisTransport for ReqwestTransport {
    async fn post_xml(&self, body: String) -> Result<TransportResponse, RawError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .header(APP_ID_HEADER, &self.app_id)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
