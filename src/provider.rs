use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Raw weatherstack `/current` envelope. Every block is optional because the
/// provider answers 200 even for errors, with an `error` block instead of data.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderResponse {
    pub location: Option<LocationBlock>,
    pub current: Option<CurrentConditions>,
    pub error: Option<ProviderErrorBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationBlock {
    pub name: String,
    pub country: String,
    pub region: String,
    pub lat: String,
    pub lon: String,
    pub localtime: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feelslike: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_dir: String,
    pub pressure: f64,
    pub uv_index: f64,
    pub visibility: f64,
    pub cloudcover: f64,
    #[serde(default)]
    pub weather_descriptions: Vec<String>,
    #[serde(default)]
    pub weather_icons: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBlock {
    pub code: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub info: Option<String>,
}

/// Transport-level failures are kept distinct from decode failures so the
/// orchestrator can map them to different user-visible kinds.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to weather provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("weather provider returned status {0}")]
    Status(StatusCode),

    #[error("failed to decode weather provider response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Whether provider credentials are available. Checked by the
    /// orchestrator before any network call is attempted.
    fn configured(&self) -> bool;

    /// Single-attempt fetch of current conditions for a city. No retries.
    async fn fetch_current(&self, city: &str) -> Result<ProviderResponse, FetchError>;
}

pub struct WeatherstackClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherstackClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherstackClient {
    fn configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    async fn fetch_current(&self, city: &str) -> Result<ProviderResponse, FetchError> {
        let access_key = self.api_key.as_deref().unwrap_or_default();

        info!("🌤️  Fetching current conditions for '{}'", city);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("access_key", access_key), ("query", city)])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.json().await.map_err(FetchError::Decode)
    }
}
