use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use weather_relay::cache::WeatherCache;
use weather_relay::config::Config;
use weather_relay::provider::{WeatherProvider, WeatherstackClient};
use weather_relay::ratelimit::RateLimiter;
use weather_relay::server::{router, AppState};
use weather_relay::weather::WeatherService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    if config.weather_api_key.is_none() {
        warn!("⚠️  WEATHER_API_KEY is not set; weather lookups will fail");
    }

    // Wire up provider, cache, and orchestrator
    let provider: Arc<dyn WeatherProvider> = Arc::new(WeatherstackClient::new(
        config.weather_api_url.clone(),
        config.weather_api_key.clone(),
    )?);
    let cache = Arc::new(WeatherCache::new(
        config.cache_capacity,
        config.cache_ttl_secs,
    ));
    let service = Arc::new(WeatherService::new(provider, cache));
    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit,
        Duration::from_secs(config.rate_window_secs),
    ));

    let state = AppState { service, limiter };
    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("🦀 Weather relay listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
