use crate::cache::{cache_key, WeatherCache};
use crate::error::WeatherError;
use crate::provider::{CurrentConditions, FetchError, LocationBlock, WeatherProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: String,
    pub lon: String,
}

/// Stable output schema, decoupled from the provider's wire format. Numeric
/// conditions are pre-formatted with unit suffixes; only the UV index stays
/// numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub region: String,
    pub temperature: String,
    pub feels_like: String,
    pub description: String,
    pub humidity: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub pressure: String,
    pub uv_index: f64,
    pub visibility: String,
    pub cloud_cover: String,
    pub icon_url: String,
    pub local_time: String,
    pub coordinates: Coordinates,
    /// Set only on cache-hit responses; never stored as true in the cache.
    #[serde(default, skip_serializing_if = "is_false")]
    pub from_cache: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Pure mapping from provider blocks to the output schema. Total over any
/// decoded response: empty lists fall back to placeholders.
pub fn normalize(location: &LocationBlock, current: &CurrentConditions) -> WeatherReport {
    WeatherReport {
        city: location.name.clone(),
        country: location.country.clone(),
        region: location.region.clone(),
        temperature: format!("{}°C", current.temperature),
        feels_like: format!("{}°C", current.feelslike),
        description: current
            .weather_descriptions
            .first()
            .cloned()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        humidity: format!("{}%", current.humidity),
        wind_speed: format!("{} km/h", current.wind_speed),
        wind_direction: current.wind_dir.clone(),
        pressure: format!("{} hPa", current.pressure),
        uv_index: current.uv_index,
        visibility: format!("{} km", current.visibility),
        cloud_cover: format!("{}%", current.cloudcover),
        icon_url: current.weather_icons.first().cloned().unwrap_or_default(),
        local_time: location.localtime.clone(),
        coordinates: Coordinates {
            lat: location.lat.clone(),
            lon: location.lon.clone(),
        },
        from_cache: false,
    }
}

/// Cache-then-fetch orchestrator. Owns nothing global: the cache and provider
/// are injected so tests can substitute both.
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    cache: Arc<WeatherCache>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, cache: Arc<WeatherCache>) -> Self {
        Self { provider, cache }
    }

    pub async fn get_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let key = cache_key(city);

        if let Some(mut report) = self.cache.get(&key).await {
            info!("📦 Cache hit for {}", key);
            report.from_cache = true;
            return Ok(report);
        }

        if !self.provider.configured() {
            return Err(WeatherError::Misconfigured);
        }

        let response = match self.provider.fetch_current(city.trim()).await {
            Ok(response) => response,
            Err(FetchError::Decode(err)) => {
                warn!("❌ Undecodable provider response: {}", err);
                return Err(WeatherError::UpstreamMalformed);
            }
            Err(err) => {
                warn!("❌ Provider fetch failed: {}", err);
                return Err(WeatherError::NotFound);
            }
        };

        if let Some(block) = response.error {
            let message = block
                .info
                .unwrap_or_else(|| "weather provider rejected the request".to_string());
            return Err(WeatherError::UpstreamRejected(message));
        }

        let (location, current) = match (response.location, response.current) {
            (Some(location), Some(current)) => (location, current),
            _ => {
                warn!("❌ Provider response missing location or current block");
                return Err(WeatherError::UpstreamMalformed);
            }
        };

        let report = normalize(&location, &current);

        // Best-effort write-through; the freshly built report is returned
        // regardless.
        self.cache.insert(key, report.clone()).await;

        Ok(report)
    }

    /// Key presence only; never touches the provider.
    pub fn cache_status(&self, city: &str) -> bool {
        self.cache.contains(&cache_key(city))
    }
}
