use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_PROVIDER_URL: &str = "http://api.weatherstack.com/current";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub weather_api_key: Option<String>,
    pub weather_api_url: String,
    pub port: u16,
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
    pub rate_limit: u32,
    pub rate_window_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let weather_api_key = env::var("WEATHER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty() && key != "YOUR_API_KEY_HERE");

        let weather_api_url =
            env::var("WEATHER_API_URL").unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let cache_capacity = env::var("CACHE_CAPACITY")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .unwrap_or(100);

        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .unwrap_or_else(|_| "1800".to_string())
            .parse()
            .unwrap_or(1800);

        let rate_limit = env::var("RATE_LIMIT")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        let rate_window_secs = env::var("RATE_WINDOW_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60);

        Ok(Self {
            weather_api_key,
            weather_api_url,
            port,
            cache_capacity,
            cache_ttl_secs,
            rate_limit,
            rate_window_secs,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            weather_api_url: DEFAULT_PROVIDER_URL.to_string(),
            port: 3000,
            cache_capacity: 100,
            cache_ttl_secs: 1800,
            rate_limit: 5,
            rate_window_secs: 60,
        }
    }
}
