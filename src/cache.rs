use crate::weather::WeatherReport;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

/// Derive the cache key for a city. Case variants collapse to one entry.
pub fn cache_key(city: &str) -> String {
    format!("weather:{}", city.trim().to_lowercase())
}

/// Bounded TTL cache of normalized weather reports, shared across requests.
pub struct WeatherCache {
    cache: Cache<String, WeatherReport>,
}

impl WeatherCache {
    pub fn new(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    pub async fn get(&self, key: &str) -> Option<WeatherReport> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: String, value: WeatherReport) {
        debug!("💾 Cache store: {}", key);
        self.cache.insert(key, value).await;
    }

    /// Presence check for the status endpoint. Unlike `get` this does not
    /// bump the entry's recency.
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_prefixed_and_lowercased() {
        assert_eq!(cache_key("London"), "weather:london");
        assert_eq!(cache_key("LONDON"), "weather:london");
        assert_eq!(cache_key("  New York "), "weather:new york");
    }

    #[test]
    fn case_variants_collapse_to_one_key() {
        assert_eq!(cache_key("Tokyo"), cache_key("tOkYo"));
    }

    #[tokio::test]
    async fn expired_entries_are_gone_from_presence_and_reads() {
        let cache = WeatherCache::new(100, 1);
        let key = cache_key("London");
        let report = WeatherReport {
            city: "London".to_string(),
            country: "United Kingdom".to_string(),
            region: "City of London, Greater London".to_string(),
            temperature: "15°C".to_string(),
            feels_like: "14°C".to_string(),
            description: "Partly cloudy".to_string(),
            humidity: "72%".to_string(),
            wind_speed: "10 km/h".to_string(),
            wind_direction: "SW".to_string(),
            pressure: "1015 hPa".to_string(),
            uv_index: 4.0,
            visibility: "10 km".to_string(),
            cloud_cover: "25%".to_string(),
            icon_url: String::new(),
            local_time: "2023-04-25 10:00".to_string(),
            coordinates: crate::weather::Coordinates {
                lat: "51.517".to_string(),
                lon: "-0.106".to_string(),
            },
            from_cache: false,
        };

        cache.insert(key.clone(), report).await;
        assert!(cache.contains(&key));
        assert!(cache.get(&key).await.is_some());

        tokio::time::sleep(Duration::from_millis(1300)).await;

        assert!(!cache.contains(&key));
        assert!(cache.get(&key).await.is_none());
    }
}
