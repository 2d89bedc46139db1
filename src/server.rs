use crate::error::WeatherError;
use crate::ratelimit::{self, RateLimiter};
use crate::weather::{WeatherReport, WeatherService};
use axum::{
    extract::{Path, Request, State},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
    pub limiter: Arc<RateLimiter>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub is_cached: bool,
    pub requests_remaining: u32,
}

/// Build the application router. The rate limit applies to weather lookups
/// only; the cache-status route is exempt.
pub fn router(state: AppState) -> Router {
    let limited = Router::new()
        .route("/weather/:city", get(weather_by_city))
        .route_layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            ratelimit::enforce,
        ));

    Router::new()
        .route("/weather/cache-status/:city", get(cache_status))
        .merge(limited)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn weather_by_city(
    Path(city): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<WeatherReport>, WeatherError> {
    let report = state.service.get_weather(&city).await?;
    Ok(Json(report))
}

async fn cache_status(
    Path(city): Path<String>,
    State(state): State<AppState>,
    request: Request,
) -> Json<CacheStatus> {
    let is_cached = state.service.cache_status(&city);
    let remaining = state
        .limiter
        .remaining(ratelimit::client_key(&request))
        .await;

    Json(CacheStatus {
        is_cached,
        requests_remaining: remaining,
    })
}
