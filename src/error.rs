use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Everything a weather lookup can fail with, already classified for the HTTP
/// surface. Raw transport errors never leave the orchestrator.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No provider API key configured; checked before any network call.
    #[error("weather provider API key is not configured")]
    Misconfigured,

    /// The provider answered with an explicit error payload.
    #[error("weather provider rejected the request: {0}")]
    UpstreamRejected(String),

    /// The provider answered 2xx but the body was undecodable or incomplete.
    #[error("weather provider returned an invalid response")]
    UpstreamMalformed,

    /// Default kind: network failure, unknown city, provider outage.
    #[error("city not found or weather service unavailable")]
    NotFound,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            WeatherError::Misconfigured => {
                tracing::error!("WEATHER_API_KEY missing at fetch time");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch weather data".to_string(),
                )
            }
            WeatherError::UpstreamRejected(msg) => {
                tracing::warn!("provider rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            WeatherError::UpstreamMalformed => {
                tracing::warn!("provider response missing required data");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch weather data".to_string(),
                )
            }
            WeatherError::NotFound => (
                StatusCode::NOT_FOUND,
                "City not found or service unavailable".to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            WeatherError::Misconfigured.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WeatherError::UpstreamRejected("bad query".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WeatherError::UpstreamMalformed.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WeatherError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
