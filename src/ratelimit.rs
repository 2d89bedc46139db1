use crate::error::ErrorResponse;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

/// Who a request is counted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKey {
    Addr(IpAddr),
    /// Fallback bucket when the server runs without connect-info.
    Shared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Denied { retry_after: Duration },
}

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter, one window per client.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<ClientKey, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request against the client's current window.
    pub async fn check(&self, client: ClientKey) -> Decision {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let window = windows.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count < self.max_requests {
            window.count += 1;
            Decision::Allowed {
                remaining: self.max_requests - window.count,
            }
        } else {
            Decision::Denied {
                retry_after: self.window.saturating_sub(now.duration_since(window.started)),
            }
        }
    }

    /// Permits left in the client's window without consuming one.
    pub async fn remaining(&self, client: ClientKey) -> u32 {
        let windows = self.windows.lock().await;
        match windows.get(&client) {
            Some(window) if Instant::now().duration_since(window.started) < self.window => {
                self.max_requests.saturating_sub(window.count)
            }
            _ => self.max_requests,
        }
    }
}

pub fn client_key(request: &Request) -> ClientKey {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| ClientKey::Addr(addr.ip()))
        .unwrap_or(ClientKey::Shared)
}

/// Route-level guard: rejected requests never reach the handler.
pub async fn enforce(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(&request);

    match limiter.check(client).await {
        Decision::Allowed { .. } => next.run(request).await,
        Decision::Denied { retry_after } => {
            warn!("🚦 Rate limit exceeded for {:?}", client);
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(
                    header::RETRY_AFTER,
                    retry_after.as_secs().max(1).to_string(),
                )],
                Json(ErrorResponse {
                    error: "Too many requests".to_string(),
                }),
            )
                .into_response()
        }
    }
}
