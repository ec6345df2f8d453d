//! Rate limiting middleware.
//!
//! In-memory fixed-window limiter keyed by client IP. Mounted on the login
//! route to slow down password guessing.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window: Duration::from_secs(60),
        }
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    state: Arc<Mutex<HashMap<IpAddr, Window>>>,
}

struct Window {
    count: u32,
    started: Instant,
}

#[derive(Debug, PartialEq, Eq)]
enum Decision {
    Allowed,
    Exceeded { retry_after: Duration },
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn check(&self, ip: IpAddr, now: Instant) -> Decision {
        let mut state = self.state.lock();
        let window = state.entry(ip).or_insert(Window {
            count: 0,
            started: now,
        });

        if now.duration_since(window.started) >= self.config.window {
            window.count = 0;
            window.started = now;
        }
        window.count += 1;

        if window.count > self.config.max_requests {
            let reset_at = window.started + self.config.window;
            Decision::Exceeded {
                retry_after: reset_at.saturating_duration_since(now),
            }
        } else {
            Decision::Allowed
        }
    }

    /// Drop windows idle for two periods. Returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let stale_after = self.config.window * 2;
        let mut state = self.state.lock();
        let before = state.len();
        state.retain(|_, w| now.duration_since(w.started) < stale_after);
        before - state.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.state.lock().len()
    }
}

/// Rejects with 429 once a client IP exhausts its window.
///
/// Without connect info every caller shares the unspecified address bucket.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = connect_info
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    match limiter.check(ip, Instant::now()) {
        Decision::Allowed => next.run(request).await,
        Decision::Exceeded { retry_after } => {
            // Round up so clients never retry a moment too early
            let retry_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            warn!(
                ip = %ip,
                path = %request.uri().path(),
                retry_after_secs = retry_secs,
                "Rate limit exceeded"
            );

            (
                StatusCode::TOO_MANY_REQUESTS,
                [("Retry-After", retry_secs.to_string())],
                Json(json!({
                    "error": "rate_limit_exceeded",
                    "message": "Too many attempts. Please slow down.",
                    "retry_after_seconds": retry_secs,
                })),
            )
                .into_response()
        }
    }
}
