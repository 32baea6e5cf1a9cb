//! Per-IP rate limiting for login and signup routes

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::state::AppState;

/// Request budget for one route
#[derive(Debug, Clone, Copy)]
pub struct Limit {
    pub route: &'static str,
    pub max_requests: u32,
    pub window: Duration,
}

pub const LOGIN_LIMIT: Limit = Limit {
    route: "login",
    max_requests: 5,
    window: Duration::from_secs(60),
};

pub const SIGNUP_LIMIT: Limit = Limit {
    route: "signup",
    max_requests: 3,
    window: Duration::from_secs(60),
};

/// Windows idle for longer than this are dropped by [`RateLimiter::cleanup`]
const STALE_AFTER: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct Window {
    started: Instant,
    hits: u32,
}

/// Fixed-window counters keyed by (route, client IP)
#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<(&'static str, String), Window>>>,
    /// Read the client from X-Forwarded-For (only behind a proxy that sets it)
    trust_forwarded_for: bool,
}

impl RateLimiter {
    pub fn new(trust_forwarded_for: bool) -> Self {
        Self {
            trust_forwarded_for,
            ..Self::default()
        }
    }

    /// Count a hit; `false` once the client is over budget for the window.
    pub async fn allow(&self, limit: Limit, client: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let window = windows
            .entry((limit.route, client.to_owned()))
            .or_insert(Window {
                started: now,
                hits: 0,
            });

        if now.duration_since(window.started) >= limit.window {
            window.started = now;
            window.hits = 0;
        }
        window.hits = window.hits.saturating_add(1);
        window.hits <= limit.max_requests
    }

    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.started) < STALE_AFTER);
        let removed = before - windows.len();
        if removed > 0 {
            tracing::debug!(removed, "Purged stale rate-limit windows");
        }
    }
}

/// Client IP: the peer address, or the first X-Forwarded-For entry when
/// the header is trusted. Without trust the header is client-controlled.
fn client_ip(request: &Request, trust_forwarded_for: bool) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .filter(|_| trust_forwarded_for)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_owned();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_owned(), |ci| ci.0.ip().to_string())
}

async fn enforce(
    state: &AppState,
    limit: Limit,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request, state.rate_limiter.trust_forwarded_for);
    if !state.rate_limiter.allow(limit, &ip).await {
        tracing::warn!(route = limit.route, ip = %ip, "Rate limit exceeded");
        return Err(AppError::new(ErrorCode::TooManyRequests)
            .with_detail("retry_after_secs", limit.window.as_secs()));
    }
    Ok(next.run(request).await)
}

pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    enforce(&state, LOGIN_LIMIT, request, next).await
}

pub async fn signup_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    enforce(&state, SIGNUP_LIMIT, request, next).await
}
