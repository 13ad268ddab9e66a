//! Anti-abuse middleware for the public endpoints
//!
//! The live feed accepts anonymous posts, so the WebSocket endpoint gets
//! basic protections:
//! - Blocks curl/wget user agents (basic bot filtering)
//! - Requires a browser-style WebSocket upgrade (Sec-WebSocket-Key)
//! - Rate limiting per client IP (prevents connection flooding)

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, Response, StatusCode},
    middleware::Next,
};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

/// Sec-WebSocket-Key header (browsers always send this for WS upgrades)
const SEC_WEBSOCKET_KEY: &str = "sec-websocket-key";

/// Rate limiter state
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Map of key to (request count, window start)
    requests: Arc<RwLock<HashMap<String, (u32, Instant)>>>,
    /// Maximum requests per window
    max_requests: u32,
    /// Time window duration
    window: Duration,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(30, Duration::from_secs(10)) // 30 connections per 10 seconds
    }
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    /// Check if a request should be allowed.
    /// Returns true if allowed, false if rate limited.
    pub async fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut requests = self.requests.write().await;

        match requests.get_mut(key) {
            Some((count, window_start)) => {
                if now.duration_since(*window_start) > self.window {
                    // Window expired, start a new one
                    *count = 1;
                    *window_start = now;
                    true
                } else if *count < self.max_requests {
                    *count += 1;
                    true
                } else {
                    false
                }
            }
            None => {
                requests.insert(key.to_string(), (1, now));
                true
            }
        }
    }

    /// Drop stale entries so the map does not grow without bound
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut requests = self.requests.write().await;
        requests.retain(|_, (_, window_start)| now.duration_since(*window_start) <= self.window);
    }
}

/// Anti-abuse configuration
#[derive(Debug, Clone)]
pub struct AbuseConfig {
    /// Whether protections are active (ABUSE_PROTECTION env var, on by
    /// default)
    pub enabled: bool,
    pub limiter: RateLimiter,
}

impl AbuseConfig {
    pub fn from_env() -> Self {
        let enabled = std::env::var("ABUSE_PROTECTION")
            .map(|v| v != "0" && v.to_lowercase() != "false")
            .unwrap_or(true);

        if !enabled {
            tracing::warn!("Abuse protection DISABLED");
        }

        Self {
            enabled,
            limiter: RateLimiter::default(),
        }
    }
}

fn client_key(request: &Request<Body>) -> String {
    // Behind a proxy the forwarded address is the one that matters
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "direct".to_string())
}

fn is_blocked_user_agent(request: &Request<Body>) -> bool {
    request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|ua| {
            let ua = ua.to_lowercase();
            ua.contains("curl") || ua.contains("wget")
        })
        .unwrap_or(false)
}

/// Middleware guarding the WebSocket endpoint
pub async fn ws_abuse_middleware(
    State(config): State<Arc<AbuseConfig>>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    if !config.enabled {
        return next.run(request).await;
    }

    if is_blocked_user_agent(&request) {
        tracing::debug!("Blocked scripted user agent");
        return forbidden();
    }

    // Browsers always send Sec-WebSocket-Key on upgrade requests
    if !request.headers().contains_key(SEC_WEBSOCKET_KEY) {
        tracing::debug!("Blocked WS request without upgrade key");
        return forbidden();
    }

    let key = client_key(&request);
    if !config.limiter.check(&key).await {
        tracing::warn!("Rate limited client {}", key);
        return Response::builder()
            .status(StatusCode::TOO_MANY_REQUESTS)
            .body(Body::from("Too many requests"))
            .unwrap();
    }

    next.run(request).await
}

fn forbidden() -> Response<Body> {
    Response::builder()
        .status(StatusCode::FORBIDDEN)
        .body(Body::from("Forbidden"))
        .unwrap()
}
