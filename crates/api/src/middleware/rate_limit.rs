//! # Rate Limiting Middleware
//!
//! Fixed-window request quota keyed by client IP address and route.
//!
//! Each client gets a window per route that opens on its first request
//! there. Up to `limit` requests are admitted inside the window; later ones
//! are rejected with `429 Too Many Requests` until the window expires, so
//! polling one endpoint does not use up the quota of another. Windows live
//! in a [`DashMap`], and the check-and-increment runs under the map's
//! per-key entry lock, so concurrent requests from one client cannot
//! overshoot.
//!
//! Expired windows are only reset lazily when the same client returns;
//! [`spawn_cleanup_task`] evicts the rest periodically.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    Json,
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use slotbook_core::models::appointment::MessageResponse;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ApiState;

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Admitted; `remaining` more requests fit in the current window.
    Allowed { remaining: u32 },
    /// Rejected; the window reopens after `retry_after`.
    Rejected { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Windows are tracked per client address and route template.
type WindowKey = (IpAddr, String);

#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    windows: DashMap<WindowKey, Window>,
}

impl RateLimiter {
    pub fn new(limit: NonZeroU32, window: Duration) -> Self {
        Self {
            limit: limit.get(),
            window,
            windows: DashMap::new(),
        }
    }

    pub fn per_second(limit: NonZeroU32) -> Self {
        Self::new(limit, Duration::from_secs(1))
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of live `(client, route)` windows.
    pub fn tracked_windows(&self) -> usize {
        self.windows.len()
    }

    pub fn check(&self, client: IpAddr, route: &str) -> RateLimitDecision {
        self.check_at(client, route, Instant::now())
    }

    /// Counts one request from `client` to `route` at `now` and decides
    /// whether to admit it.
    pub fn check_at(&self, client: IpAddr, route: &str, now: Instant) -> RateLimitDecision {
        let key = (client, route.to_owned());
        let mut entry = self.windows.entry(key).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count < self.limit {
            entry.count += 1;
            RateLimitDecision::Allowed {
                remaining: self.limit - entry.count,
            }
        } else {
            RateLimitDecision::Rejected {
                retry_after: self.window.saturating_sub(elapsed),
            }
        }
    }

    /// Drops windows that expired before `now`. Returns how many were removed.
    pub fn evict_expired(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, window| now.saturating_duration_since(window.started) < self.window);
        before.saturating_sub(self.windows.len())
    }
}

/// Periodically evicts expired windows from the state's limiter.
pub fn spawn_cleanup_task(state: Arc<ApiState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = state.limiter.evict_expired(Instant::now());
            if removed > 0 {
                debug!("Evicted {} expired rate limit windows", removed);
            }
        }
    })
}

/// Resolves the client address; falls back to loopback when the server was
/// not started with connect info (e.g. in-process tests).
fn client_addr(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

fn too_many_requests(limit: u32, retry_after: Duration) -> Response {
    let message = MessageResponse::new(format!(
        "Too many requests. Limit is {limit} per second."
    ));
    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(message)).into_response();

    // Retry-After is whole seconds, rounded up
    let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(seconds.max(1)));

    response
}

/// Route template the request matched, e.g. `/cancel_appointment/:appointment_id`,
/// so every id shares one window. Falls back to the raw path.
fn route_of(request: &Request) -> &str {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or_else(|| request.uri().path())
}

/// Axum middleware enforcing the per-client, per-route quota.
pub async fn rate_limit(State(state): State<Arc<ApiState>>, request: Request, next: Next) -> Response {
    let client = client_addr(&request);
    let route = route_of(&request);

    match state.limiter.check(client, route) {
        RateLimitDecision::Allowed { .. } => next.run(request).await,
        RateLimitDecision::Rejected { retry_after } => {
            warn!(%client, route, "Rate limit exceeded");
            too_many_requests(state.limiter.limit(), retry_after)
        }
    }
}
