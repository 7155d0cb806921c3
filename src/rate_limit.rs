//! Fixed-window request limiting per client address
//!
//! Each client gets a counter that resets when its window expires. Responses
//! carry the standard `RateLimit-*` headers; requests over the limit get a
//! `429` with a plain-text message.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

/// How often expired windows are swept from the table
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Outcome of counting one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the client's window resets
    pub reset_after: Duration,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
struct Table {
    windows: HashMap<String, Window>,
    last_cleanup: Instant,
}

/// Rate limiter shared between requests
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    message: &'static str,
    table: Arc<Mutex<Table>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    #[must_use]
    pub fn new(max_requests: u32, window: Duration, message: &'static str) -> Self {
        Self {
            max_requests,
            window,
            message,
            table: Arc::new(Mutex::new(Table {
                windows: HashMap::new(),
                last_cleanup: Instant::now(),
            })),
        }
    }

    /// Count a request from `client` now
    pub fn check(&self, client: &str) -> Decision {
        self.check_at(client, Instant::now())
    }

    /// Count a request from `client` at `now`
    pub fn check_at(&self, client: &str, now: Instant) -> Decision {
        let mut table = self
            .table
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        self.cleanup_expired(&mut table, now);

        let window = table
            .windows
            .entry(client.to_string())
            .or_insert(Window {
                started: now,
                count: 0,
            });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        window.count = window.count.saturating_add(1);
        let elapsed = now.duration_since(window.started);

        Decision {
            allowed: window.count <= self.max_requests,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(window.count),
            reset_after: self.window.saturating_sub(elapsed),
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .windows
            .len()
    }

    /// Drop windows that have fully expired
    fn cleanup_expired(&self, table: &mut Table, now: Instant) {
        if now.duration_since(table.last_cleanup) < CLEANUP_INTERVAL {
            return;
        }
        let window = self.window;
        let before = table.windows.len();
        table
            .windows
            .retain(|_, w| now.duration_since(w.started) < window);
        table.last_cleanup = now;
        debug!(
            "Rate limiter dropped {} expired client windows",
            before - table.windows.len()
        );
    }
}

fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.ip().to_string())
}

fn apply_headers(headers: &mut HeaderMap, decision: &Decision) {
    // Round the reset up so clients never retry early
    let reset = decision.reset_after.as_secs()
        + u64::from(decision.reset_after.subsec_nanos() > 0);
    headers.insert("ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert("ratelimit-reset", HeaderValue::from(reset));
    if !decision.allowed {
        headers.insert("retry-after", HeaderValue::from(reset));
    }
}

/// Middleware enforcing `limiter` on every request it wraps
pub async fn enforce(State(limiter): State<RateLimiter>, request: Request, next: Next) -> Response {
    let client = client_key(&request);
    let decision = limiter.check(&client);

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        warn!(client = %client, path = %request.uri().path(), "Rate limit exceeded");
        (StatusCode::TOO_MANY_REQUESTS, limiter.message).into_response()
    };

    apply_headers(response.headers_mut(), &decision);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(15 * 60);

    #[test]
    fn test_rate_limiter() {
        let limiter = RateLimiter::new(2, WINDOW, "slow down");
        let now = Instant::now();

        // Should allow first 2 requests
        assert!(limiter.check_at("10.0.0.1", now).allowed);
        let second = limiter.check_at("10.0.0.1", now);
        assert!(second.allowed);
        assert_eq!(second.remaining, 0);

        // Should deny 3rd request
        let third = limiter.check_at("10.0.0.1", now);
        assert!(!third.allowed);
        assert_eq!(third.remaining, 0);
        assert_eq!(third.reset_after, WINDOW);
    }

    #[test]
    fn test_hundred_and_first_request_is_limited() {
        let limiter = RateLimiter::new(100, WINDOW, "slow down");
        let now = Instant::now();
        for i in 1..=100 {
            let decision = limiter.check_at("client", now + Duration::from_secs(i));
            assert!(decision.allowed, "request {i} was limited");
        }
        assert!(!limiter.check_at("client", now + Duration::from_secs(101)).allowed);
    }

    #[test]
    fn test_clients_are_counted_separately() {
        let limiter = RateLimiter::new(1, WINDOW, "slow down");
        let now = Instant::now();
        assert!(limiter.check_at("a", now).allowed);
        assert!(!limiter.check_at("a", now).allowed);
        assert!(limiter.check_at("b", now).allowed);
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(1, WINDOW, "slow down");
        let now = Instant::now();
        assert!(limiter.check_at("a", now).allowed);

        let later = limiter.check_at("a", now + Duration::from_secs(600));
        assert!(!later.allowed);
        assert_eq!(later.reset_after, Duration::from_secs(300));

        let next_window = limiter.check_at("a", now + WINDOW);
        assert!(next_window.allowed);
        assert_eq!(next_window.reset_after, WINDOW);
    }

    #[test]
    fn test_expired_windows_are_dropped() {
        let limiter = RateLimiter::new(5, Duration::from_secs(30), "slow down");
        let now = Instant::now();
        limiter.check_at("a", now);
        limiter.check_at("b", now);
        assert_eq!(limiter.tracked_clients(), 2);

        limiter.check_at("c", now + Duration::from_secs(120));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_headers() {
        let mut headers = HeaderMap::new();
        let decision = Decision {
            allowed: false,
            limit: 100,
            remaining: 0,
            reset_after: Duration::from_millis(1500),
        };
        apply_headers(&mut headers, &decision);
        assert_eq!(headers["ratelimit-limit"], "100");
        assert_eq!(headers["ratelimit-remaining"], "0");
        assert_eq!(headers["ratelimit-reset"], "2");
        assert_eq!(headers["retry-after"], "2");
    }
}
