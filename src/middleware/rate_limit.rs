//! Global request rate limiting
//!
//! The demo routes are a fuzzing target and get hammered; a single shared
//! quota keeps one client from starving the process.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde_json::json;
use std::num::NonZeroU32;
use std::sync::Arc;

pub type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Build a shared limiter from configured requests-per-second and burst size
pub fn build_limiter(requests_per_second: u32, burst_size: u32) -> SharedRateLimiter {
    let rps = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
    let burst = NonZeroU32::new(burst_size).unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_second(rps).allow_burst(burst)))
}

/// Reject requests above the shared quota with 429
pub async fn rate_limit(
    State(limiter): State<SharedRateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    if limiter.check().is_err() {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests" })),
        )
            .into_response();
    }

    next.run(request).await
}
