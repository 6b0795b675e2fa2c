//! Rate limiting middleware

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use ecare_core::{DoctorList, Envelope, Payload};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::InMemoryState};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiter state (shared across requests)
pub type SharedRateLimiter =
    Arc<RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>>;

/// Create a new rate limiter with specified requests per second (at least 1)
pub fn create_rate_limiter(requests_per_second: u32) -> SharedRateLimiter {
    let rps = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(request: Request<Body>, next: Next) -> Response {
    let limiter = request.extensions().get::<SharedRateLimiter>().cloned();

    if let Some(limiter) = limiter {
        if limiter.check().is_err() {
            tracing::warn!(path = %request.uri().path(), "Rate limit exceeded");
            return match request.uri().path() {
                "/api/suggest-doctor" => too_many_requests::<DoctorList>(),
                _ => too_many_requests::<()>(),
            };
        }
    }

    next.run(request).await
}

/// 429 carrying the failure envelope of the limited operation
fn too_many_requests<T: Payload>() -> Response {
    let envelope: Envelope<T> = Envelope::failure("Rate limit exceeded. Please try again later.");
    (StatusCode::TOO_MANY_REQUESTS, Json(envelope)).into_response()
}
