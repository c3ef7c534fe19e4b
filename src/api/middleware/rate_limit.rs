//! Per-client rate limiting using a token bucket.
//!
//! Clients are keyed by the socket peer address, or by the forwarded client
//! address (`X-Forwarded-For`, `X-Real-IP`, `Forwarded`) when the service runs
//! behind a trusted reverse proxy. Requests exceeding the limit receive
//! `429 Too Many Requests`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower::util::Either;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type PeerLayer = GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;
type ProxiedLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiting layer keyed by client IP.
pub type RateLimitLayer = Either<PeerLayer, ProxiedLayer>;

/// Rate limiter for pages and the auth forms.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
pub fn layer(behind_proxy: bool) -> RateLimitLayer {
    build(2, 100, behind_proxy)
}

/// Stricter rate limiter for the JSON API.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 30 requests
pub fn secure_layer(behind_proxy: bool) -> RateLimitLayer {
    build(1, 30, behind_proxy)
}

fn build(per_second: u64, burst_size: u32, behind_proxy: bool) -> RateLimitLayer {
    if behind_proxy {
        let conf = GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit period and burst are non-zero");

        Either::Right(GovernorLayer::new(Arc::new(conf)))
    } else {
        let conf = GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit period and burst are non-zero");

        Either::Left(GovernorLayer::new(Arc::new(conf)))
    }
}
