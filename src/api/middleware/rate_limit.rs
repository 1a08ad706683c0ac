//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-peer-IP rate limiting layer.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for the API routes.
///
/// `per_second` is the replenish interval in seconds for one token and
/// `burst_size` the bucket capacity. Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// Rate limits are applied per client IP extracted from the socket peer
/// address, so the server must be started with connect info.
///
/// # Errors
///
/// Returns an error if either value is zero.
pub fn layer(per_second: u64, burst_size: u32) -> Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
        .context("Rate limit period and burst size must be greater than zero")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_limits() {
        assert!(layer(2, 100).is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(layer(0, 100).is_err());
        assert!(layer(2, 0).is_err());
    }
}
