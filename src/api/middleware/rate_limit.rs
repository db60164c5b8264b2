//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates a rate limiter for the management API.
///
/// # Limits
///
/// - **Rate**: 5 requests per second
/// - **Burst**: 50 requests
///
/// Generous for a human-driven control surface while still bounding
/// accidental polling loops. Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address. The redirect endpoint itself is NOT rate limited;
/// it is the hot path tags hit.
///
/// # Example
///
/// ```rust,ignore
/// let api = api_routes().layer(rate_limit::layer());
/// ```
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(5)
            .burst_size(50)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
