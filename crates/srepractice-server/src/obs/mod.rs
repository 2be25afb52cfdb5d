//! Lightweight in-process observability.
//!
//! Metrics are stored as atomics, recorded by the request-tracking
//! middleware, and rendered by the `/prometheus` handler.

pub mod metrics;
pub mod middleware;

pub use metrics::AppMetrics;
pub use middleware::{catch_panic_layer, track_requests};
