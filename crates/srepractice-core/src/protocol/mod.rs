//! HTTP payload contracts (JSON bodies) and the synthetic draws behind them.
//!
//! - `body`: serializable response bodies, field order matches the wire.
//! - `simulate`: random CPU/memory samples, coin-flip failures, slow delays.
//!
//! Everything here is pure: time and randomness are passed in, so the same
//! functions back both the server and deterministic tests.

pub mod body;
pub mod simulate;

pub use body::{
    ErrorBody, HealthBody, HomeBody, MetricsBody, SimulateOkBody, SlowBody, APP_NAME, APP_VERSION,
};

/// Round `v` to `decimals` places (half away from zero).
pub fn round_to(v: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}
