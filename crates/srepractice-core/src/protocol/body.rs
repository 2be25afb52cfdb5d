//! JSON response bodies.
//!
//! Field declaration order is the serialized key order.

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "SRE Practice App";
pub const APP_VERSION: &str = "1.0.0";

/// `GET /`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeBody {
    pub app: String,
    pub version: String,
    pub status: String,
}

impl Default for HomeBody {
    fn default() -> Self {
        Self {
            app: APP_NAME.into(),
            version: APP_VERSION.into(),
            status: "running".into(),
        }
    }
}

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    /// Seconds since process start, 2 decimals.
    pub uptime_seconds: f64,
    pub total_requests: u64,
}

/// `GET /metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBody {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub uptime_seconds: f64,
    pub request_count: u64,
}

/// Failure body, shared by the simulated 500.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

/// `GET /simulate/error` success branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateOkBody {
    pub status: String,
    pub message: String,
}

/// `GET /simulate/slow`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowBody {
    pub status: String,
    pub response_time_seconds: f64,
}
