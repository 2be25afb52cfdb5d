//! Synthetic draws behind `/metrics` and `/simulate/*`.

use std::time::Duration;

use super::body::{ErrorBody, HealthBody, MetricsBody, SimulateOkBody, SlowBody};
use super::round_to;
use crate::random::RandomSource;

/// Bounds of the simulated CPU percentage.
pub const CPU_PERCENT_RANGE: (f64, f64) = (10.0, 80.0);
/// Bounds of the simulated memory percentage.
pub const MEMORY_PERCENT_RANGE: (f64, f64) = (30.0, 70.0);

pub const DEFAULT_FAILURE_RATE: f64 = 0.5;
pub const DEFAULT_SLOW_MIN: Duration = Duration::from_millis(100);
pub const DEFAULT_SLOW_MAX: Duration = Duration::from_millis(3000);

pub fn health(uptime: Duration, total_requests: u64) -> HealthBody {
    HealthBody {
        status: "healthy".into(),
        uptime_seconds: round_to(uptime.as_secs_f64(), 2),
        total_requests,
    }
}

/// Draw one CPU/memory sample. Nothing is persisted between calls.
pub fn metrics_sample(
    rng: &dyn RandomSource,
    uptime: Duration,
    request_count: u64,
) -> MetricsBody {
    let cpu = rng.uniform(CPU_PERCENT_RANGE.0, CPU_PERCENT_RANGE.1);
    let mem = rng.uniform(MEMORY_PERCENT_RANGE.0, MEMORY_PERCENT_RANGE.1);
    MetricsBody {
        cpu_percent: round_to(cpu, 2).clamp(CPU_PERCENT_RANGE.0, CPU_PERCENT_RANGE.1),
        memory_percent: round_to(mem, 2).clamp(MEMORY_PERCENT_RANGE.0, MEMORY_PERCENT_RANGE.1),
        uptime_seconds: round_to(uptime.as_secs_f64(), 2),
        request_count,
    }
}

/// Result of the `/simulate/error` coin flip.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorOutcome {
    Failed(ErrorBody),
    Passed(SimulateOkBody),
}

impl ErrorOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorOutcome::Failed(b) => b.code,
            ErrorOutcome::Passed(_) => 200,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ErrorOutcome::Failed(_))
    }
}

/// Fail when the draw lands below `failure_rate`.
pub fn coin_flip(rng: &dyn RandomSource, failure_rate: f64) -> ErrorOutcome {
    if rng.next_unit() < failure_rate {
        ErrorOutcome::Failed(ErrorBody {
            error: "Internal server error".into(),
            code: 500,
        })
    } else {
        ErrorOutcome::Passed(SimulateOkBody {
            status: "ok".into(),
            message: "No error this time".into(),
        })
    }
}

/// Draw a delay in `[min, max]` at millisecond resolution.
///
/// The returned value is both what gets slept and what gets reported, so the
/// caller's wall clock is never below the reported figure.
pub fn slow_delay(rng: &dyn RandomSource, min: Duration, max: Duration) -> Duration {
    let (lo, hi) = (min.as_millis() as u64, max.as_millis() as u64);
    let (lo, hi) = (lo.min(hi), hi.max(lo));
    let ms = rng.uniform(lo as f64, hi as f64).round() as u64;
    Duration::from_millis(ms.clamp(lo, hi))
}

pub fn slow_body(delay: Duration) -> SlowBody {
    SlowBody {
        status: "ok".into(),
        response_time_seconds: delay.as_millis() as f64 / 1000.0,
    }
}
