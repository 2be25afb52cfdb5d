//! Shared application state for the SRE practice app.
//!
//! One `AppState` is built at startup and cloned into every handler. All
//! mutable fields are atomics or lock-free maps, so concurrent requests never
//! lose updates.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use srepractice_core::error::Result;
use srepractice_core::random::{RandomSource, ThreadRandom};

use crate::config::AppConfig;
use crate::obs::metrics::AppMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<AppMetrics>,
    rng: Arc<dyn RandomSource>,
}

struct AppStateInner {
    cfg: AppConfig,
    started: Instant,
    request_count: AtomicU64,
}

impl AppState {
    /// Build application state with the production random source.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: AppConfig) -> Result<Self> {
        Self::with_random(cfg, Arc::new(ThreadRandom))
    }

    /// Build application state with an injected random source.
    pub fn with_random(cfg: AppConfig, rng: Arc<dyn RandomSource>) -> Result<Self> {
        cfg.validate()?;

        tracing::debug!(
            error_rate = cfg.simulate.error_rate,
            slow_min_ms = cfg.simulate.slow_min_ms,
            slow_max_ms = cfg.simulate.slow_max_ms,
            "app state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                started: Instant::now(),
                request_count: AtomicU64::new(0),
            }),
            metrics: Arc::new(AppMetrics::default()),
            rng,
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }

    /// Increment the health request counter, returning the new value.
    pub fn bump_requests(&self) -> u64 {
        self.inner.request_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn request_count(&self) -> u64 {
        self.inner.request_count.load(Ordering::Relaxed)
    }

    pub fn metrics(&self) -> Arc<AppMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn rng(&self) -> &dyn RandomSource {
        self.rng.as_ref()
    }
}
