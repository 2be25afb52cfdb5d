use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use srepractice_core::error::{Result, SreError};
use srepractice_core::protocol::simulate::{
    DEFAULT_FAILURE_RATE, DEFAULT_SLOW_MAX, DEFAULT_SLOW_MIN,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub simulate: SimulateSection,

    #[serde(default)]
    pub log: LogSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            simulate: SimulateSection::default(),
            log: LogSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SreError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.simulate.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            SreError::BadConfig(format!(
                "server.listen must be a valid SocketAddr, got {:?}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulateSection {
    #[serde(default = "default_error_rate")]
    pub error_rate: f64,

    #[serde(default = "default_slow_min_ms")]
    pub slow_min_ms: u64,

    #[serde(default = "default_slow_max_ms")]
    pub slow_max_ms: u64,
}

impl Default for SimulateSection {
    fn default() -> Self {
        Self {
            error_rate: default_error_rate(),
            slow_min_ms: default_slow_min_ms(),
            slow_max_ms: default_slow_max_ms(),
        }
    }
}

impl SimulateSection {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(SreError::BadConfig(
                "simulate.error_rate must be between 0.0 and 1.0".into(),
            ));
        }
        if !(1..=60_000).contains(&self.slow_min_ms) || !(1..=60_000).contains(&self.slow_max_ms) {
            return Err(SreError::BadConfig(
                "simulate.slow_min_ms and slow_max_ms must be between 1 and 60000".into(),
            ));
        }
        if self.slow_min_ms > self.slow_max_ms {
            return Err(SreError::BadConfig(
                "simulate.slow_min_ms must not exceed slow_max_ms".into(),
            ));
        }
        Ok(())
    }

    pub fn slow_min(&self) -> Duration {
        Duration::from_millis(self.slow_min_ms)
    }

    pub fn slow_max(&self) -> Duration {
        Duration::from_millis(self.slow_max_ms)
    }
}

fn default_error_rate() -> f64 {
    DEFAULT_FAILURE_RATE
}
fn default_slow_min_ms() -> u64 {
    DEFAULT_SLOW_MIN.as_millis() as u64
}
fn default_slow_max_ms() -> u64 {
    DEFAULT_SLOW_MAX.as_millis() as u64
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".into()
}
