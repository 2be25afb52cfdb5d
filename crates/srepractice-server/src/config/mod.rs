//! App config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use srepractice_core::error::{Result, SreError};

pub use schema::{AppConfig, LogSection, ServerSection, SimulateSection};

/// Config path used when neither the CLI nor the environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "srepractice.yaml";

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SreError::BadConfig(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| SreError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config for the binary.
///
/// An explicitly named file must exist. A missing default file falls back
/// to built-in defaults.
pub fn resolve(explicit: Option<String>) -> Result<AppConfig> {
    match explicit {
        Some(path) => load_from_file(&path),
        None => match fs::read_to_string(DEFAULT_CONFIG_PATH) {
            Ok(s) => load_from_str(&s),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::default()),
            Err(e) => Err(SreError::BadConfig(format!(
                "read config failed ({DEFAULT_CONFIG_PATH}): {e}"
            ))),
        },
    }
}
