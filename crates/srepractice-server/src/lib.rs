//! SRE practice app server library entry.
//!
//! This crate wires config, shared state, the metrics registry and the
//! request handlers into an axum router. It is intended to be consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod simulate;
