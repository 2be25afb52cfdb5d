//! Operational HTTP endpoints.
//!
//! - `/health`     : liveness + uptime, bumps the request counter
//! - `/metrics`    : JSON snapshot with synthetic CPU/memory figures
//! - `/prometheus` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use srepractice_core::protocol::{simulate, HealthBody, MetricsBody};

use crate::app_state::AppState;

pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let total = state.bump_requests();
    Json(simulate::health(state.uptime(), total))
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsBody> {
    Json(simulate::metrics_sample(
        state.rng(),
        state.uptime(),
        state.request_count(),
    ))
}

pub async fn prometheus(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
