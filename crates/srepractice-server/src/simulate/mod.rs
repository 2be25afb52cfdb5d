//! Fault-injection endpoints for incident practice.
//!
//! - `/simulate/error` : coin-flip 500
//! - `/simulate/slow`  : random delay, then 200

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use srepractice_core::protocol::simulate::{self, ErrorOutcome};
use srepractice_core::protocol::SlowBody;

use crate::app_state::AppState;

pub async fn error(State(state): State<AppState>) -> Response {
    let rate = state.cfg().simulate.error_rate;
    let outcome = simulate::coin_flip(state.rng(), rate);
    let status = StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::OK);

    match outcome {
        ErrorOutcome::Failed(body) => {
            tracing::warn!(code = body.code, "simulated failure");
            (status, Json(body)).into_response()
        }
        ErrorOutcome::Passed(body) => (status, Json(body)).into_response(),
    }
}

pub async fn slow(State(state): State<AppState>) -> Json<SlowBody> {
    let sim = &state.cfg().simulate;
    let delay = simulate::slow_delay(state.rng(), sim.slow_min(), sim.slow_max());

    tracing::debug!(delay_ms = delay.as_millis() as u64, "simulating slow response");
    // async sleep parks only this request's task
    tokio::time::sleep(delay).await;

    Json(simulate::slow_body(delay))
}
