//! Axum router wiring.
//!
//! Layer order matters: the panic guard wraps handlers first, and request
//! tracking wraps that, so every response (404 and caught panics included)
//! is recorded once.

use axum::{middleware, routing::get, Router};

use crate::{api, app_state::AppState, obs, ops, simulate};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .route("/prometheus", get(ops::prometheus))
        .route("/simulate/error", get(simulate::error))
        .route("/simulate/slow", get(simulate::slow))
        .fallback(api::not_found)
        .layer(obs::catch_panic_layer())
        .layer(middleware::from_fn_with_state(state.clone(), obs::track_requests))
        .with_state(state)
}
