//! Request tracking middleware and panic guard.
//!
//! `track_requests` wraps every route (fallback included) exactly once: it
//! times the request, then records counter, histogram and uptime gauge.
//! It must sit outside `catch_panic_layer` so panicking handlers are still
//! counted with their 500.

use std::any::Any;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{info_span, Instrument};

use srepractice_core::error::SreError;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Path label for requests no route matched (bounds label cardinality).
pub const UNMATCHED_PATH: &str = "unmatched";

pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned());

    let span = info_span!("http", %method, %path);
    let started = Instant::now();
    let res = next.run(req).instrument(span).await;
    let elapsed = started.elapsed();

    let status = res.status().as_u16();
    state
        .metrics()
        .record_request(&method, &path, status, elapsed, state.uptime());

    tracing::debug!(
        %method,
        %path,
        status,
        latency_ms = elapsed.as_millis() as u64,
        "request done"
    );
    res
}

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Turn handler panics into a JSON 500 instead of dropping the connection.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    };
    tracing::error!(%detail, "handler panicked");
    ApiError(SreError::Internal("handler panicked".into())).into_response()
}
