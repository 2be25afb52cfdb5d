//! HTTP rendering of `SreError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use srepractice_core::error::{ClientCode, SreError};

/// `SreError` as an HTTP response: `{"error": CODE, "message": text}`.
#[derive(Debug)]
pub struct ApiError(pub SreError);

impl From<SreError> for ApiError {
    fn from(e: SreError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::BadConfig | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
