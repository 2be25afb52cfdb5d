//! Application endpoints: the static root payload and the JSON 404.

use axum::{http::Uri, Json};

use srepractice_core::error::SreError;
use srepractice_core::protocol::HomeBody;

use crate::error::ApiError;

pub async fn home() -> Json<HomeBody> {
    Json(HomeBody::default())
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError(SreError::NotFound(uri.path().to_owned()))
}
