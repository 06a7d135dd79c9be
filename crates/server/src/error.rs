//! HTTP-facing errors.
//!
//! Only failures that happen before the stream starts can still change the
//! status code; everything later is turned into an apology chunk by the
//! emitter.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Query is required")]
    QueryRequired,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::QueryRequired => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::QueryRequired => "Query is required",
            ApiError::Internal(e) => {
                error!("Request failed: {:#}", e);
                "Internal server error"
            }
        };
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
