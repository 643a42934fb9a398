//! API error responses.
//!
//! Every failure leaves the gateway as `{ "message": ..., "error": ... }`
//! with 400 for caller mistakes and 500 for everything else.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use pokelens_core::PokeError;
use pokelens_logging::redact_sensitive_data;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
}

/// A handler failure plus the route-level summary shown to the caller.
#[derive(Debug)]
pub struct ApiError {
    pub message: &'static str,
    pub source: PokeError,
}

impl ApiError {
    pub fn new(message: &'static str, source: PokeError) -> Self {
        Self { message, source }
    }

    pub fn status(&self) -> StatusCode {
        if self.source.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = redact_sensitive_data(&self.source.to_string());

        if status.is_server_error() {
            error!(status = %status, error = %detail, "{}", self.message);
        } else {
            warn!(status = %status, error = %detail, "{}", self.message);
        }

        let body = ErrorBody {
            message: self.message.to_string(),
            error: detail,
        };
        (status, Json(body)).into_response()
    }
}
