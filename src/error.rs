//! Error responses of the calculator endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::request::ValidationError;
use crate::response::ErrorBody;

/// Shown for every failure that is not the caller's fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno. Por favor, intente más tarde.";

/// Failures of the calculator endpoint.
///
/// Rejected input maps to 400 with its own message. Anything else maps to 500
/// with a fixed message; the detail only goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Validation(reason) => {
                tracing::warn!(%reason, "rejected calculation request");
                reason.to_string()
            }
            ApiError::Internal(source) => {
                tracing::error!(error = %source, "calculation request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (self.status(), Json(ErrorBody { error: message })).into_response()
    }
}
