//! HTTP boundary errors.
//!
//! Only these two conditions leave the frame core as non-2xx responses;
//! neither carries a state token.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bloom_common::BloomError;
use thiserror::Error;

use crate::frame::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid frame data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] BloomError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(e) => {
                tracing::warn!(error = %e, "Rejected frame request");
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Frame request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
