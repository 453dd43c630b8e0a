use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::layout::engine::SectionKind;

/// Failures of the report core. Missing metadata is never one of them.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "Layout overflow in {section} section: needs {required_mm:.1}mm, {available_mm:.1}mm available"
    )]
    LayoutOverflow {
        section: SectionKind,
        required_mm: f32,
        available_mm: f32,
    },
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Report(ReportError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
            }
            AppError::Report(e @ ReportError::LayoutOverflow { .. }) => {
                tracing::warn!("Layout overflow rejected: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "LAYOUT_OVERFLOW",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
