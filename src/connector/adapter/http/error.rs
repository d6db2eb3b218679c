use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::domain::{DomainError, Violation};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<Violation>>,
}

/// HTTP face of a [`DomainError`].
///
/// Validation-class failures carry their violations; provider and internal
/// failures are reduced to a generic message and only logged in full.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self.0 {
            DomainError::InvalidInput(violations) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid request data",
                    details: Some(violations),
                },
            ),
            DomainError::SchemaViolation(violations) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid methodology format",
                    details: Some(violations),
                },
            ),
            DomainError::MalformedOutput(cause) => {
                error!("Provider returned malformed output: {cause}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Failed to generate valid methodology",
                        details: None,
                    },
                )
            }
            other => {
                error!("Methodology generation failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error",
                        details: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}
