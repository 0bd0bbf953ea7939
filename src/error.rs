use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::modules::session::crud::SessionError;
use crate::services::upstream::UpstreamError;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{message}")]
    UpstreamProtocol {
        status: Option<StatusCode>,
        message: String,
    },
    #[error("Failed to persist session: {0}")]
    Persistence(String),
    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamProtocol { status, .. } => {
                status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::Persistence(_) | AppError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{} {}", status, self);
        }
        (
            status,
            Json(MessageResponse {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unreachable { service, .. } => AppError::ServiceUnavailable(format!(
                "{} is not reachable. Make sure the service is running.",
                service
            )),
            UpstreamError::Timeout { .. } => AppError::Timeout(err.to_string()),
            UpstreamError::Status { status, .. } => {
                // Only an error status is worth passing through.
                let status = (status.is_client_error() || status.is_server_error()).then_some(status);
                AppError::UpstreamProtocol {
                    status,
                    message: err.to_string(),
                }
            }
            UpstreamError::Misconfigured { .. } => AppError::Unexpected(err.to_string()),
            UpstreamError::InvalidResponse { .. } => AppError::UpstreamProtocol {
                status: None,
                message: err.to_string(),
            },
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidId(_) => AppError::InvalidInput(err.to_string()),
            SessionError::Io(_) | SessionError::Serde(_) => AppError::Persistence(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
