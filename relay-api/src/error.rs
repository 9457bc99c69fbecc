use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;
use std::time::Duration;
use thiserror::Error;
use webhook_client::WebhookError;

use crate::storage::StorageError;

/// Errors surfaced to HTTP callers of the relay
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server configuration error: {0}")]
    ServerConfiguration(String),

    #[error("Failed to initialize chat session: {0}")]
    SessionInit(#[source] StorageError),

    #[error("Agent webhook timed out after {}s", .0.as_secs_f64())]
    UpstreamTimeout(Duration),

    #[error("Agent webhook unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("Agent webhook returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Map a webhook failure; `timeout` is the deadline the call ran under.
    pub fn from_webhook(error: WebhookError, timeout: Duration) -> Self {
        match error {
            WebhookError::Timeout => Self::UpstreamTimeout(timeout),
            WebhookError::Api { status, body } => Self::Upstream { status, body },
            WebhookError::Network { source } => Self::UpstreamUnavailable(source.to_string()),
            WebhookError::Configuration { message } => Self::ServerConfiguration(message),
        }
    }
}

impl From<StorageError> for RelayError {
    fn from(error: StorageError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout(_) | Self::UpstreamUnavailable(_) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            Self::ServerConfiguration(_) | Self::SessionInit(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Storage and configuration details stay in the logs
        let body = match self {
            Self::InvalidRequest(details) => {
                ErrorResponse::new("Invalid request").with_details(details.clone())
            }
            Self::ServerConfiguration(_) => ErrorResponse::new("Server configuration error"),
            Self::SessionInit(_) => ErrorResponse::new("Failed to initialize chat session"),
            Self::UpstreamTimeout(timeout) => ErrorResponse::new("Agent webhook timed out")
                .with_details(format!("No reply within {}s", timeout.as_secs_f64())),
            Self::UpstreamUnavailable(_) => ErrorResponse::new("Agent webhook unreachable"),
            Self::Upstream { status, body } => ErrorResponse {
                error: format!("Agent webhook returned status {}", status),
                details: Some(body.clone()),
                upstream_status: Some(*status),
            },
            Self::NotFound(what) => ErrorResponse::new(format!("{} not found", what)),
            Self::Internal(_) => ErrorResponse::new("Internal server error"),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
