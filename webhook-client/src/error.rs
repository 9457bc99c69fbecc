use thiserror::Error;

/// Errors produced while calling an agent webhook
#[derive(Error, Debug)]
pub enum WebhookError {
    /// The webhook did not answer before the deadline
    #[error("Webhook request timed out")]
    Timeout,

    /// The webhook answered with a non-2xx status
    #[error("Webhook error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Connection, DNS or body transfer failure
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// Missing or malformed endpoint, secret or header name
    #[error("Webhook configuration error: {message}")]
    Configuration { message: String },
}

impl WebhookError {
    /// Create an API error from an upstream status and body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Map a transport failure, keeping timeouts distinguishable
    pub(crate) fn from_transport(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout
        } else {
            Self::Network { source }
        }
    }
}
