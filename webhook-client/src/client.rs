use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::WebhookError;

/// Core trait for webhook-backed agents
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// POST a JSON payload and return the decoded response body
    async fn forward(&self, payload: Value) -> Result<Value, WebhookError>;

    /// Endpoint this client posts to, for diagnostics
    fn endpoint(&self) -> &str;
}

/// Authenticated JSON webhook client (n8n style shared-secret header)
pub struct HttpWebhookClient {
    endpoint: String,
    secret_header: HeaderName,
    secret: HeaderValue,
    http_client: reqwest::Client,
}

impl HttpWebhookClient {
    /// Create a client for `endpoint` that sends `secret` in `secret_header`
    pub fn new(
        endpoint: impl Into<String>,
        secret_header: &str,
        secret: &str,
    ) -> Result<Self, WebhookError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(WebhookError::configuration("webhook endpoint is empty"));
        }
        if secret.trim().is_empty() {
            return Err(WebhookError::configuration("webhook secret is empty"));
        }

        let secret_header = HeaderName::from_bytes(secret_header.as_bytes()).map_err(|e| {
            WebhookError::configuration(format!("invalid secret header name: {}", e))
        })?;
        let mut secret = HeaderValue::from_str(secret)
            .map_err(|e| WebhookError::configuration(format!("invalid secret value: {}", e)))?;
        secret.set_sensitive(true);

        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WebhookError::Network { source: e })?;

        Ok(Self {
            endpoint,
            secret_header,
            secret,
            http_client,
        })
    }

    /// Apply a transport-level deadline in addition to the caller's own
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, WebhookError> {
        self.http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| WebhookError::Network { source: e })?;
        Ok(self)
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    async fn forward(&self, payload: Value) -> Result<Value, WebhookError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(self.secret_header.clone(), self.secret.clone());

        let response = self
            .http_client
            .post(&self.endpoint)
            .headers(headers)
            .json(&payload)
            .send()
            .await
            .map_err(WebhookError::from_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(WebhookError::from_transport)?;

        if !status.is_success() {
            warn!(status = status.as_u16(), endpoint = %self.endpoint, "Webhook returned an error status");
            return Err(WebhookError::api(status.as_u16(), body));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "Webhook responded");

        // n8n occasionally answers with plain text; keep it as a string reply
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) if body.trim().is_empty() => Ok(Value::Null),
            Err(_) => Ok(Value::String(body)),
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
