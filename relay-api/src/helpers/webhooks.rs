use crate::config::RelayConfig;
use std::sync::Arc;
use webhook_client::{HttpWebhookClient, WebhookClient, WebhookError};

/// Build the chat agent client from validated configuration
pub fn create_agent_client(config: &RelayConfig) -> Result<Arc<dyn WebhookClient>, WebhookError> {
    let client: Arc<dyn WebhookClient> = Arc::new(
        HttpWebhookClient::new(
            config.agent.webhook_url.clone(),
            &config.agent.secret_header,
            &config.agent.secret,
        )?
        .with_timeout(config.agent.timeout())?,
    );

    Ok(client)
}

/// Build the lab-report client, if a lab-report webhook is configured
pub fn create_lab_report_client(
    config: &RelayConfig,
) -> Result<Option<Arc<dyn WebhookClient>>, WebhookError> {
    let Some(url) = config.lab_report.webhook_url.as_deref() else {
        return Ok(None);
    };

    let client: Arc<dyn WebhookClient> = Arc::new(
        HttpWebhookClient::new(url, &config.agent.secret_header, &config.agent.secret)?
            .with_timeout(config.agent.timeout())?,
    );

    Ok(Some(client))
}
