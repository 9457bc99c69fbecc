//! # Webhook client
//!
//! Client for workflow-automation webhooks (n8n) that act as the chat agent.
//!
//! ## Example
//!
//! ```rust,no_run
//! use webhook_client::{extract_reply, HttpWebhookClient, WebhookClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpWebhookClient::new(
//!         "https://n8n.example.com/webhook/chat",
//!         "x-webhook-secret",
//!         "your-shared-secret",
//!     )?;
//!     let body = client
//!         .forward(serde_json::json!({ "message_text": "Hello" }))
//!         .await?;
//!     println!("Reply: {}", extract_reply(&body).text);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod reply;
pub mod types;

pub use client::{HttpWebhookClient, WebhookClient};
pub use error::WebhookError;
pub use reply::{decode_reply, extract_reply, AgentReply};
pub use types::{AgentChatPayload, LabReportPayload};
