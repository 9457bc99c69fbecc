use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use webhook_client::WebhookClient;

pub mod config;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod logging;
pub mod models;
pub mod storage;

pub type DbConnection = Arc<Mutex<Connection>>;

/// Process-wide state shared by every handler; built once at start-up
pub struct AppState {
    pub storage: Arc<dyn storage::ChatStorage>,
    pub agent: Arc<dyn WebhookClient>,
    pub lab_reports: Option<Arc<dyn WebhookClient>>,
    /// Deadline for a single webhook round trip
    pub agent_timeout: Duration,
}
