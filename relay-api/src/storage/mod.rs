use async_trait::async_trait;
use serde_json::Value;

pub mod migrations;
mod models;
mod sqlite;

pub use models::{ChatMessage, ChatSession, MessageRole};
pub use sqlite::SqliteChatStorage;

/// Persistence for chat sessions, their message log and lab reports.
///
/// Sessions are only ever created or re-activated; messages and reports are
/// append-only.
#[async_trait]
pub trait ChatStorage: Send + Sync {
    /// Create the session if absent, otherwise mark it active. Safe under
    /// concurrent calls for the same id.
    async fn upsert_session(&self, session_id: &str, twin_id: &str) -> Result<(), StorageError>;

    /// Most recently active session of `twin_id`, created if none exists
    async fn resolve_session(&self, twin_id: &str) -> Result<String, StorageError>;

    async fn get_session(&self, session_id: &str) -> Result<Option<ChatSession>, StorageError>;

    /// Append a message and return its generated id
    async fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<String, StorageError>;

    async fn get_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>, StorageError>;

    /// Store a lab report exchange and return its generated id
    async fn record_lab_report(
        &self,
        twin_id: &str,
        session_id: Option<&str>,
        payload: &Value,
        response: &Value,
    ) -> Result<String, StorageError>;

    /// Cheap round trip used by the health check
    async fn ping(&self) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(error: rusqlite::Error) -> Self {
        Self::OperationFailed(error.to_string())
    }
}
