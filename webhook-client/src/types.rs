use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body forwarded to the chat agent webhook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentChatPayload {
    pub twin_id: String,
    pub session_id: String,
    pub message_text: String,
    pub user_message_id: String,
    pub personal_details_snapshot: Option<Value>,
}

/// Body forwarded to the lab-report webhook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabReportPayload {
    pub twin_id: String,
    pub session_id: Option<String>,
    pub report: Value,
}
