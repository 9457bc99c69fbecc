use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Body of `POST /chat`.
///
/// Every field is optional on the wire so that missing fields surface as a
/// 400 with a readable message instead of a deserializer error. Both the
/// health-twin and the notebook variants are accepted; `notebook_id` and
/// `message` only apply when `twin_id` and `message_text` are absent or blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatRequest {
    #[serde(default)]
    pub twin_id: Option<String>,
    #[serde(default)]
    pub notebook_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message_text: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    #[ts(type = "unknown")]
    pub personal_details_snapshot: Option<Value>,
}

/// Normalized reply returned by `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatResponse {
    pub assistant_reply: String,
    #[ts(type = "Array<unknown>")]
    pub widgets: Vec<Value>,
    pub session_id: String,
    pub twin_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionMessage {
    pub id: String,
    pub role: String,
    pub content: String,
    pub created_at: i64,
}

/// Body of `GET /chat/sessions/{session_id}/messages`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionHistoryResponse {
    pub session_id: String,
    pub twin_id: String,
    pub is_active: bool,
    pub messages: Vec<SessionMessage>,
}
