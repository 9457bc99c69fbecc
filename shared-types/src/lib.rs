use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod chat;
pub mod health;
pub mod lab_report;
pub mod typescript_gen;

pub use typescript_gen::generate_typescript_definitions;

pub use chat::{ChatRequest, ChatResponse, SessionHistoryResponse, SessionMessage};
pub use health::{HealthResponse, VersionResponse};
pub use lab_report::{LabReportRequest, LabReportResponse};

// Wire types shared by the chat relay and the portfolio front end

/// JSON body of every 4xx/5xx answer
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            upstream_status: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
