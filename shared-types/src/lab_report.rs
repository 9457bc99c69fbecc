use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Body of `POST /lab-report`
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabReportRequest {
    #[serde(default)]
    pub twin_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    #[ts(type = "unknown")]
    pub report: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabReportResponse {
    pub report_id: String,
    pub twin_id: String,
    #[ts(type = "unknown")]
    pub result: Value,
}
