use serde_json::Value;
use shared_types::{ChatRequest, LabReportRequest};

use crate::error::RelayError;

/// A validated `POST /chat` body
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub twin_id: String,
    pub session_id: Option<String>,
    pub message_text: String,
    pub personal_details_snapshot: Option<Value>,
}

/// A validated `POST /lab-report` body
#[derive(Debug, Clone)]
pub struct LabReportSubmission {
    pub twin_id: String,
    pub session_id: Option<String>,
    pub report: Value,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing_fields(fields: &[&str]) -> RelayError {
    RelayError::InvalidRequest(format!("Missing required field(s): {}", fields.join(", ")))
}

impl TryFrom<ChatRequest> for ChatTurn {
    type Error = RelayError;

    fn try_from(req: ChatRequest) -> Result<Self, Self::Error> {
        let twin_id = non_blank(req.twin_id).or_else(|| non_blank(req.notebook_id));
        let message_text = non_blank(req.message_text).or_else(|| non_blank(req.message));

        match (twin_id, message_text) {
            (Some(twin_id), Some(message_text)) => Ok(Self {
                twin_id,
                session_id: non_blank(req.session_id),
                message_text,
                personal_details_snapshot: req.personal_details_snapshot,
            }),
            (None, None) => Err(missing_fields(&["twin_id", "message_text"])),
            (None, Some(_)) => Err(missing_fields(&["twin_id"])),
            (Some(_), None) => Err(missing_fields(&["message_text"])),
        }
    }
}

impl TryFrom<LabReportRequest> for LabReportSubmission {
    type Error = RelayError;

    fn try_from(req: LabReportRequest) -> Result<Self, Self::Error> {
        let twin_id = non_blank(req.twin_id);
        let report = req.report.filter(|r| !r.is_null());

        match (twin_id, report) {
            (Some(twin_id), Some(report)) => Ok(Self {
                twin_id,
                session_id: non_blank(req.session_id),
                report,
            }),
            (None, None) => Err(missing_fields(&["twin_id", "report"])),
            (None, Some(_)) => Err(missing_fields(&["twin_id"])),
            (Some(_), None) => Err(missing_fields(&["report"])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notebook_variant_aliases_are_accepted() {
        let req: ChatRequest = serde_json::from_value(json!({
            "notebook_id": "nb-1",
            "message": "Summarise chapter 2"
        }))
        .unwrap();

        let turn = ChatTurn::try_from(req).unwrap();
        assert_eq!(turn.twin_id, "nb-1");
        assert_eq!(turn.message_text, "Summarise chapter 2");
        assert!(turn.session_id.is_none());
    }

    #[test]
    fn primary_names_win_over_notebook_names() {
        let req: ChatRequest = serde_json::from_value(json!({
            "twin_id": "twin-1",
            "notebook_id": "nb-1",
            "message_text": "from message_text",
            "message": "from message"
        }))
        .unwrap();

        let turn = ChatTurn::try_from(req).unwrap();
        assert_eq!(turn.twin_id, "twin-1");
        assert_eq!(turn.message_text, "from message_text");
    }

    #[test]
    fn blank_primary_names_fall_back_to_notebook_names() {
        let req: ChatRequest = serde_json::from_value(json!({
            "twin_id": " ",
            "notebook_id": "nb-1",
            "message_text": "",
            "message": "from message"
        }))
        .unwrap();

        let turn = ChatTurn::try_from(req).unwrap();
        assert_eq!(turn.twin_id, "nb-1");
        assert_eq!(turn.message_text, "from message");
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let req = ChatRequest {
            twin_id: Some("   ".to_string()),
            session_id: Some("".to_string()),
            message_text: Some("hi".to_string()),
            ..Default::default()
        };

        match ChatTurn::try_from(req) {
            Err(RelayError::InvalidRequest(details)) => assert!(details.contains("twin_id")),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn lab_report_requires_a_report() {
        let req = LabReportRequest {
            twin_id: Some("twin-1".to_string()),
            session_id: None,
            report: Some(Value::Null),
        };
        assert!(matches!(
            LabReportSubmission::try_from(req),
            Err(RelayError::InvalidRequest(_))
        ));
    }
}
