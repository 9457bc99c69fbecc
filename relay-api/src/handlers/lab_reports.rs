use actix_web::{options, post, web, HttpResponse, Responder};
use shared_types::{LabReportRequest, LabReportResponse};
use tracing::{error, info, warn};
use webhook_client::LabReportPayload;

use crate::error::RelayError;
use crate::models::LabReportSubmission;
use crate::AppState;

#[options("/lab-report")]
pub async fn lab_report_preflight() -> impl Responder {
    super::preflight_response()
}

/// Forward a lab report to its webhook and keep a copy of the exchange
#[post("/lab-report")]
pub async fn submit_lab_report(
    req: web::Json<LabReportRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, RelayError> {
    let submission = LabReportSubmission::try_from(req.into_inner()).map_err(|e| {
        warn!(error = %e, "Rejected lab report");
        e
    })?;

    let Some(client) = state.lab_reports.clone() else {
        error!("Lab report received but lab_report.webhook_url is not configured");
        return Err(RelayError::ServerConfiguration(
            "lab_report.webhook_url is not set".to_string(),
        ));
    };

    info!(twin_id = %submission.twin_id, "Forwarding lab report");

    let payload = serde_json::to_value(LabReportPayload {
        twin_id: submission.twin_id.clone(),
        session_id: submission.session_id.clone(),
        report: submission.report,
    })
    .map_err(|e| RelayError::Internal(e.to_string()))?;

    let timeout = state.agent_timeout;
    let result = match tokio::time::timeout(timeout, client.forward(payload.clone())).await {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            let err = RelayError::from_webhook(e, timeout);
            error!(error = %err, twin_id = %submission.twin_id, "Lab report webhook call failed");
            return Err(err);
        }
        Err(_) => {
            warn!(twin_id = %submission.twin_id, "Lab report webhook timed out");
            return Err(RelayError::UpstreamTimeout(timeout));
        }
    };

    let report_id = state
        .storage
        .record_lab_report(
            &submission.twin_id,
            submission.session_id.as_deref(),
            &payload,
            &result,
        )
        .await
        .map_err(|e| {
            error!(error = %e, twin_id = %submission.twin_id, "Failed to store lab report");
            RelayError::from(e)
        })?;

    info!(report_id = %report_id, twin_id = %submission.twin_id, "Lab report relayed");

    Ok(HttpResponse::Ok().json(LabReportResponse {
        report_id,
        twin_id: submission.twin_id,
        result,
    }))
}
