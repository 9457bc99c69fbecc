use actix_web::{get, web, HttpResponse};
use shared_types::{SessionHistoryResponse, SessionMessage};
use tracing::{error, info, warn};

use crate::error::RelayError;
use crate::AppState;

#[get("/chat/sessions/{session_id}/messages")]
pub async fn get_session_messages(
    session_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, RelayError> {
    let id = session_id.into_inner();
    info!(session_id = %id, "Retrieving session history");

    let session = match state.storage.get_session(&id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            warn!(session_id = %id, "Session not found");
            return Err(RelayError::NotFound(format!("Session {}", id)));
        }
        Err(e) => {
            error!(error = %e, session_id = %id, "Failed to retrieve session");
            return Err(e.into());
        }
    };

    let messages = state.storage.get_messages(&id).await.map_err(|e| {
        error!(error = %e, session_id = %id, "Failed to retrieve messages");
        RelayError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(SessionHistoryResponse {
        session_id: session.id,
        twin_id: session.twin_id,
        is_active: session.is_active,
        messages: messages
            .into_iter()
            .map(|m| SessionMessage {
                id: m.id,
                role: m.role.to_string(),
                content: m.content,
                created_at: m.created_at,
            })
            .collect(),
    }))
}
