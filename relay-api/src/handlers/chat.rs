use actix_web::{options, post, web, HttpResponse, Responder};
use shared_types::{ChatRequest, ChatResponse};
use tracing::{debug, error, info, warn};
use webhook_client::{extract_reply, AgentChatPayload};

use crate::error::RelayError;
use crate::models::ChatTurn;
use crate::storage::MessageRole;
use crate::AppState;

#[options("/chat")]
pub async fn chat_preflight() -> impl Responder {
    super::preflight_response()
}

/// Relay one chat turn to the agent webhook and log both sides of it
#[post("/chat")]
pub async fn relay_chat(
    req: web::Json<ChatRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, RelayError> {
    let turn = ChatTurn::try_from(req.into_inner()).map_err(|e| {
        warn!(error = %e, "Rejected chat request");
        e
    })?;

    info!(
        twin_id = %turn.twin_id,
        session_id = ?turn.session_id,
        message_len = turn.message_text.len(),
        "Relaying chat message"
    );

    let session_id = match &turn.session_id {
        Some(session_id) => state
            .storage
            .upsert_session(session_id, &turn.twin_id)
            .await
            .map(|_| session_id.clone()),
        None => state.storage.resolve_session(&turn.twin_id).await,
    }
    .map_err(|e| {
        error!(error = %e, twin_id = %turn.twin_id, "Failed to initialize chat session");
        RelayError::SessionInit(e)
    })?;

    let user_message_id = state
        .storage
        .append_message(&session_id, MessageRole::User, &turn.message_text)
        .await
        .map_err(|e| {
            error!(error = %e, session_id = %session_id, "Failed to store user message");
            RelayError::from(e)
        })?;

    let payload = AgentChatPayload {
        twin_id: turn.twin_id.clone(),
        session_id: session_id.clone(),
        message_text: turn.message_text,
        user_message_id,
        personal_details_snapshot: turn.personal_details_snapshot,
    };
    let payload = serde_json::to_value(&payload).map_err(|e| {
        error!(error = %e, session_id = %session_id, "Failed to encode webhook payload");
        RelayError::Internal(e.to_string())
    })?;

    let timeout = state.agent_timeout;
    let body = match tokio::time::timeout(timeout, state.agent.forward(payload)).await {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            let err = RelayError::from_webhook(e, timeout);
            error!(error = %err, session_id = %session_id, endpoint = %state.agent.endpoint(), "Agent webhook call failed");
            return Err(err);
        }
        Err(_) => {
            warn!(session_id = %session_id, timeout_secs = timeout.as_secs_f64(), "Agent webhook timed out");
            return Err(RelayError::UpstreamTimeout(timeout));
        }
    };

    let reply = extract_reply(&body);

    if reply.text.is_empty() {
        warn!(session_id = %session_id, "Agent returned an empty reply; not storing it");
    } else {
        // The client does not wait for this write
        let storage = state.storage.clone();
        let session = session_id.clone();
        let text = reply.text.clone();
        tokio::spawn(async move {
            match storage
                .append_message(&session, MessageRole::Assistant, &text)
                .await
            {
                Ok(message_id) => {
                    debug!(session_id = %session, message_id = %message_id, "Stored assistant reply")
                }
                Err(e) => {
                    error!(error = %e, session_id = %session, "Failed to store assistant reply")
                }
            }
        });
    }

    info!(
        session_id = %session_id,
        reply_len = reply.text.len(),
        widgets = reply.widgets.len(),
        "Chat turn completed"
    );

    Ok(HttpResponse::Ok().json(ChatResponse {
        assistant_reply: reply.text,
        widgets: reply.widgets,
        session_id,
        twin_id: turn.twin_id,
    }))
}
