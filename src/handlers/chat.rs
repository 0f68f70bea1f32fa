use axum::{extract::State, http::StatusCode, response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::support::insert_ticket;
use crate::middleware::auth::AuthUser;
use crate::services::chat::{ChatError, HistoryEntry};
use crate::AppState;

const SAFETY_APOLOGY: &str = "Sorry, I can't help with that request. \
    If you need assistance, please open a support ticket and our team will get back to you.";

const EMPTY_REPLY_FALLBACK: &str = "Sorry, I couldn't come up with a meaningful reply. \
    Could you rephrase your question?";

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// POST /api/chat
///
/// Passthrough to the conversational model. A safety refusal is not an
/// error from the visitor's point of view: they get a polite apology
/// with a 200, same as any other reply.
pub async fn message(
    State(state): State<AppState>,
    Json(req): Json<ChatMessage>,
) -> Result<Json<Value>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::validation("message is required"));
    }

    let Some(client) = &state.chat else {
        return Err(ApiError::internal(
            "chat service unavailable",
            "no chat API key configured",
        ));
    };

    let result = client.send(&req.message, &req.history).await;
    reply_body(result).map(Json)
}

/// A safety refusal or an empty candidate list is still a conversation
/// turn for the visitor: both answer 200 with canned copy. Only transport
/// and API failures surface as errors.
fn reply_body(result: Result<String, ChatError>) -> Result<Value, ApiError> {
    match result {
        Ok(reply) => Ok(json!({ "response": reply })),
        Err(ChatError::Blocked) => Ok(json!({ "response": SAFETY_APOLOGY })),
        Err(ChatError::EmptyReply) => Ok(json!({ "response": EMPTY_REPLY_FALLBACK })),
        Err(err) => {
            tracing::error!(error = %err, "chat request failed");
            Err(ApiError::internal("failed to process chat message", err))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatSupportRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /api/chat/support
///
/// Raised by the chat widget when the bot hands the visitor over to a
/// human. Same table as regular tickets, tagged so staff can tell the
/// origin apart.
pub async fn support_request(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(req): Json<ChatSupportRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.message.trim().is_empty() {
        return Err(ApiError::validation("name, email and message are required"));
    }

    let ticket = insert_ticket(
        &state,
        &req.name,
        &req.email,
        &req.message,
        "chatbot_support",
        user.as_ref().map(|u| u.email.as_str()),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "support request created", "id": ticket.id })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_reply_passes_through() {
        let body = reply_body(Ok("hello there".into())).unwrap();
        assert_eq!(body["response"], "hello there");
    }

    #[test]
    fn safety_block_answers_with_apology() {
        let body = reply_body(Err(ChatError::Blocked)).unwrap();
        assert_eq!(body["response"], SAFETY_APOLOGY);
    }

    #[test]
    fn empty_reply_answers_with_fallback() {
        let body = reply_body(Err(ChatError::EmptyReply)).unwrap();
        assert_eq!(body["response"], EMPTY_REPLY_FALLBACK);
    }

    #[test]
    fn api_failure_is_an_internal_error() {
        let err = reply_body(Err(ChatError::Api("status 500".into()))).unwrap_err();
        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
