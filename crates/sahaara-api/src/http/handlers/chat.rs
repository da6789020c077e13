//! Chat endpoints.
//!
//! - POST /api/v1/chat          - Send a message, receive the full reply
//! - POST /api/v1/chat/session  - Start a fresh session with the welcome text

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sahaara_types::session::SessionId;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Existing session ID to continue; if absent, a new session is created.
    pub session_id: Option<SessionId>,
    /// The user message.
    pub message: String,
    /// Optional image attachment as a `data:image/...;base64,...` URL.
    pub image: Option<String>,
}

/// Payload returned for each chat exchange.
#[derive(Debug, Serialize)]
pub struct ChatData {
    pub session_id: SessionId,
    pub response: String,
    pub current_agent: String,
    pub language: Option<String>,
    pub safety_plan_available: bool,
}

/// Payload returned when a fresh session is opened.
#[derive(Debug, Serialize)]
pub struct NewSessionData {
    pub session_id: SessionId,
    pub welcome: String,
}

/// Describe an attached image for the model.
///
/// The hosted models are text-only, so the attachment is reduced to a short
/// note appended to the message. The payload is decoded only to validate it;
/// a malformed attachment is logged and dropped rather than failing the
/// whole message.
fn image_note(data_url: &str) -> Option<String> {
    let (header, payload) = data_url.split_once(";base64,")?;
    let format = header.strip_prefix("data:image/")?;

    match BASE64.decode(payload) {
        Ok(bytes) => {
            tracing::debug!(format, size = bytes.len(), "image attachment received");
            Some(format!(
                "[Note: An image ({format}) was attached, but image analysis may be limited in this context.]"
            ))
        }
        Err(error) => {
            tracing::warn!(%error, "ignoring undecodable image attachment");
            None
        }
    }
}

/// What gets sent onward to the model.
///
/// An empty message with no usable attachment becomes a plain "Hello" so the
/// model still has something to greet; once an image note exists it is
/// appended to the raw message instead.
fn compose_model_content(message: &str, image: Option<&str>) -> String {
    match image.and_then(image_note) {
        Some(note) => format!("{message}\n\n{note}"),
        None if message.is_empty() => "Hello".to_string(),
        None => message.to_string(),
    }
}

/// POST /api/v1/chat - Run one exchange with the active agent.
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatData>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let message = body.message.trim();
    if message.is_empty() && body.image.is_none() {
        return Err(AppError::Validation(
            "Message or image attachment required".to_string(),
        ));
    }

    let session_id = body.session_id.unwrap_or_else(Uuid::now_v7);
    let model_content = compose_model_content(message, body.image.as_deref());

    let outcome = state
        .engine
        .handle_message(session_id, message, &model_content)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let safety_plan_available = outcome.safety_plan_available;

    let data = ChatData {
        session_id,
        response: outcome.response,
        current_agent: outcome.current_agent.to_string(),
        language: outcome.language.map(|l| l.to_string()),
        safety_plan_available,
    };

    let mut resp =
        ApiResponse::success(data, request_id, elapsed).with_link("self", "/api/v1/chat");
    if safety_plan_available {
        resp = resp.with_link(
            "safety_plan",
            &format!("/api/v1/chat/session/{session_id}/safety-plan"),
        );
    }

    Ok(Json(resp))
}

/// POST /api/v1/chat/session - Open a fresh session and return the welcome.
pub async fn new_session(State(state): State<AppState>) -> Json<ApiResponse<NewSessionData>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = Uuid::now_v7();
    let welcome = state.engine.reset_session(&session_id).to_string();

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        NewSessionData {
            session_id,
            welcome,
        },
        request_id,
        elapsed,
    )
    .with_link("chat", "/api/v1/chat");

    Json(resp)
}
