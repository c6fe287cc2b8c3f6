use axum::{
    extract::{State, rejection::JsonRejection},
    Json,
};
use crate::{
    message::{ChatRequest, ChatResponse},
    state::SharedState,
    error::AppError,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;

    let trimmed = payload.message.trim();

    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => state.sessions.ensure_session(s.trim()).await,
        _ => state.sessions.create_session().await,
    };

    let response = state.chatbot.reply(&state.sessions, &session_id, trimmed).await?;

    Ok(Json(ChatResponse { session_id, response }))
}
