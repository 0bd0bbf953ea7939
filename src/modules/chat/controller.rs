use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::modules::chat::schema::{ChatRequest, SessionHistoryResponse};
use crate::AppState;

pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    let model = payload
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.config.default_chat_model.clone());

    let body = state
        .chat
        .handle_chat(&payload.session_id, &payload.prompt, &model)
        .await?;

    Ok(Json(body))
}

pub async fn list_models(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.ollama.list_models().await.map(Json).map_err(|e| {
        tracing::warn!("could not list chat models: {}", e);
        AppError::ServiceUnavailable(format!("Could not fetch chat models: {}", e))
    })
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionHistoryResponse>, AppError> {
    let turns = state.chat.history(&id).await?;

    Ok(Json(SessionHistoryResponse {
        session_id: id,
        turn_count: turns.len(),
        turns,
    }))
}
