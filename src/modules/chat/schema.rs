use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::session::model::ChatTurn;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "session_id cannot be empty"))]
    pub session_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Prompt cannot be empty"))]
    pub prompt: String,
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionHistoryResponse {
    pub session_id: String,
    pub turns: Vec<ChatTurn>,
    pub turn_count: usize,
}
