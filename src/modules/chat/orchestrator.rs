use serde_json::Value;
use std::sync::Arc;

use super::language::{detect_by_marker_words, LanguageDetector};
use crate::error::AppError;
use crate::modules::session::crud::SessionRepository;
use crate::modules::session::locks::SessionLocks;
use crate::modules::session::model::{recent_turns, ChatTurn, SessionId};
use crate::services::ollama::{OllamaClient, SamplingOptions};

/// Session-aware chat: loads history, forwards the newest turns to Ollama,
/// and persists the exchange once the model has answered.
pub struct ChatOrchestrator {
    sessions: Arc<dyn SessionRepository>,
    locks: SessionLocks,
    ollama: OllamaClient,
    detector: LanguageDetector,
}

impl ChatOrchestrator {
    pub fn new(sessions: Arc<dyn SessionRepository>, ollama: OllamaClient) -> Self {
        Self {
            sessions,
            locks: SessionLocks::new(),
            ollama,
            detector: detect_by_marker_words,
        }
    }

    pub fn with_detector(mut self, detector: LanguageDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Runs one chat exchange and returns the upstream body unchanged.
    ///
    /// Nothing is written when validation or the upstream call fails, so a
    /// failed exchange leaves the stored history exactly as it was.
    pub async fn handle_chat(
        &self,
        session_id: &str,
        prompt: &str,
        model: &str,
    ) -> Result<Value, AppError> {
        if session_id.trim().is_empty() {
            return Err(AppError::InvalidInput("session_id must not be empty".to_string()));
        }
        if prompt.trim().is_empty() {
            return Err(AppError::InvalidInput("prompt must not be empty".to_string()));
        }
        let id = SessionId::parse(session_id)?;

        let _guard = self.locks.acquire(&id).await;

        let mut turns = self.sessions.load(&id).await?;

        if turns.is_empty() {
            let variant = (self.detector)(prompt);
            tracing::info!(session_id = %id, ?variant, "starting new session");
            turns.push(ChatTurn::system(variant.instruction().to_string()));
        }
        turns.push(ChatTurn::user(prompt.to_string()));

        let context = recent_turns(&turns, self.sessions.window());

        let completion = self
            .ollama
            .chat(model, context, SamplingOptions::CHAT)
            .await
            .map_err(|e| {
                tracing::warn!(session_id = %id, "chat upstream failed: {}", e);
                AppError::from(e)
            })?;

        turns.push(completion.reply);

        if let Err(e) = self.sessions.save(&id, &turns).await {
            tracing::error!(session_id = %id, "failed to persist session: {}", e);
            return Err(AppError::Persistence(e.to_string()));
        }

        Ok(completion.raw)
    }

    pub async fn history(&self, session_id: &str) -> Result<Vec<ChatTurn>, AppError> {
        let id = SessionId::parse(session_id)?;
        let _guard = self.locks.acquire(&id).await;
        Ok(self.sessions.load(&id).await?)
    }
}
