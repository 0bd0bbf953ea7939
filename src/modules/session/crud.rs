use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::RwLock;

use super::model::{recent_turns, ChatTurn, SessionId};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid session id: {0}")]
    InvalidId(String),
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session data is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persistence for chat histories keyed by session id.
///
/// `save` keeps only the newest `window` turns. Callers that need
/// read-modify-write consistency must hold the session's lock from
/// [`super::locks::SessionLocks`] across `load` and `save`.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Returns the stored turns, or an empty history for an unknown id.
    async fn load(&self, id: &SessionId) -> Result<Vec<ChatTurn>, SessionError>;

    /// Replaces the stored history with the tail of `turns`.
    async fn save(&self, id: &SessionId, turns: &[ChatTurn]) -> Result<(), SessionError>;

    fn window(&self) -> usize;
}

/// One `<id>.json` file per session under a base directory.
pub struct FileSessionRepository {
    base_dir: PathBuf,
    window: usize,
}

impl FileSessionRepository {
    pub fn new(base_dir: impl Into<PathBuf>, window: usize) -> Self {
        Self {
            base_dir: base_dir.into(),
            window,
        }
    }

    fn session_file_path(&self, id: &SessionId) -> PathBuf {
        self.base_dir.join(format!("{}.json", id.as_str()))
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn load(&self, id: &SessionId) -> Result<Vec<ChatTurn>, SessionError> {
        let path = self.session_file_path(id);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, id: &SessionId, turns: &[ChatTurn]) -> Result<(), SessionError> {
        tokio::fs::create_dir_all(&self.base_dir).await?;

        let kept = recent_turns(turns, self.window);
        let json = serde_json::to_vec_pretty(kept)?;

        // Write then rename so a crash never leaves a half-written history.
        let path = self.session_file_path(id);
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        tracing::debug!(session_id = %id, turns = kept.len(), "session saved");
        Ok(())
    }

    fn window(&self) -> usize {
        self.window
    }
}

/// Process-local store, lost on restart.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Vec<ChatTurn>>>,
    window: usize,
}

impl InMemorySessionRepository {
    pub fn new(window: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            window,
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn load(&self, id: &SessionId) -> Result<Vec<ChatTurn>, SessionError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, id: &SessionId, turns: &[ChatTurn]) -> Result<(), SessionError> {
        let kept = recent_turns(turns, self.window).to_vec();
        self.sessions.write().await.insert(id.clone(), kept);
        Ok(())
    }

    fn window(&self) -> usize {
        self.window
    }
}
