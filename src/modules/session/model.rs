use serde::{Deserialize, Serialize};

use super::crud::SessionError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: String) -> Self {
        Self { role, content }
    }

    pub fn user(content: String) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: String) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: String) -> Self {
        Self::new(Role::System, content)
    }
}

const MAX_ID_LEN: usize = 128;

/// Client supplied session key, checked to be safe as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Accepts ASCII letters, digits, `-` and `_` only, so the id can never
    /// name a path outside the session directory.
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        if raw.is_empty() {
            return Err(SessionError::InvalidId("session_id must not be empty".to_string()));
        }
        if raw.len() > MAX_ID_LEN {
            return Err(SessionError::InvalidId(format!(
                "session_id must be at most {} characters",
                MAX_ID_LEN
            )));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(SessionError::InvalidId(
                "session_id may only contain letters, digits, '-' and '_'".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The newest `limit` turns, oldest first.
pub fn recent_turns(turns: &[ChatTurn], limit: usize) -> &[ChatTurn] {
    let len = turns.len();
    if len <= limit {
        turns
    } else {
        &turns[len - limit..]
    }
}
