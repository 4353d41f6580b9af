pub mod telegram;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use serde::Deserialize;

/// A single entry of a `getUpdates` batch
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub new_chat_members: Vec<Member>,
}

/// A user who just joined the chat
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Member {
    /// First name, `@username` when known, and id, for log lines
    pub fn describe(&self) -> String {
        match &self.username {
            Some(username) => format!("{} @{} ({})", self.first_name, username, self.id),
            None => format!("{} ({})", self.first_name, self.id),
        }
    }
}

/// Failure of a single Bot API call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request rejected: {description}")]
    Rejected { description: String },
}

/// The three Bot API operations the bot relies on.
///
/// `kick_chat_member` and `delete_message` hand back the raw response body;
/// it is only ever logged.
#[async_trait]
pub trait BotApi: Send + Sync {
    async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, ApiError>;

    async fn kick_chat_member(&self, user_id: i64) -> Result<String, ApiError>;

    async fn delete_message(&self, message_id: i64) -> Result<String, ApiError>;
}
