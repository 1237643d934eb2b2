use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Display name used when a turn is rendered into a prompt.
    pub fn display_name(&self) -> &'static str {
        match self {
            MessageRole::User => "Student",
            MessageRole::Assistant => "Tutor",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StoredMessage {
    pub id: String,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    pub user_id: Option<String>,
    pub html_context: Option<String>,
    pub instructions_context: Option<String>,
    pub cited_sources: Vec<String>,
    pub tokens_used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredMessage {
    pub fn from_user(
        id: &str,
        session_id: &str,
        content: &str,
        user_id: Option<String>,
        html_context: Option<String>,
        instructions_context: Option<String>,
    ) -> Self {
        StoredMessage {
            id: id.to_string(),
            session_id: session_id.to_string(),
            role: MessageRole::User,
            content: content.to_string(),
            user_id,
            html_context,
            instructions_context,
            cited_sources: Vec::new(),
            tokens_used: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn from_assistant(
        id: &str,
        session_id: &str,
        content: &str,
        user_id: Option<String>,
        cited_sources: Vec<String>,
        tokens_used: u32,
    ) -> Self {
        StoredMessage {
            id: id.to_string(),
            session_id: session_id.to_string(),
            role: MessageRole::Assistant,
            content: content.to_string(),
            user_id,
            html_context: None,
            instructions_context: None,
            cited_sources,
            tokens_used: Some(tokens_used),
            created_at: Some(Utc::now()),
        }
    }

    pub fn as_turn(&self) -> ConversationTurn {
        ConversationTurn {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// One prior turn of a conversation, slimmed down for prompt assembly.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ConversationTurn {
    pub role: MessageRole,
    pub content: String,
}
