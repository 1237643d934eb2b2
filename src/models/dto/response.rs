use serde::Serialize;

use crate::models::domain::{MessageRole, StoredMessage};

/// Sentinel meaning "no limit": question limits are inert in current
/// behavior, so every response reports this value.
pub const UNLIMITED_ATTEMPTS: i32 = -1;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub attempt_count: i32,
    pub max_attempts: i32,
    pub is_blocked: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub remaining_attempts: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    pub retrieved_sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_info: Option<SessionInfo>,
}

impl AskResponse {
    pub fn success(
        response: String,
        message_id: String,
        tokens_used: u32,
        retrieved_sources: Vec<String>,
        attempt_count: i32,
    ) -> Self {
        AskResponse {
            success: true,
            response: Some(response),
            message_id: Some(message_id),
            error: None,
            remaining_attempts: UNLIMITED_ATTEMPTS,
            tokens_used: Some(tokens_used),
            retrieved_sources,
            session_info: Some(SessionInfo {
                attempt_count,
                max_attempts: UNLIMITED_ATTEMPTS,
                is_blocked: false,
            }),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        AskResponse {
            success: false,
            response: None,
            message_id: None,
            error: Some(error.into()),
            remaining_attempts: UNLIMITED_ATTEMPTS,
            tokens_used: None,
            retrieved_sources: Vec::new(),
            session_info: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub cited_sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    pub created_at: String,
}

impl From<StoredMessage> for MessageDto {
    fn from(message: StoredMessage) -> Self {
        MessageDto {
            id: message.id,
            role: message.role,
            content: message.content,
            cited_sources: message.cited_sources,
            tokens_used: message.tokens_used,
            created_at: message
                .created_at
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let response = AskResponse::success(
            "Use margin: 0 auto.".to_string(),
            "m-1".to_string(),
            120,
            vec!["css-basics.md".to_string()],
            3,
        );

        let json = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["remainingAttempts"], UNLIMITED_ATTEMPTS);
        assert_eq!(json["sessionInfo"]["isBlocked"], false);
        assert_eq!(json["sessionInfo"]["maxAttempts"], UNLIMITED_ATTEMPTS);
        assert_eq!(json["retrievedSources"][0], "css-basics.md");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_response_shape() {
        let response = AskResponse::failure("Sorry, something went wrong.");

        let json = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(json["success"], false);
        assert_eq!(json["remainingAttempts"], UNLIMITED_ATTEMPTS);
        assert!(json.get("response").is_none());
        assert!(json.get("sessionInfo").is_none());
    }
}
