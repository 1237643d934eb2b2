use crate::models::{domain::RetrievedDocument, dto::AskRequest};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard ask request
    pub fn ask_request() -> AskRequest {
        AskRequest {
            session_id: "sess-1".to_string(),
            question: "How do I fix this flexbox bug?".to_string(),
            html_context: Some("<div class=\"row\"></div>".to_string()),
            instructions_context: None,
            feedback_context: None,
            user_id: Some("user-1".to_string()),
        }
    }

    /// Creates an ask request with a custom question and no editor context
    pub fn ask_request_with_question(question: &str) -> AskRequest {
        AskRequest {
            session_id: "sess-1".to_string(),
            question: question.to_string(),
            html_context: None,
            instructions_context: None,
            feedback_context: None,
            user_id: None,
        }
    }

    /// Creates a retrieved document with a given source
    pub fn retrieved_document(id: &str, source: &str) -> RetrievedDocument {
        RetrievedDocument {
            id: id.to_string(),
            source: source.to_string(),
            chunk_text: "Flexbox aligns children along an axis.".to_string(),
            similarity_score: Some(0.8),
        }
    }

    /// Creates multiple retrieved documents for testing deduplication
    pub fn retrieved_documents() -> Vec<RetrievedDocument> {
        vec![
            retrieved_document("d1", "flexbox.md"),
            retrieved_document("d2", "flexbox.md"),
            retrieved_document("d3", "layout.md"),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}
