use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    analysis::extract_topics,
    config::Config,
    errors::AppResult,
    models::{
        domain::{RetrievedDocument, StoredMessage},
        dto::{AskRequest, AskResponse},
    },
    prompt::{
        compose_prompt, format_conversation_history, format_editor_context,
        format_retrieved_documents,
    },
    repositories::{MessageRepository, SessionRepository},
    services::{CompletionOptions, ModelService, RetrievalService},
};

/// The one user-facing failure message. Collaborator errors are logged,
/// never surfaced.
pub const FAILURE_MESSAGE: &str =
    "Sorry, I ran into a problem while preparing your guidance. Please try asking your question again.";

/// Content categories the retrieval query is restricted to.
pub const RETRIEVAL_CATEGORIES: &[&str] = &["lesson", "example", "reference"];

#[derive(Clone, Debug)]
pub struct TutorSettings {
    pub max_retrieved_chunks: usize,
    pub min_similarity: f32,
    pub max_response_tokens: u32,
    pub temperature: f32,
    pub history_turn_limit: i64,
}

impl From<&Config> for TutorSettings {
    fn from(config: &Config) -> Self {
        TutorSettings {
            max_retrieved_chunks: config.max_retrieved_chunks,
            min_similarity: config.min_similarity,
            max_response_tokens: config.max_response_tokens,
            temperature: 0.3,
            history_turn_limit: config.history_turn_limit,
        }
    }
}

/// Top-level entry point for one tutoring exchange: session state, message
/// persistence, retrieval, prompt assembly, the model call, and progress
/// analytics, in that order.
pub struct TutorService {
    sessions: Arc<dyn SessionRepository>,
    messages: Arc<dyn MessageRepository>,
    retrieval: Arc<dyn RetrievalService>,
    model: Arc<dyn ModelService>,
    settings: TutorSettings,
}

impl TutorService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        messages: Arc<dyn MessageRepository>,
        retrieval: Arc<dyn RetrievalService>,
        model: Arc<dyn ModelService>,
        settings: TutorSettings,
    ) -> Self {
        Self {
            sessions,
            messages,
            retrieval,
            model,
            settings,
        }
    }

    /// Answer one learner question. Infallible by contract: any collaborator
    /// failure is converted into the uniform failure response here, and the
    /// cause is logged with the session id and input sizes only.
    pub async fn ask(&self, request: AskRequest) -> AskResponse {
        match self.process(&request).await {
            Ok(response) => response,
            Err(err) => {
                log::error!(
                    "Tutor request failed for session {}: {} (question: {} chars, html context: {} chars)",
                    request.session_id,
                    err,
                    request.question.chars().count(),
                    request
                        .html_context
                        .as_deref()
                        .map(|html| html.chars().count())
                        .unwrap_or(0)
                );
                AskResponse::failure(FAILURE_MESSAGE)
            }
        }
    }

    pub async fn session_history(
        &self,
        session_id: &str,
        limit: i64,
    ) -> AppResult<Vec<StoredMessage>> {
        self.messages.get_session_history(session_id, limit).await
    }

    async fn process(&self, request: &AskRequest) -> AppResult<AskResponse> {
        let session = self
            .sessions
            .get_or_create(&request.session_id, request.user_id.clone())
            .await?;
        let attempt_number = session.attempt_count + 1;

        let user_message = StoredMessage::from_user(
            &Uuid::new_v4().to_string(),
            &request.session_id,
            &request.question,
            request.user_id.clone(),
            request.html_context.clone(),
            request.instructions_context.clone(),
        );
        self.messages.save_user_message(user_message).await?;

        let history = self
            .messages
            .get_recent_context(&request.session_id, self.settings.history_turn_limit)
            .await?;

        let documents = self
            .retrieval
            .search_relevant_documents(
                &request.question,
                self.settings.max_retrieved_chunks,
                self.settings.min_similarity,
                RETRIEVAL_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            )
            .await?;

        let editor_block = format_editor_context(
            request.html_context.as_deref(),
            request.instructions_context.as_deref(),
            request.feedback_context.as_deref(),
        );
        let history_block = format_conversation_history(&history);
        let documents_block = format_retrieved_documents(&documents);

        let bundle = compose_prompt(
            &request.question,
            attempt_number,
            &editor_block,
            &history_block,
            &documents_block,
        );

        let completion = self
            .model
            .create_chat_completion(
                bundle,
                CompletionOptions {
                    max_tokens: self.settings.max_response_tokens,
                    temperature: self.settings.temperature,
                },
            )
            .await?;

        let cited_sources = dedup_sources(&documents);

        let assistant_message_id = Uuid::new_v4().to_string();
        let assistant_message = StoredMessage::from_assistant(
            &assistant_message_id,
            &request.session_id,
            &completion.content,
            request.user_id.clone(),
            cited_sources.clone(),
            completion.total_tokens,
        );
        self.messages.save_assistant_message(assistant_message).await?;

        let topics = extract_topics(&request.question);
        let mut progress = session.progress.clone();
        progress.record_question(&request.question, &topics, Utc::now());
        self.sessions
            .update_progress(&request.session_id, progress)
            .await?;

        Ok(AskResponse::success(
            completion.content,
            assistant_message_id,
            completion.total_tokens,
            cited_sources,
            attempt_number,
        ))
    }
}

/// Cited sources keep first-seen order and drop repeats.
fn dedup_sources(documents: &[RetrievedDocument]) -> Vec<String> {
    let mut sources = Vec::new();
    for document in documents {
        if !sources.contains(&document.source) {
            sources.push(document.source.clone());
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::domain::TutorSession;
    use crate::models::dto::UNLIMITED_ATTEMPTS;
    use crate::repositories::{MockMessageRepository, MockSessionRepository};
    use crate::services::model_service::{MockModelService, ModelCompletion};
    use crate::services::retrieval_service::MockRetrievalService;
    use crate::test_utils::fixtures::{ask_request, retrieved_document, retrieved_documents};

    fn settings() -> TutorSettings {
        TutorSettings {
            max_retrieved_chunks: 5,
            min_similarity: 0.7,
            max_response_tokens: 800,
            temperature: 0.3,
            history_turn_limit: 10,
        }
    }

    fn ok_sessions() -> MockSessionRepository {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_or_create()
            .returning(|session_id, user_id| Ok(TutorSession::new(session_id, user_id)));
        sessions.expect_update_progress().returning(|_, _| Ok(()));
        sessions
    }

    fn ok_messages() -> MockMessageRepository {
        let mut messages = MockMessageRepository::new();
        messages.expect_save_user_message().returning(|_| Ok(()));
        messages
            .expect_get_recent_context()
            .returning(|_, _| Ok(vec![]));
        messages
            .expect_save_assistant_message()
            .returning(|_| Ok(()));
        messages
    }

    fn ok_retrieval() -> MockRetrievalService {
        let mut retrieval = MockRetrievalService::new();
        retrieval
            .expect_search_relevant_documents()
            .returning(|_, _, _, _| Ok(retrieved_documents()));
        retrieval
    }

    fn ok_model() -> MockModelService {
        let mut model = MockModelService::new();
        model.expect_create_chat_completion().returning(|_, _| {
            Ok(ModelCompletion {
                content: "Check align-items on the container.".to_string(),
                total_tokens: 42,
            })
        });
        model
    }

    fn service(
        sessions: MockSessionRepository,
        messages: MockMessageRepository,
        retrieval: MockRetrievalService,
        model: MockModelService,
    ) -> TutorService {
        TutorService::new(
            Arc::new(sessions),
            Arc::new(messages),
            Arc::new(retrieval),
            Arc::new(model),
            settings(),
        )
    }

    #[tokio::test]
    async fn test_ask_happy_path() {
        let response = service(ok_sessions(), ok_messages(), ok_retrieval(), ok_model())
            .ask(ask_request())
            .await;

        assert!(response.success);
        assert_eq!(
            response.response.as_deref(),
            Some("Check align-items on the container.")
        );
        assert!(response.message_id.is_some());
        assert_eq!(response.tokens_used, Some(42));
        assert_eq!(response.retrieved_sources, vec!["flexbox.md", "layout.md"]);
        assert_eq!(response.remaining_attempts, UNLIMITED_ATTEMPTS);

        let info = response.session_info.expect("session info should be set");
        assert_eq!(info.attempt_count, 1);
        assert_eq!(info.max_attempts, UNLIMITED_ATTEMPTS);
        assert!(!info.is_blocked);
    }

    #[tokio::test]
    async fn test_progress_update_carries_question_topics() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_or_create()
            .returning(|session_id, user_id| Ok(TutorSession::new(session_id, user_id)));
        sessions
            .expect_update_progress()
            .times(1)
            .withf(|session_id, progress| {
                session_id == "sess-1"
                    && progress.topics_covered.contains(&"flexbox".to_string())
                    && progress.topics_covered.contains(&"debugging".to_string())
                    && progress.recent_questions == vec!["How do I fix this flexbox bug?"]
                    && progress.last_interaction.is_some()
            })
            .returning(|_, _| Ok(()));

        let response = service(sessions, ok_messages(), ok_retrieval(), ok_model())
            .ask(ask_request())
            .await;
        assert!(response.success);
    }

    #[tokio::test]
    async fn test_model_failure_yields_uniform_response() {
        let mut messages = MockMessageRepository::new();
        messages
            .expect_save_user_message()
            .times(1)
            .returning(|_| Ok(()));
        messages
            .expect_get_recent_context()
            .returning(|_, _| Ok(vec![]));
        messages.expect_save_assistant_message().times(0);

        let mut model = MockModelService::new();
        model
            .expect_create_chat_completion()
            .returning(|_, _| Err(AppError::ModelError("upstream timeout".to_string())));

        let response = service(ok_sessions(), messages, ok_retrieval(), model)
            .ask(ask_request())
            .await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(FAILURE_MESSAGE));
        assert_eq!(response.remaining_attempts, UNLIMITED_ATTEMPTS);
        assert!(response.response.is_none());
        assert!(response.session_info.is_none());
    }

    #[tokio::test]
    async fn test_retrieval_failure_yields_uniform_response() {
        let mut messages = MockMessageRepository::new();
        messages
            .expect_save_user_message()
            .times(1)
            .returning(|_| Ok(()));
        messages
            .expect_get_recent_context()
            .returning(|_, _| Ok(vec![]));
        messages.expect_save_assistant_message().times(0);

        let mut retrieval = MockRetrievalService::new();
        retrieval
            .expect_search_relevant_documents()
            .returning(|_, _, _, _| Err(AppError::RetrievalError("search down".to_string())));

        let response = service(ok_sessions(), messages, retrieval, ok_model())
            .ask(ask_request())
            .await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(FAILURE_MESSAGE));
    }

    #[test]
    fn test_dedup_sources_keeps_first_seen_order() {
        let documents = vec![
            retrieved_document("d1", "b.md"),
            retrieved_document("d2", "a.md"),
            retrieved_document("d3", "b.md"),
        ];
        assert_eq!(dedup_sources(&documents), vec!["b.md", "a.md"]);
    }
}
