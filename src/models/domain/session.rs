use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How many recent questions a session's progress record keeps.
pub const RECENT_QUESTION_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TutorSession {
    pub session_id: String,
    pub user_id: Option<String>,
    pub attempt_count: i32,
    pub progress: LearningProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl TutorSession {
    pub fn new(session_id: &str, user_id: Option<String>) -> Self {
        TutorSession {
            session_id: session_id.to_string(),
            user_id,
            attempt_count: 0,
            progress: LearningProgress::default(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}

/// Running analytics for one session: every topic seen so far, the topics
/// of the latest question, a bounded history of recent questions, and the
/// last-interaction timestamp.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LearningProgress {
    pub topics_covered: Vec<String>,
    pub recent_topics: Vec<String>,
    pub recent_questions: Vec<String>,
    pub last_interaction: Option<DateTime<Utc>>,
}

impl LearningProgress {
    /// Fold one question and its extracted topics into the record.
    /// `topics_covered` keeps first-seen order and stays duplicate-free;
    /// `recent_questions` is trimmed to the newest [`RECENT_QUESTION_LIMIT`].
    pub fn record_question(
        &mut self,
        question: &str,
        topics: &BTreeSet<String>,
        now: DateTime<Utc>,
    ) {
        for topic in topics {
            if !self.topics_covered.contains(topic) {
                self.topics_covered.push(topic.clone());
            }
        }
        self.recent_topics = topics.iter().cloned().collect();

        self.recent_questions.push(question.to_string());
        if self.recent_questions.len() > RECENT_QUESTION_LIMIT {
            let excess = self.recent_questions.len() - RECENT_QUESTION_LIMIT;
            self.recent_questions.drain(..excess);
        }

        self.last_interaction = Some(now);
    }
}
