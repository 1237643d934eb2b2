use async_trait::async_trait;
use chrono::Utc;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

#[cfg(test)]
use mockall::automock;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{LearningProgress, TutorSession},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch the session for this id, creating a fresh one when none exists.
    async fn get_or_create(
        &self,
        session_id: &str,
        user_id: Option<String>,
    ) -> AppResult<TutorSession>;

    /// Replace the session's progress record and consume one attempt.
    async fn update_progress(
        &self,
        session_id: &str,
        progress: LearningProgress,
    ) -> AppResult<()>;
}

pub struct MongoSessionRepository {
    collection: Collection<TutorSession>,
}

impl MongoSessionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("tutor_sessions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for tutor_sessions collection");

        let session_index = IndexModel::builder()
            .keys(doc! { "session_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("session_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(session_index).await?;

        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MongoSessionRepository {
    async fn get_or_create(
        &self,
        session_id: &str,
        user_id: Option<String>,
    ) -> AppResult<TutorSession> {
        if let Some(session) = self
            .collection
            .find_one(doc! { "session_id": session_id })
            .await?
        {
            return Ok(session);
        }

        let session = TutorSession::new(session_id, user_id);
        self.collection.insert_one(&session).await?;
        log::info!("Created new tutor session {}", session_id);

        Ok(session)
    }

    async fn update_progress(
        &self,
        session_id: &str,
        progress: LearningProgress,
    ) -> AppResult<()> {
        let progress = mongodb::bson::to_bson(&progress)?;
        let modified_at = mongodb::bson::to_bson(&Utc::now())?;

        self.collection
            .update_one(
                doc! { "session_id": session_id },
                doc! {
                    "$set": { "progress": progress, "modified_at": modified_at },
                    "$inc": { "attempt_count": 1 },
                },
            )
            .await?;

        Ok(())
    }
}
