use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection, IndexModel};

#[cfg(test)]
use mockall::automock;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{ConversationTurn, StoredMessage},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn save_user_message(&self, message: StoredMessage) -> AppResult<()>;

    async fn save_assistant_message(&self, message: StoredMessage) -> AppResult<()>;

    /// The last `limit` turns of a session, oldest first, slimmed down for
    /// prompt assembly.
    async fn get_recent_context(
        &self,
        session_id: &str,
        limit: i64,
    ) -> AppResult<Vec<ConversationTurn>>;

    /// The last `limit` stored messages of a session, oldest first.
    async fn get_session_history(
        &self,
        session_id: &str,
        limit: i64,
    ) -> AppResult<Vec<StoredMessage>>;
}

pub struct MongoMessageRepository {
    collection: Collection<StoredMessage>,
}

impl MongoMessageRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("tutor_messages");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for tutor_messages collection");

        let session_index = IndexModel::builder()
            .keys(doc! { "session_id": 1, "created_at": -1 })
            .build();

        self.collection.create_index(session_index).await?;

        Ok(())
    }

    async fn recent_messages(
        &self,
        session_id: &str,
        limit: i64,
    ) -> AppResult<Vec<StoredMessage>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(doc! { "session_id": session_id })
            .with_options(find_options)
            .await?;

        let mut messages: Vec<StoredMessage> = cursor.try_collect().await?;
        messages.reverse();

        Ok(messages)
    }
}

#[async_trait]
impl MessageRepository for MongoMessageRepository {
    async fn save_user_message(&self, message: StoredMessage) -> AppResult<()> {
        self.collection.insert_one(&message).await?;
        Ok(())
    }

    async fn save_assistant_message(&self, message: StoredMessage) -> AppResult<()> {
        self.collection.insert_one(&message).await?;
        Ok(())
    }

    async fn get_recent_context(
        &self,
        session_id: &str,
        limit: i64,
    ) -> AppResult<Vec<ConversationTurn>> {
        let messages = self.recent_messages(session_id, limit).await?;
        Ok(messages.iter().map(StoredMessage::as_turn).collect())
    }

    async fn get_session_history(
        &self,
        session_id: &str,
        limit: i64,
    ) -> AppResult<Vec<StoredMessage>> {
        self.recent_messages(session_id, limit).await
    }
}
