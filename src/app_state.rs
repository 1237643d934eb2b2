use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoMessageRepository, MongoSessionRepository},
    services::{HttpRetrievalService, OpenAiModelService, TutorService, TutorSettings},
};

#[derive(Clone)]
pub struct AppState {
    pub tutor_service: Arc<TutorService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let session_repository = Arc::new(MongoSessionRepository::new(&db));
        session_repository.ensure_indexes().await?;

        let message_repository = Arc::new(MongoMessageRepository::new(&db));
        message_repository.ensure_indexes().await?;

        let retrieval_service = Arc::new(HttpRetrievalService::new(&config));
        let model_service = Arc::new(OpenAiModelService::new(&config));

        let tutor_service = Arc::new(TutorService::new(
            session_repository,
            message_repository,
            retrieval_service,
            model_service,
            TutorSettings::from(&config),
        ));

        Ok(Self {
            tutor_service,
            db,
            config: Arc::new(config),
        })
    }
}
