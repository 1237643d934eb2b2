use serde::{Deserialize, Serialize};

/// One reference chunk returned by the embedding-search service.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RetrievedDocument {
    pub id: String,
    pub source: String,
    pub chunk_text: String,
    pub similarity_score: Option<f32>,
}
