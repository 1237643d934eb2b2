use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use crate::{config::Config, errors::AppResult, models::domain::RetrievedDocument};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RetrievalService: Send + Sync {
    /// Top-`max_results` chunks relevant to the query, restricted to the
    /// given content categories and to scores at or above `min_similarity`.
    async fn search_relevant_documents(
        &self,
        query: &str,
        max_results: usize,
        min_similarity: f32,
        categories: Vec<String>,
    ) -> AppResult<Vec<RetrievedDocument>>;
}

/// Client for the embedding-search service, a plain JSON-over-HTTP endpoint.
pub struct HttpRetrievalService {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    min_similarity: f32,
    categories: Vec<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    documents: Vec<RetrievedDocument>,
}

impl HttpRetrievalService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.retrieval_endpoint.clone(),
        }
    }
}

#[async_trait]
impl RetrievalService for HttpRetrievalService {
    async fn search_relevant_documents(
        &self,
        query: &str,
        max_results: usize,
        min_similarity: f32,
        categories: Vec<String>,
    ) -> AppResult<Vec<RetrievedDocument>> {
        let request = SearchRequest {
            query,
            max_results,
            min_similarity,
            categories,
        };

        let response: SearchResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.documents)
    }
}
