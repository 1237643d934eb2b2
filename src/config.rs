use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub openai_api_key: SecretString,
    pub openai_model: String,
    pub retrieval_endpoint: String,
    pub max_retrieved_chunks: usize,
    pub min_similarity: f32,
    pub max_response_tokens: u32,
    pub history_turn_limit: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "mentor-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_else(|_| "sk-dev-placeholder".to_string()),
            ),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            retrieval_endpoint: env::var("RETRIEVAL_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:9200/search".to_string()),
            max_retrieved_chunks: env::var("MAX_RETRIEVED_CHUNKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            min_similarity: env::var("MIN_SIMILARITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.7),
            max_response_tokens: env::var("MAX_RESPONSE_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),
            history_turn_limit: env::var("HISTORY_TURN_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let api_key = self.openai_api_key.expose_secret();

        if api_key == "sk-dev-placeholder" {
            panic!(
                "FATAL: OPENAI_API_KEY is using default value! Set OPENAI_API_KEY environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "mentor-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            openai_api_key: SecretString::from("sk-test-key".to_string()),
            openai_model: "gpt-4o-mini".to_string(),
            retrieval_endpoint: "http://localhost:9200/search".to_string(),
            max_retrieved_chunks: 5,
            min_similarity: 0.7,
            max_response_tokens: 800,
            history_turn_limit: 10,
        }
    }
}
