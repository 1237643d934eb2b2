use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

#[cfg(test)]
use mockall::automock;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    prompt::PromptBundle,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelCompletion {
    pub content: String,
    pub total_tokens: u32,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelService: Send + Sync {
    async fn create_chat_completion(
        &self,
        prompt: PromptBundle,
        options: CompletionOptions,
    ) -> AppResult<ModelCompletion>;
}

/// Chat-completion client backed by the OpenAI API.
pub struct OpenAiModelService {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiModelService {
    pub fn new(config: &Config) -> Self {
        let openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl ModelService for OpenAiModelService {
    async fn create_chat_completion(
        &self,
        prompt: PromptBundle,
        options: CompletionOptions,
    ) -> AppResult<ModelCompletion> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .max_tokens(options.max_tokens)
            .temperature(options.temperature)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(prompt.system)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt.user)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::ModelError("model returned no completion".to_string()))?;

        let total_tokens = response.usage.map(|usage| usage.total_tokens).unwrap_or(0);

        Ok(ModelCompletion {
            content,
            total_tokens,
        })
    }
}
