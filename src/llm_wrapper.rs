use crate::schemas::llm_response::{ChatMessage, CompletionRequest, CompletionResponse};
use crate::settings::Settings;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Authentication error: {0}")]
    Unauthorized(String),
    #[error("Provider error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON parsing error: {0}")]
    InvalidResponse(String),
    #[error("Completion response contained no content")]
    EmptyResponse,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the conversation and returns the first choice's text.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LLMError>;
}

/// One system message, the earlier steps as assistant turns, then the new
/// user prompt.
pub fn build_messages(
    system_prompt: &str,
    user_prompt: &str,
    previous_responses: &[String],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(previous_responses.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(
        previous_responses
            .iter()
            .map(|prev| ChatMessage::assistant(prev.as_str())),
    );
    messages.push(ChatMessage::user(user_prompt));
    messages
}

pub async fn generate_response(
    client: &dyn CompletionClient,
    system_prompt: &str,
    user_prompt: &str,
    previous_responses: &[String],
) -> Result<String, LLMError> {
    let messages = build_messages(system_prompt, user_prompt, previous_responses);
    client.complete(messages).await.map_err(|e| {
        tracing::error!("OpenAI API error: {}", e);
        e
    })
}

#[derive(Clone)]
pub struct LLMClient {
    inner: Arc<Client>,
    settings: Arc<Settings>,
}

impl LLMClient {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            inner: Arc::new(Client::new()),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.openai_base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionClient for LLMClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LLMError> {
        let body = CompletionRequest {
            model: &self.settings.model,
            messages: &messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            n: 1,
        };

        tracing::debug!(
            "Sending {} messages to model {}",
            messages.len(),
            self.settings.model
        );

        let response = self
            .inner
            .post(self.endpoint())
            .bearer_auth(&self.settings.openai_api_key)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::UNAUTHORIZED => {
                let error_body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error response body".to_string());
                Err(LLMError::Unauthorized(error_body))
            }
            status if !status.is_success() => {
                let error_body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("HTTP error: {}", status));
                Err(LLMError::Api {
                    status,
                    body: error_body,
                })
            }
            _ => {
                let parsed = response
                    .json::<CompletionResponse>()
                    .await
                    .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;
                parsed.first_content().ok_or(LLMError::EmptyResponse)
            }
        }
    }
}
