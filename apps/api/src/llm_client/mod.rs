//! LLM Client: the single point of entry for chat-completion calls.
//!
//! Talks to an Azure OpenAI deployment. Exactly one request per call: no retries,
//! no caching. Callers decide how to degrade on failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::AzureOpenAiSettings;

pub const API_VERSION: &str = "2024-02-15-preview";
pub const MAX_TOKENS: u32 = 150;
pub const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response contained no choices")]
    NoChoices,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice. `Ok(None)` when the model returned no content.
    pub fn into_first_content(self) -> Result<Option<String>, LlmError> {
        let choice = self.choices.into_iter().next().ok_or(LlmError::NoChoices)?;
        Ok(choice.message.content)
    }
}

/// A chat-completion backend. `AppState` carries one behind an `Arc<dyn _>`
/// so tests can swap in a scripted implementation.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends one system + user exchange and returns the first completion's text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<Option<String>, LlmError>;
}

/// Builds the deployment's chat-completions URL.
pub fn completions_url(endpoint: &str, deployment: &str) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        endpoint.trim_end_matches('/'),
        deployment,
        API_VERSION
    )
}

/// Azure OpenAI chat-completions client.
#[derive(Clone)]
pub struct AzureOpenAiClient {
    client: Client,
    url: String,
    api_key: String,
}

impl AzureOpenAiClient {
    pub fn new(settings: &AzureOpenAiSettings) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            url: completions_url(&settings.endpoint, &settings.deployment_name),
            api_key: settings.api_key.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatCompletion for AzureOpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<Option<String>, LlmError> {
        let request_body = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Azure OpenAI API error: {} - {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let chat_response: ChatResponse = serde_json::from_str(&body)?;
        debug!("Chat completion succeeded ({} choices)", chat_response.choices.len());

        chat_response.into_first_content()
    }
}
