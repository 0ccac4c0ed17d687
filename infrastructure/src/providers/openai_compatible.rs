//! OpenAI-compatible chat completion adapter
//!
//! Works with any endpoint that speaks the `/chat/completions` dialect,
//! including Google's OpenAI-compatible Gemini endpoint.

use async_trait::async_trait;
use newsquiz_application::{GatewayError, TextGenerator};
use newsquiz_domain::{MessageFraming, Prompt, truncate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Characters of an error body kept in [`GatewayError::RequestFailed`].
const ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct OpenAiCompatibleGenerator {
    name: String,
    api_key: Option<String>,
    base_url: String,
    model: String,
    framing: MessageFraming,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    http_client: reqwest::Client,
}

impl OpenAiCompatibleGenerator {
    pub fn new(
        provider: &str,
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            name: format!("{}/{}", provider, model),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model,
            framing: MessageFraming::RoleTagged,
            temperature: None,
            max_tokens: None,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_framing(mut self, framing: MessageFraming) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, prompt: &Prompt) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: prompt
                .framed(self.framing)
                .messages()
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str().to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatibleGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        let request = self.build_request(prompt);
        debug!(model = %self.name, messages = request.messages.len(), "Sending chat completion");

        let mut builder = self.http_client.post(self.endpoint()).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "{} ({}): {}",
                self.name,
                status,
                truncate(&error_text, ERROR_BODY_CHARS)
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Other(format!("invalid completion body: {}", e)))?;

        extract_content(completion)
    }
}

fn extract_content(completion: ChatCompletionResponse) -> Result<String, GatewayError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GatewayError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
