/// LLM Client — the single point of entry for all chat-completion calls.
///
/// No other module may call the OpenAI API directly. Handlers reach it through
/// the `CompletionProvider` trait carried in `AppState`.
///
/// Model: gpt-4 (hardcoded, not configurable)
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// The model used for every completion call.
pub const MODEL: &str = "gpt-4";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid response structure from AI service")]
    EmptyContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Output mode requested from the provider. `Text` is the API default and is
/// not sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

impl ResponseFormat {
    fn is_text(&self) -> bool {
        matches!(self, ResponseFormat::Text)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "ResponseFormat::is_text")]
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    // Compatible gateways may report only some counters.
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
}

impl ChatCompletionResponse {
    /// Extracts the message content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Anything that can turn a list of role-tagged messages into generated text.
///
/// Carried in `AppState` as `Arc<dyn CompletionProvider>`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        format: ResponseFormat,
    ) -> Result<String, LlmError>;
}

/// Requests a JSON object from the provider and deserializes it.
/// The prompt must describe the expected structure.
pub async fn complete_json<T: DeserializeOwned>(
    llm: &dyn CompletionProvider,
    messages: &[ChatMessage],
) -> Result<T, LlmError> {
    let text = llm.complete(messages, ResponseFormat::JsonObject).await?;

    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(&text);

    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(stripped)
}

/// Chat-completion client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Makes a single call to the chat completions API, returning the full
    /// response object. Non-2xx statuses become `LlmError::Api`.
    pub async fn call(
        &self,
        messages: &[ChatMessage],
        format: ResponseFormat,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let request_body = ChatCompletionRequest {
            model: MODEL,
            messages,
            response_format: format,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), body));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={:?}, completion_tokens={:?}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        format: ResponseFormat,
    ) -> Result<String, LlmError> {
        let response = self.call(messages, format).await?;
        response
            .text()
            .map(String::from)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Prefers the provider's `error.message` over the raw body.
fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<OpenAiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}
