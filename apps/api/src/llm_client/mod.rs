//! LLM Client — the single point of entry for all inference API calls in PlainTerms.
//!
//! ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
//! All LLM interactions MUST go through this module, usually via the `ChatCompleter` trait.
//!
//! Model: gpt-4o (hardcoded — do not make configurable to prevent drift)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// The model used for all LLM calls in PlainTerms.
pub const MODEL: &str = "gpt-4o";
const TEMPERATURE: f32 = 0.2;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Provider error codes that mean "you are sending too much", not "something broke".
const RATE_LIMIT_CODES: &[&str] = &["insufficient_quota", "rate_limit_exceeded"];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

impl LlmError {
    /// True when the provider rejected the call for rate-limit or quota reasons.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            LlmError::Api { status, code, .. } => {
                *status == 429
                    || code
                        .as_deref()
                        .is_some_and(|c| RATE_LIMIT_CODES.contains(&c))
            }
            LlmError::Http(e) => e.status().is_some_and(|s| s.as_u16() == 429),
        }
    }
}

/// One chat completion: a system instruction, a user message and the output mode.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    /// Ask the provider to constrain output to a single JSON object.
    pub json_mode: bool,
}

/// Anything that can turn a `ChatRequest` into raw model text.
///
/// Carried in `AppState` as `Arc<dyn ChatCompleter>` so the summarizer can be exercised
/// without the network.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Returns the assistant message text; an empty string when the model returned no content.
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice, or "" if the model produced nothing.
    pub fn text(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
}

/// Turns a non-2xx provider response body into an `LlmError::Api`.
fn api_error(status: u16, body: String) -> LlmError {
    match serde_json::from_str::<OpenAiError>(&body) {
        Ok(parsed) => LlmError::Api {
            status,
            // Quota exhaustion is reported through `type` on some accounts and `code` on others.
            code: parsed.error.code.or(parsed.error.error_type),
            message: parsed.error.message,
        },
        Err(_) => LlmError::Api {
            status,
            code: None,
            message: body,
        },
    }
}

/// The single LLM client used by the summarizer.
/// Wraps the OpenAI Chat Completions API. Calls are never retried here.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Makes a raw call to the chat completions API, returning the full response object.
    pub async fn call(&self, request: ChatRequest<'_>) -> Result<ChatCompletionResponse, LlmError> {
        let body = ChatCompletionRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            response_format: request.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: json_mode={}, prompt_tokens={}, completion_tokens={}",
                request.json_mode, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl ChatCompleter for LlmClient {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        Ok(response.text().to_string())
    }
}
