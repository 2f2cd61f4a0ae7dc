//! AI-assisted course package generator.
//!
//! `edulearn` turns a course title into a seven-part course package: an
//! objective, a syllabus, three learning outcomes aligned with Bloom's
//! Taxonomy (knowledge, comprehension, application), suggested assessments
//! and recommended readings. The text comes from an OpenAI-compatible chat
//! completions endpoint; this crate builds the prompt, makes the call, and
//! splits the free-text reply into labeled fields.
//!
//! # Getting started
//!
//! ```ignore
//! use edulearn::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GenerateError> {
//!     let config = CourseConfig::default();
//!     let client = OpenAiClient::new(&config)?;
//!
//!     let mut session = Session::open(config, Box::new(MemoryCredentialStore::default()));
//!     session.set_api_key(std::env::var("OPENAI_API_KEY").unwrap_or_default());
//!
//!     let content = session.generate(&client, "Introduction to Rust").await?;
//!     println!("{}", all_content_text(&content));
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Prompt text and reply parsing:** [`course::prompt`] and
//!   [`course::segment`]. Both are pure functions with no I/O.
//! - **HTML rendering and copy text:** [`course::format`] and
//!   [`course::export`].
//! - **Request settings:** [`CourseConfig`](config::CourseConfig).
//! - **The generate flow:** [`Session`](session::Session) validates input,
//!   calls a [`CompletionClient`], and segments the reply.
//! - **Local state:** [`credentials`] caches the API key between runs;
//!   [`clipboard`] writes copy text to the system clipboard.

pub mod clipboard;
pub mod config;
pub mod course;
pub mod credentials;
pub mod error;
pub mod prelude;
pub mod session;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use crate::config::CourseConfig;
use crate::error::GenerateError;

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
        }
    }
}

/// A message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    #[serde(default)]
    choices: Vec<RawChoice>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

/// Error body of a non-2xx response: `{"error": {"message": "..."}}`.
#[derive(Deserialize, Debug, Default)]
struct RawErrorBody {
    error: Option<ApiErrorResponse>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: Option<String>,
}

/// Clean return type from [`OpenAiClient::chat`].
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Boxed future returned by [`CompletionClient::complete`].
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, GenerateError>> + Send + 'a>>;

/// Something that can answer a chat request with the reply text.
///
/// The API key is passed per call so one client can serve several sessions.
pub trait CompletionClient: Send + Sync {
    fn complete<'a>(&'a self, api_key: &'a str, request: &'a ChatRequest) -> CompletionFuture<'a>;
}

/// Async HTTP client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiClient {
    /// Create a client for `config.api_base_url` with `config.timeout_secs`.
    pub fn new(config: &CourseConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("edulearn/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerateError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.api_base_url.clone(),
        })
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a chat completion request authenticated with `api_key`.
    pub async fn chat(
        &self,
        api_key: &str,
        body: &ChatRequest,
    ) -> Result<ChatCompletion, GenerateError> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GenerateError::Transport(format!("failed to read response: {e}")))?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            let message = serde_json::from_str::<RawErrorBody>(&text)
                .unwrap_or_default()
                .error
                .and_then(|e| e.message);
            warn!("API returned HTTP {status}");
            return Err(GenerateError::api(status.as_u16(), message));
        }

        let parsed: RawChatResponse = serde_json::from_str(&text)
            .map_err(|e| GenerateError::MalformedResponse(format!("invalid JSON: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(GenerateError::api(status.as_u16(), err.message));
        }

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            );
        }

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            GenerateError::MalformedResponse("response contains no choices".into())
        })?;
        let content = choice.message.content.ok_or_else(|| {
            GenerateError::MalformedResponse("choices[0].message.content is missing".into())
        })?;

        debug!("LLM output: {} chars", content.len());

        Ok(ChatCompletion {
            content,
            usage: parsed.usage,
            finish_reason: choice.finish_reason,
        })
    }
}

impl CompletionClient for OpenAiClient {
    fn complete<'a>(&'a self, api_key: &'a str, request: &'a ChatRequest) -> CompletionFuture<'a> {
        Box::pin(async move {
            let completion = self.chat(api_key, request).await?;
            if completion.finish_reason.as_deref() == Some("length") {
                warn!("reply was cut off by the max_tokens limit; later sections may be missing");
            }
            Ok(completion.content)
        })
    }
}
