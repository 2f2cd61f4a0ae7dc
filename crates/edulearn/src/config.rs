//! Generation settings and application metadata.
//!
//! [`CourseConfig`] holds the request parameters for the chat-completion
//! call and turns a course title into a ready-to-send [`ChatRequest`] via
//! [`build_request`](CourseConfig::build_request).

use crate::course::prompt::{SYSTEM_PROMPT, build_prompt};
use crate::{ChatRequest, Message};

/// Default chat-completion endpoint.
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for course generation.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub const APP_TITLE: &str = "Edu-LearnAI - AI-Powered Course Generator";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const LOADING_MESSAGE: &str = "Generating your educational content...";
pub const DISCLAIMER: &str = "This content is AI-generated and should be critically \
evaluated, fact-checked, and customized for your specific educational context before use.";

/// Environment variable consulted for the API key when none is given
/// explicitly.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Settings for one generate request.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseConfig {
    /// Model identifier. Default: `"gpt-3.5-turbo"`.
    pub model: String,
    /// Token cap for the reply. Default: `3000`.
    pub max_tokens: u32,
    /// Sampling temperature. Default: `0.7`.
    pub temperature: f32,
    /// Full URL of the chat-completion endpoint.
    pub api_base_url: String,
    /// HTTP request timeout in seconds. Default: `120`.
    pub timeout_secs: u64,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 3000,
            temperature: 0.7,
            api_base_url: OPENAI_CHAT_URL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl CourseConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build the chat request for a validated course title: the fixed
    /// system instruction followed by the course prompt.
    pub fn build_request(&self, course_title: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(build_prompt(course_title)),
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
