//! Error types for course generation.
//!
//! Every failure the user can see ends up as a single message string, so the
//! `Display` impls below are the user-facing text. Segmentation never fails;
//! a reply that ignores the requested headers degrades through the fallback
//! path in [`segment`](crate::course::segment::segment) instead.

use thiserror::Error;

/// Minimum accepted course-title length, in characters.
pub const MIN_TITLE_CHARS: usize = 3;

/// Input rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a course title")]
    MissingTitle,

    #[error("Please enter your OpenAI API key")]
    MissingApiKey,

    #[error("Course title must be at least 3 characters long")]
    TitleTooShort,
}

/// Any failure of a generate request.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-2xx response. `message` is the API-provided error text when the
    /// body carried one, otherwise a generic status line.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected API response: {0}")]
    MalformedResponse(String),
}

impl GenerateError {
    /// Build an [`Api`](GenerateError::Api) error, falling back to the generic
    /// status message when the API gave no text.
    pub fn api(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("API request failed: {status}"));
        GenerateError::Api { status, message }
    }

    /// Whether this failure was raised before contacting the API.
    pub fn is_validation(&self) -> bool {
        matches!(self, GenerateError::Validation(_))
    }
}

/// Failure reading or writing the local credential cache.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential cache is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::MissingTitle.to_string(),
            "Please enter a course title"
        );
        assert_eq!(
            ValidationError::MissingApiKey.to_string(),
            "Please enter your OpenAI API key"
        );
        assert_eq!(
            ValidationError::TitleTooShort.to_string(),
            "Course title must be at least 3 characters long"
        );
    }

    #[test]
    fn validation_error_passes_through_verbatim() {
        let err = GenerateError::from(ValidationError::MissingTitle);
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Please enter a course title");
    }

    #[test]
    fn api_error_prefers_provided_message() {
        let err = GenerateError::api(401, Some("Incorrect API key provided".into()));
        assert_eq!(err.to_string(), "Incorrect API key provided");
        assert!(!err.is_validation());
    }

    #[test]
    fn api_error_falls_back_to_status() {
        assert_eq!(
            GenerateError::api(503, None).to_string(),
            "API request failed: 503"
        );
        assert_eq!(
            GenerateError::api(500, Some(String::new())).to_string(),
            "API request failed: 500"
        );
    }
}
