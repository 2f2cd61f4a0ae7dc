//! The generate flow and the state it needs between requests.
//!
//! A [`Session`] owns the request settings, the credential cache and the
//! current API key. Callers hand it a [`CompletionClient`] for each request,
//! so the same session logic drives the CLI, the web server and the tests.

use tracing::{debug, info, warn};

use crate::CompletionClient;
use crate::config::CourseConfig;
use crate::course::CourseContent;
use crate::credentials::{API_KEY_STORAGE_KEY, CredentialStore};
use crate::error::{GenerateError, MIN_TITLE_CHARS, ValidationError};

/// Trimmed, validated inputs for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub course_title: String,
    pub api_key: String,
}

/// Check a title and key, trimming both.
///
/// Checks run in a fixed order so the first missing piece is the one
/// reported: title present, key present, title long enough.
pub fn validate_inputs(
    course_title: &str,
    api_key: &str,
) -> Result<ValidatedInput, ValidationError> {
    let course_title = course_title.trim();
    let api_key = api_key.trim();

    if course_title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if api_key.is_empty() {
        return Err(ValidationError::MissingApiKey);
    }
    if course_title.chars().count() < MIN_TITLE_CHARS {
        return Err(ValidationError::TitleTooShort);
    }

    Ok(ValidatedInput {
        course_title: course_title.to_string(),
        api_key: api_key.to_string(),
    })
}

/// Where [`Session::resolve_api_key`] found the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Flag,
    Env,
    Cache,
    Missing,
}

/// Request settings, credential cache and current API key.
pub struct Session {
    config: CourseConfig,
    store: Box<dyn CredentialStore>,
    api_key: String,
}

impl Session {
    /// Open a session, reading any cached API key from `store`.
    ///
    /// A cache that cannot be read is logged and treated as empty.
    pub fn open(config: CourseConfig, store: Box<dyn CredentialStore>) -> Self {
        let api_key = match store.load(API_KEY_STORAGE_KEY) {
            Ok(Some(key)) => {
                debug!("loaded cached API key");
                key
            }
            Ok(None) => String::new(),
            Err(e) => {
                warn!("could not read credential cache: {e}");
                String::new()
            }
        };
        Self {
            config,
            store,
            api_key,
        }
    }

    pub fn config(&self) -> &CourseConfig {
        &self.config
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Replace the current API key and write it to the cache.
    ///
    /// The key is stored as given, untrimmed; validation trims it per
    /// request. A cache write failure is logged and otherwise ignored.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
        if let Err(e) = self.store.save(API_KEY_STORAGE_KEY, &self.api_key) {
            warn!("could not write credential cache: {e}");
        }
    }

    /// Use `api_key` for this session without writing it to the cache.
    pub fn use_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Pick the API key from, highest priority first, an explicit `flag`
    /// value (also written to the cache), a non-blank `env` value (not
    /// cached), or the key already loaded from the cache.
    pub fn resolve_api_key(&mut self, flag: Option<&str>, env: Option<&str>) -> ApiKeySource {
        if let Some(key) = flag {
            self.set_api_key(key);
            return ApiKeySource::Flag;
        }
        if let Some(key) = env.filter(|k| !k.trim().is_empty()) {
            self.use_api_key(key);
            return ApiKeySource::Env;
        }
        if self.has_api_key() {
            ApiKeySource::Cache
        } else {
            ApiKeySource::Missing
        }
    }

    /// Clear the current API key and remove it from the cache.
    pub fn forget_api_key(&mut self) {
        self.api_key.clear();
        if let Err(e) = self.store.clear(API_KEY_STORAGE_KEY) {
            warn!("could not clear credential cache: {e}");
        }
    }

    /// Validate `course_title` against the session's current key.
    pub fn validate(&self, course_title: &str) -> Result<ValidatedInput, ValidationError> {
        validate_inputs(course_title, &self.api_key)
    }

    /// Return the raw model reply for `course_title` without segmenting it.
    pub async fn generate_raw(
        &self,
        client: &dyn CompletionClient,
        course_title: &str,
    ) -> Result<(ValidatedInput, String), GenerateError> {
        let input = self.validate(course_title)?;
        let request = self.config.build_request(&input.course_title);

        info!(
            "generating course package for \"{}\" with {}",
            input.course_title, self.config.model
        );
        let reply = client.complete(&input.api_key, &request).await?;
        Ok((input, reply))
    }

    /// Run the full flow: validate, request, segment.
    pub async fn generate(
        &self,
        client: &dyn CompletionClient,
        course_title: &str,
    ) -> Result<CourseContent, GenerateError> {
        let (input, reply) = self.generate_raw(client, course_title).await?;
        Ok(CourseContent::from_reply(input.course_title, &reply))
    }
}
