//! Convenience re-exports for common `edulearn` types.
//!
//! ```ignore
//! use edulearn::prelude::*;
//! ```
//!
//! Pulls in the client, the session, the configuration and the course
//! text functions. Clipboard and credential backends other than the
//! in-memory and file stores are imported from their modules.

// ── Core types ──────────────────────────────────────────────────────
pub use crate::{ChatRequest, CompletionClient, Message, OpenAiClient};

// ── Configuration and flow ──────────────────────────────────────────
pub use crate::config::CourseConfig;
pub use crate::error::{GenerateError, ValidationError};
pub use crate::session::{ApiKeySource, Session, validate_inputs};

// ── Course text ─────────────────────────────────────────────────────
pub use crate::course::{
    CourseContent, FormattedCourseContent, ParsedCourseContent, Section, all_content_text,
    build_prompt, format_content, section_text, segment,
};

// ── Local state ─────────────────────────────────────────────────────
pub use crate::credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
