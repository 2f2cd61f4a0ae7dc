//! Course-package text processing.
//!
//! Everything in here is synchronous and free of I/O:
//!
//! - [`prompt`] builds the instruction sent to the model.
//! - [`segment`](mod@segment) splits the reply into seven fields.
//! - [`format`] renders fields as HTML fragments.
//! - [`export`] produces the plain-text copies of a package.

pub mod export;
pub mod format;
pub mod prompt;
pub mod segment;

pub use export::{Section, all_content_text, section_text};
pub use format::{FormattedCourseContent, format_content, format_sections};
pub use prompt::{SYSTEM_PROMPT, build_prompt};
pub use segment::{ParsedCourseContent, segment};

use serde::{Deserialize, Serialize};

/// Result of one successful generation: the validated title and the
/// segmented reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseContent {
    pub title: String,
    pub sections: ParsedCourseContent,
}

impl CourseContent {
    /// Segment a raw model reply for `title`.
    pub fn from_reply(title: impl Into<String>, reply: &str) -> Self {
        Self {
            title: title.into(),
            sections: segment(reply),
        }
    }

    /// HTML fragments for every field.
    pub fn formatted(&self) -> FormattedCourseContent {
        format_sections(&self.sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_reply_segments_and_keeps_title() {
        let content =
            CourseContent::from_reply("Databases", "COURSE_OBJECTIVE: Model data.\nSYLLABUS: SQL");
        assert_eq!(content.title, "Databases");
        assert_eq!(content.sections.objective, "Model data.");
        assert_eq!(content.formatted().syllabus, "<p>SQL</p>");
    }
}
