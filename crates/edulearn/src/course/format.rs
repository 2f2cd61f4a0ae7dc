//! HTML rendering of segmented fields.
//!
//! The output is a fragment meant for `innerHTML`: list markers get a line
//! break in front of them, newlines become `<br>`, runs of breaks collapse to
//! two, and plain text is wrapped in a paragraph.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::segment::ParsedCourseContent;

/// Rendered in place of an empty field.
pub const CONTENT_NOT_AVAILABLE_HTML: &str = "<p><em>Content not available</em></p>";

static NUMBERED_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+\.\s)").expect("numbered marker pattern"));
static BULLET_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([•-]\s)").expect("bullet marker pattern"));
static BREAK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<br>\s*){3,}").expect("break run pattern"));

/// Render one field as an HTML fragment.
pub fn format_content(text: &str) -> String {
    if text.is_empty() {
        return CONTENT_NOT_AVAILABLE_HTML.to_string();
    }

    let text = NUMBERED_MARKER_RE.replace_all(text, "<br>${1}");
    let text = BULLET_MARKER_RE.replace_all(&text, "<br>${1}");
    let text = text.replace('\n', "<br>");
    let text = BREAK_RUN_RE.replace_all(&text, "<br><br>").into_owned();

    if text.contains('<') {
        text
    } else {
        format!("<p>{text}</p>")
    }
}

/// All seven fields rendered with [`format_content`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedCourseContent {
    pub objective: String,
    pub syllabus: String,
    pub knowledge: String,
    pub comprehension: String,
    pub application: String,
    pub assessments: String,
    pub readings: String,
}

/// Render every field of `sections`.
pub fn format_sections(sections: &ParsedCourseContent) -> FormattedCourseContent {
    FormattedCourseContent {
        objective: format_content(&sections.objective),
        syllabus: format_content(&sections.syllabus),
        knowledge: format_content(&sections.knowledge),
        comprehension: format_content(&sections.comprehension),
        application: format_content(&sections.application),
        assessments: format_content(&sections.assessments),
        readings: format_content(&sections.readings),
    }
}
