//! Split a model reply into the seven course-package fields.
//!
//! Each field is located independently: find its header token, then capture
//! everything up to the header that is expected to follow it (or the end of
//! the reply). A missing header only empties its own field. When neither of
//! the first two headers is present the reply is assumed to have ignored the
//! requested format and a line-based fallback fills `objective` and
//! `syllabus`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of leading non-empty lines the fallback assigns to `objective`.
const FALLBACK_OBJECTIVE_LINES: usize = 3;

/// The seven text fields extracted from one model reply.
///
/// Every field is always present; an empty string means the section was not
/// found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCourseContent {
    pub objective: String,
    pub syllabus: String,
    pub knowledge: String,
    pub comprehension: String,
    pub application: String,
    pub assessments: String,
    pub readings: String,
}

impl ParsedCourseContent {
    /// Fields as `(name, value)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("objective", &self.objective),
            ("syllabus", &self.syllabus),
            ("knowledge", &self.knowledge),
            ("comprehension", &self.comprehension),
            ("application", &self.application),
            ("assessments", &self.assessments),
            ("readings", &self.readings),
        ]
    }

    /// Number of non-empty fields.
    pub fn filled_count(&self) -> usize {
        self.fields().iter().filter(|(_, v)| !v.is_empty()).count()
    }
}

// `(?is)`: case-insensitive, `.` spans newlines. Without `m`, `$` is the end
// of the whole reply.
static OBJECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| section_regex("COURSE_OBJECTIVE:", Some("SYLLABUS:")));
static SYLLABUS_RE: LazyLock<Regex> =
    LazyLock::new(|| section_regex("SYLLABUS:", Some("LEARNING_OUTCOMES:")));
static KNOWLEDGE_RE: LazyLock<Regex> =
    LazyLock::new(|| section_regex("KNOWLEDGE:", Some("COMPREHENSION:")));
static COMPREHENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| section_regex("COMPREHENSION:", Some("APPLICATION:")));
static APPLICATION_RE: LazyLock<Regex> =
    LazyLock::new(|| section_regex("APPLICATION:", Some("ASSESSMENTS:")));
static ASSESSMENTS_RE: LazyLock<Regex> =
    LazyLock::new(|| section_regex("ASSESSMENTS:", Some("READINGS:")));
static READINGS_RE: LazyLock<Regex> = LazyLock::new(|| section_regex("READINGS:", None));

fn section_regex(header: &str, next: Option<&str>) -> Regex {
    let header = regex::escape(header);
    let pattern = match next {
        Some(next) => format!(
            r"(?s)(?i-u:{header})\s*(.*?)(?:(?i-u:{})|$)",
            regex::escape(next)
        ),
        None => format!(r"(?s)(?i-u:{header})\s*(.*)$"),
    };
    Regex::new(&pattern).expect("section pattern built from escaped header tokens")
}

fn capture(re: &Regex, raw: &str) -> String {
    re.captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Split `raw` into a [`ParsedCourseContent`].
///
/// Never fails. Headers match case-insensitively in ASCII only, so
/// `ſYLLABUS:` is not a header; each captured span is trimmed.
pub fn segment(raw: &str) -> ParsedCourseContent {
    let mut sections = ParsedCourseContent {
        objective: capture(&OBJECTIVE_RE, raw),
        syllabus: capture(&SYLLABUS_RE, raw),
        knowledge: capture(&KNOWLEDGE_RE, raw),
        comprehension: capture(&COMPREHENSION_RE, raw),
        application: capture(&APPLICATION_RE, raw),
        assessments: capture(&ASSESSMENTS_RE, raw),
        readings: capture(&READINGS_RE, raw),
    };

    // Only the two leading headers decide whether the reply followed the
    // format. The remaining fields keep whatever their own search found.
    if sections.objective.is_empty() && sections.syllabus.is_empty() {
        if !raw.trim().is_empty() {
            warn!(
                "reply has no COURSE_OBJECTIVE:/SYLLABUS: headers, using line fallback ({} bytes)",
                raw.len()
            );
        }
        let lines: Vec<&str> = raw.split('\n').filter(|l| !l.trim().is_empty()).collect();
        let split = lines.len().min(FALLBACK_OBJECTIVE_LINES);
        sections.objective = lines[..split].join(" ");
        sections.syllabus = lines[split..].join("\n");
    }

    debug!("segmented reply into {}/7 fields", sections.filled_count());
    sections
}
