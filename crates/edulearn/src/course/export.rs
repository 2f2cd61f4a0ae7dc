//! Plain-text copies of a generated course package.
//!
//! These are the strings placed on the clipboard by the "copy section" and
//! "copy all" actions. Empty fields read as `Content not available`, the same
//! text a reader sees on the rendered page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CourseContent;

/// Plain-text stand-in for an empty field.
pub const CONTENT_NOT_AVAILABLE: &str = "Content not available";

const RULE_WIDTH: usize = 50;

/// Closing note appended to the full-package copy.
pub const EXPORT_NOTE: &str = "Note: This content is AI-generated and should be critically \
evaluated and customized for your specific educational context.";

/// A copyable block of the rendered page. The three learning outcomes are
/// copied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Objective,
    Syllabus,
    Outcomes,
    Assessments,
    Readings,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Objective,
        Section::Syllabus,
        Section::Outcomes,
        Section::Assessments,
        Section::Readings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Objective => "objective",
            Section::Syllabus => "syllabus",
            Section::Outcomes => "outcomes",
            Section::Assessments => "assessments",
            Section::Readings => "readings",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown section '{s}'"))
    }
}

fn or_placeholder(text: &str) -> &str {
    if text.is_empty() {
        CONTENT_NOT_AVAILABLE
    } else {
        text
    }
}

/// Copy text for a single section.
pub fn section_text(section: Section, content: &CourseContent) -> String {
    let title = &content.title;
    let s = &content.sections;
    match section {
        Section::Objective => format!(
            "Course Objective for \"{title}\":\n\n{}",
            or_placeholder(&s.objective)
        ),
        Section::Syllabus => format!(
            "Syllabus for \"{title}\":\n\n{}",
            or_placeholder(&s.syllabus)
        ),
        Section::Outcomes => format!(
            "Learning Outcomes for \"{title}\":\n\n\
             Knowledge: {}\n\n\
             Comprehension: {}\n\n\
             Application: {}",
            or_placeholder(&s.knowledge),
            or_placeholder(&s.comprehension),
            or_placeholder(&s.application),
        ),
        Section::Assessments => format!(
            "Suggested Assessments for \"{title}\":\n\n{}",
            or_placeholder(&s.assessments)
        ),
        Section::Readings => format!(
            "Recommended Readings for \"{title}\":\n\n{}",
            or_placeholder(&s.readings)
        ),
    }
}

/// Copy text for the whole package.
pub fn all_content_text(content: &CourseContent) -> String {
    let s = &content.sections;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!(
        "Educational Content Package: \"{}\"\n",
        content.title
    ));
    out.push_str("Generated by Edu-LearnAI\n");
    out.push_str(&format!("{rule}\n\n"));

    let blocks = [
        ("COURSE OBJECTIVE:", &s.objective),
        ("SYLLABUS:", &s.syllabus),
    ];
    for (heading, body) in blocks {
        out.push_str(&format!("{heading}\n{}\n\n", or_placeholder(body)));
    }

    out.push_str("LEARNING OUTCOMES (Bloom's Taxonomy):\n\n");
    let blocks = [
        ("Knowledge:", &s.knowledge),
        ("Comprehension:", &s.comprehension),
        ("Application:", &s.application),
        ("SUGGESTED ASSESSMENTS:", &s.assessments),
        ("RECOMMENDED READINGS:", &s.readings),
    ];
    for (heading, body) in blocks {
        out.push_str(&format!("{heading}\n{}\n\n", or_placeholder(body)));
    }

    out.push_str(&format!("{rule}\n"));
    out.push_str(EXPORT_NOTE);
    out
}
