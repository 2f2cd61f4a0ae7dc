//! Prompt text sent to the chat-completion API.
//!
//! The segmenter matches the header tokens named here, so the two must stay
//! in sync: changing a header in the template without changing
//! [`segment`](super::segment::segment) silently routes that section into the
//! fallback path.

/// System-role instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "You are an expert educational content developer \
specializing in curriculum design and Bloom's Taxonomy. Provide comprehensive, \
well-structured educational content.";

/// Header tokens the model is asked to reproduce, in the order they appear
/// in the prompt.
pub const HEADER_TOKENS: [&str; 8] = [
    "COURSE_OBJECTIVE:",
    "SYLLABUS:",
    "LEARNING_OUTCOMES:",
    "KNOWLEDGE:",
    "COMPREHENSION:",
    "APPLICATION:",
    "ASSESSMENTS:",
    "READINGS:",
];

/// Build the user-role prompt for a course.
///
/// `course_title` must already be trimmed and validated; it is embedded
/// verbatim inside double quotes.
pub fn build_prompt(course_title: &str) -> String {
    format!(
        "\
Create a comprehensive educational package for the course: \"{course_title}\"

Please provide the following components in a structured format:

1. COURSE_OBJECTIVE: A clear, concise course objective (2-3 sentences)

2. SYLLABUS: A detailed course syllabus with 6-8 main topics/modules

3. LEARNING_OUTCOMES: Three specific learning outcomes aligned with Bloom's Taxonomy:
   - KNOWLEDGE: What students will know (remember/understand)
   - COMPREHENSION: What students will comprehend (explain/interpret)
   - APPLICATION: What students will be able to apply (use/implement)

4. ASSESSMENTS: 4-5 suggested assessment methods with brief descriptions

5. READINGS: 6-8 recommended readings (books, articles, resources) with authors if applicable

Format your response with clear section headers exactly as shown above (COURSE_OBJECTIVE:, SYLLABUS:, etc.) to ensure proper parsing."
    )
}
