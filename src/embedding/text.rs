//! Text sent to the embedding provider for questions and sections.

use crate::constants::MAX_EMBEDDING_TEXT_CHARS;
use crate::model::{ManualSection, Question};
use crate::signals::clean_notes;

/// Text describing what evidence would satisfy a question.
pub fn intent_text(question: &Question) -> String {
    let mut parts: Vec<String> = Vec::new();

    let body = if question.text_full.trim().is_empty() {
        question.text_condensed.trim()
    } else {
        question.text_full.trim()
    };
    if !body.is_empty() {
        parts.push(body.to_string());
    }
    if !question.guidance.trim().is_empty() {
        parts.push(format!("Evidence needed: {}", question.guidance.trim()));
    }
    if !question.citations.is_empty() {
        parts.push(format!("Must comply with: {}", question.citations.join(", ")));
    }
    if !question.other_references.is_empty() {
        parts.push(format!(
            "Referenced guidance: {}",
            question.other_references.join(", ")
        ));
    }
    let notes = clean_notes(&question.notes).join(" ");
    if !notes.trim().is_empty() {
        parts.push(format!("Additional context: {}", notes.trim()));
    }

    parts.join(" ")
}

/// Text describing what a manual section covers.
pub fn content_text(section: &ManualSection) -> String {
    let mut parts: Vec<String> = Vec::new();

    let number = section.section_number.as_deref().map(str::trim).unwrap_or("");
    let title = section.title.trim();
    match (number.is_empty(), title.is_empty()) {
        (false, false) => parts.push(format!("Section {number}: {title}")),
        (true, false) => parts.push(title.to_string()),
        (false, true) => parts.push(format!("Section {number}")),
        (true, true) => {}
    }
    if !section.text.trim().is_empty() {
        parts.push(section.text.trim().to_string());
    }
    if !section.citations.is_empty() {
        parts.push(format!(
            "Addresses compliance with: {}",
            section.citations.join(", ")
        ));
    }

    parts.join(" ")
}

/// Provider-ready form of `text`: blank text becomes a single space and long text is cut
/// to [`MAX_EMBEDDING_TEXT_CHARS`] characters.
pub fn prepare_text(text: &str) -> String {
    if text.trim().is_empty() {
        return " ".to_string();
    }
    match text.char_indices().nth(MAX_EMBEDDING_TEXT_CHARS) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
