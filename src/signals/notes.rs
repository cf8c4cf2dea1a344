use std::sync::LazyLock;

use regex::Regex;

static NOTE_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)printed\s+cop(?:y|ies)\s+(?:is|are)\s+(?:uncontrolled|for\s+reference)",
        r"(?i)uncontrolled\s+(?:copy|when\s+printed)",
        r"(?i)this\s+(?:document|page)\s+(?:is|was)\s+printed",
        r"(?i)^\s*page\s+\d+\s+of\s+\d+\s*$",
        r"(?i)^\s*for\s+reference\s+only\.?\s*$",
        r"(?i)^\s*(?:printed|generated)\s+on\s+\d",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("note noise pattern is valid"))
    .collect()
});

/// True for printed-copy footers and similar parser boilerplate.
pub fn is_noise_note(note: &str) -> bool {
    note.trim().is_empty() || NOTE_NOISE.iter().any(|re| re.is_match(note))
}

/// Notes with boilerplate removed, in input order.
pub fn clean_notes(notes: &[String]) -> Vec<&str> {
    notes
        .iter()
        .map(String::as_str)
        .filter(|note| !is_noise_note(note))
        .collect()
}
