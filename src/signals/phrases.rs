use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::DEFAULT_PHRASE_WEIGHT;

/// Known phrases and their match weight. All entries are lowercase.
pub const PHRASE_WEIGHTS: &[(&str, f64)] = &[
    ("airworthiness directives management process", 4.0),
    ("ad management process", 4.0),
    ("airworthiness directive", 3.0),
    ("continued ad compliance", 3.0),
    ("ad compliance", 3.0),
    ("alternative method of compliance", 3.0),
    ("method of auditing", 2.0),
    ("minimum equipment list", 3.0),
    ("configuration deviation list", 2.5),
    ("deferred item", 2.5),
    ("deferred maintenance", 2.5),
    ("inoperative equipment", 2.5),
    ("required inspection item", 3.0),
    ("continuing analysis and surveillance", 3.0),
    ("maintenance program", 2.0),
    ("maintenance record", 2.5),
    ("record retention", 2.5),
    ("training program", 2.5),
    ("safety management system", 3.0),
    ("hazard identification", 2.5),
    ("risk assessment", 2.0),
    ("service difficulty report", 2.5),
    ("release to service", 2.0),
    ("work package", 2.0),
    ("task card", 2.0),
    ("do not operate", 3.0),
    ("not be operated", 3.0),
    ("may not operate", 3.0),
    ("prohibited from operating", 3.0),
];

/// Phrases that only make sense for questions about operating restrictions.
pub const PROHIBITION_PHRASES: &[&str] = &[
    "do not operate",
    "not be operated",
    "may not operate",
    "prohibited from operating",
];

static EXPLICIT_PROHIBITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:do|does|may|shall|must|will)\s+not\s+(?:be\s+)?operat|\bnot\s+be\s+(?:operated|dispatched|flown)\b|\bprohibit(?:ed|s|ion)?\s+from\s+(?:operating|dispatch)",
    )
    .expect("prohibition pattern is valid")
});

static OPERATE_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:operat(?:e|ed|es|ing|ion)|dispatch(?:ed|ing)?|flown|fly|flight)\b")
        .expect("operate pattern is valid")
});

static NEGATION_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:not|no|never|prohibit(?:ed|s)?|unless|cannot|precluded?)\b")
        .expect("negation pattern is valid")
});

static SEGMENT_PROHIBITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:do|does|may|shall|must|will)\s+not\s+(?:be\s+)?(?:operat|dispatch|flown|release)|\bprohibit|\bno\s+person\s+may\s+(?:operate|dispatch)|\bnot\s+be\s+(?:operated|dispatched|flown|released)\b|\bgrounded\b",
    )
    .expect("segment prohibition pattern is valid")
});

/// Weight of a phrase, falling back to [`DEFAULT_PHRASE_WEIGHT`] for phrases outside the table.
pub fn phrase_weight(phrase: &str) -> f64 {
    PHRASE_WEIGHTS
        .iter()
        .find(|(p, _)| *p == phrase)
        .map(|(_, w)| *w)
        .unwrap_or(DEFAULT_PHRASE_WEIGHT)
}

/// Table phrases present in `text`.
pub fn detect_phrases(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    PHRASE_WEIGHTS
        .iter()
        .filter(|(phrase, _)| lower.contains(phrase))
        .map(|(phrase, _)| phrase.to_string())
        .collect()
}

pub fn is_prohibition_phrase(phrase: &str) -> bool {
    PROHIBITION_PHRASES.contains(&phrase)
}

/// True when the text asks about a restriction on operating the aircraft.
///
/// Either explicit negative-operation language, or an operate cue and a negation cue
/// in the same text.
pub fn has_prohibition_intent(text: &str) -> bool {
    EXPLICIT_PROHIBITION.is_match(text) || (OPERATE_CUE.is_match(text) && NEGATION_CUE.is_match(text))
}

/// True when manual text states a prohibition.
pub fn matches_prohibition(text: &str) -> bool {
    SEGMENT_PROHIBITION.is_match(text)
}
