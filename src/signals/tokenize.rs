use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]{3,}").expect("token pattern is valid"));

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("word pattern is valid"));

/// Words carrying no topical signal.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "into", "when", "then", "shall",
    "should", "must", "may", "are", "was", "were", "have", "has", "had", "not", "but", "all",
    "any", "each", "such", "its", "their", "them", "his", "her", "these", "those", "about",
    "above", "below", "under", "over", "within", "without", "per", "performs", "perform",
    "ensure", "ensures", "include", "includes", "does", "what", "how", "which", "there",
    "been", "will",
];

/// Inflected forms mapped to the base form they should also count as.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("kept", "keep"),
    ("made", "make"),
    ("written", "write"),
    ("taken", "take"),
    ("given", "give"),
    ("found", "find"),
    ("held", "hold"),
    ("sent", "send"),
    ("built", "build"),
    ("brought", "bring"),
    ("chosen", "choose"),
    ("known", "know"),
    ("shown", "show"),
    ("drawn", "draw"),
    ("flown", "fly"),
    ("withdrawn", "withdraw"),
    ("overridden", "override"),
    ("undertaken", "undertake"),
    ("deferred", "defer"),
    ("deferrals", "deferral"),
    ("records", "record"),
    ("directives", "directive"),
    ("procedures", "procedure"),
    ("inspections", "inspection"),
];

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

fn base_form(token: &str) -> Option<&'static str> {
    IRREGULAR_FORMS
        .iter()
        .find(|(form, _)| *form == token)
        .map(|(_, base)| *base)
}

/// Splits text into normalized tokens, preserving order and duplicates.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in TOKEN_PATTERN.find_iter(text) {
        let token = m.as_str().to_lowercase();
        if is_stopword(&token) {
            continue;
        }
        let base = base_form(&token).filter(|b| *b != token && !is_stopword(b));
        tokens.push(token);
        if let Some(base) = base {
            tokens.push(base.to_string());
        }
    }
    tokens
}

/// [`tokenize`] collected into an ordered set.
pub fn token_set(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    WORD_PATTERN.find_iter(text).count()
}
