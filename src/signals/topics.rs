use std::collections::BTreeSet;

use super::tokenize::token_set;

/// A named cluster of related terms.
#[derive(Debug)]
pub struct TopicDef {
    pub name: &'static str,
    /// Single words match a token; multi-word triggers match a substring.
    pub triggers: &'static [&'static str],
    /// Phrases added to a question's phrase set when the topic fires.
    pub phrases: &'static [&'static str],
    /// Counter-topics whose sections are penalized for questions on this topic.
    pub excludes: &'static [&'static str],
}

pub const TOPICS: &[TopicDef] = &[
    TopicDef {
        name: "ad management",
        triggers: &[
            "airworthiness directive",
            "ad management",
            "ad compliance",
            "alternative method of compliance",
            "amoc",
            "directive",
        ],
        phrases: &["airworthiness directive", "ad compliance", "ad management process"],
        excludes: &["mel", "dispatch"],
    },
    TopicDef {
        name: "mel",
        triggers: &[
            "minimum equipment list",
            "configuration deviation list",
            "deferred item",
            "mel",
            "cdl",
            "deferral",
            "inoperative",
        ],
        phrases: &[
            "minimum equipment list",
            "deferred item",
            "inoperative equipment",
            "do not operate",
            "not be operated",
        ],
        excludes: &["ad management"],
    },
    TopicDef {
        name: "dispatch",
        triggers: &["flight release", "operations control", "release to service", "dispatch"],
        phrases: &["release to service", "may not operate"],
        excludes: &[],
    },
    TopicDef {
        name: "records",
        triggers: &["maintenance record", "record retention", "logbook", "records", "recordkeeping"],
        phrases: &["maintenance record", "record retention"],
        excludes: &[],
    },
    TopicDef {
        name: "training",
        triggers: &["training", "curriculum", "qualification"],
        phrases: &["training program"],
        excludes: &[],
    },
    TopicDef {
        name: "rii",
        triggers: &["required inspection item", "inspection personnel", "rii"],
        phrases: &["required inspection item"],
        excludes: &[],
    },
    TopicDef {
        name: "cass",
        triggers: &["continuing analysis", "surveillance system", "cass"],
        phrases: &["continuing analysis and surveillance"],
        excludes: &[],
    },
    TopicDef {
        name: "sms",
        triggers: &["safety management", "risk assessment", "sms", "hazard"],
        phrases: &["safety management system", "hazard identification", "risk assessment"],
        excludes: &[],
    },
];

/// Looks up a topic definition by name.
pub fn topic(name: &str) -> Option<&'static TopicDef> {
    TOPICS.iter().find(|t| t.name == name)
}

/// True when `trigger` occurs in the token set or the lowercased text.
///
/// Multi-word triggers match as plain substrings. Single-word triggers must start a word,
/// so `hazard` fires on "hazards" but `mel` does not fire on "camel".
pub fn trigger_hits(trigger: &str, tokens: &BTreeSet<String>, text_lower: &str) -> bool {
    if trigger.contains(' ') {
        return text_lower.contains(trigger);
    }
    tokens.iter().any(|token| token.starts_with(trigger)) || starts_word(text_lower, trigger)
}

fn starts_word(text: &str, word: &str) -> bool {
    text.match_indices(word).any(|(at, _)| {
        text[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

fn fires(def: &TopicDef, tokens: &BTreeSet<String>, text_lower: &str) -> bool {
    def.triggers
        .iter()
        .any(|trigger| trigger_hits(trigger, tokens, text_lower))
}

/// Topics triggered by a text.
///
/// `tokens` is the caller's token set (which may include expanded vocabulary); the
/// text's own tokens are always considered too.
pub fn detect_topics(tokens: &BTreeSet<String>, full_text: &str) -> BTreeSet<&'static str> {
    let text_lower = full_text.to_lowercase();
    let own_tokens = token_set(full_text);
    TOPICS
        .iter()
        .filter(|def| fires(def, tokens, &text_lower) || fires(def, &own_tokens, &text_lower))
        .map(|def| def.name)
        .collect()
}

/// Phrases to add for a set of detected topics.
pub fn topic_phrases<'a, I>(topics: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a &'static str>,
{
    topics
        .into_iter()
        .filter_map(|name| topic(name))
        .flat_map(|def| def.phrases.iter().map(|p| p.to_string()))
        .collect()
}

/// Counter-topics excluded by any of the given topics.
pub fn excluded_topics<'a, I>(topics: I) -> BTreeSet<&'static str>
where
    I: IntoIterator<Item = &'a &'static str>,
{
    topics
        .into_iter()
        .filter_map(|name| topic(name))
        .flat_map(|def| def.excludes.iter().copied())
        .collect()
}
