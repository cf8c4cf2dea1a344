//! Signal extraction shared by the classifier and the matcher.
//!
//! Both engines call the same primitives (with different text composition per call
//! site) so a "keyword", "phrase", "citation" or "topic" means the same thing in both:
//!
//! - [`tokenize`]: lowercased alphanumeric runs (length >= 3), stopwords removed,
//!   irregular forms expanded to their base form as an extra token.
//! - [`detect_phrases`]: known weighted phrases present in a text.
//! - [`expand_citation_aliases`]: advisory references (e.g. `AC 39-9`) expanded into the
//!   vocabulary of the document they point at.
//! - [`detect_topics`]: coarse subject clusters used for title bonuses and exclusions.

mod citations;
mod notes;
mod phrases;
mod tokenize;
mod topics;


pub use citations::{
    ReferenceContext, extract_citations, expand_citation_aliases, extract_reference_keys,
    extract_regulatory_citations, normalize_citation,
};
pub use notes::{clean_notes, is_noise_note};
pub use phrases::{
    PHRASE_WEIGHTS, PROHIBITION_PHRASES, detect_phrases, has_prohibition_intent,
    is_prohibition_phrase, matches_prohibition, phrase_weight,
};
pub use tokenize::{STOPWORDS, token_set, tokenize, word_count};
pub use topics::{TOPICS, TopicDef, detect_topics, excluded_topics, topic, topic_phrases, trigger_hits};

use serde::{Deserialize, Serialize};

use crate::model::Function;

/// Kind of evidence a [`Signal`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    /// A rule pattern matched the question text.
    Keyword,
    /// A rule pattern matched one of the question's citations.
    Citation,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Keyword => "keyword",
            SignalType::Citation => "citation",
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of evidence linking a question to a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub signal_type: SignalType,
    /// Source pattern of the rule that fired.
    pub pattern: String,
    /// Text the pattern matched (the citation string for citation signals).
    pub matched_text: String,
    pub target: Function,
    pub weight: f64,
}
