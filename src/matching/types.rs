use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Additive terms of a segment score. Penalties are stored as positive magnitudes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub citation: f64,
    pub token: f64,
    pub phrase: f64,
    pub prohibition: f64,
    pub title_topic: f64,
    pub generic_title_penalty: f64,
    pub weak_token_penalty: f64,
    pub exclusion_penalty: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.citation + self.token + self.phrase + self.prohibition + self.title_topic
            - self.generic_title_penalty
            - self.weak_token_penalty
            - self.exclusion_penalty
    }
}

/// Evidence behind one suggestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSignals {
    pub citations: Vec<String>,
    /// Shared tokens, alphabetical, capped.
    pub keywords: Vec<String>,
    pub phrases: Vec<String>,
    /// Question topics named by the section title.
    pub title_topics: Vec<String>,
    pub prohibition: bool,
    pub generic_title: bool,
    pub weak_tokens: bool,
    /// Counter-topic that triggered the exclusion penalty.
    pub excluded_topic: Option<String>,
    pub breakdown: ScoreBreakdown,
}

/// One ranked (question, segment) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    pub manual_id: String,
    pub manual_type: String,
    pub section_id: String,
    pub section_number: Option<String>,
    pub section_title: String,
    /// Paragraph label of the segment, if it had one.
    pub paragraph: Option<String>,
    /// Display reference such as `"6.4(a)"`.
    pub reference: String,
    pub page_number: Option<u32>,
    /// Ranking score: blended when a semantic term was available, else deterministic.
    pub score: f64,
    pub deterministic_score: f64,
    /// `semantic_similarity * scale`.
    pub semantic_score: Option<f64>,
    pub semantic_similarity: Option<f64>,
    pub signals: MatchSignals,
}

/// Display reference for a section number and paragraph label.
pub fn format_reference(number: Option<&str>, paragraph: Option<&str>, title: &str) -> String {
    match (number, paragraph) {
        (Some(n), Some(p)) => format!("{n}({p})"),
        (Some(n), None) => n.to_string(),
        (None, Some(p)) if !title.is_empty() => format!("{title} ({p})"),
        (None, Some(p)) => format!("({p})"),
        (None, None) => title.to_string(),
    }
}

/// Suggestions keyed by manual type, each list in ranking order.
pub fn group_by_manual_type(
    suggestions: &[MatchSuggestion],
) -> BTreeMap<String, Vec<MatchSuggestion>> {
    let mut grouped: BTreeMap<String, Vec<MatchSuggestion>> = BTreeMap::new();
    for suggestion in suggestions {
        grouped
            .entry(suggestion.manual_type.clone())
            .or_default()
            .push(suggestion.clone());
    }
    grouped
}
