use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_CONFIDENCE_THRESHOLD, MEDIUM_CONFIDENCE_THRESHOLD};
use crate::model::Function;
use crate::signals::Signal;

/// Coarse confidence bucket derived from [`OwnershipDecision::confidence_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

impl ConfidenceLabel {
    /// High at or above 0.7, Medium at or above 0.4, Low otherwise.
    pub fn from_value(value: f64) -> Self {
        if value >= HIGH_CONFIDENCE_THRESHOLD {
            Self::High
        } else if value >= MEDIUM_CONFIDENCE_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signal that voted for the primary function, in report form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMatch {
    pub pattern: String,
    pub matched: String,
    pub weight: f64,
}

impl From<&Signal> for SignalMatch {
    fn from(signal: &Signal) -> Self {
        Self {
            pattern: signal.pattern.clone(),
            matched: signal.matched_text.clone(),
            weight: signal.weight,
        }
    }
}

/// Result of classifying one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipDecision {
    pub qid: String,
    pub primary_function: Function,
    /// At most three, highest score first.
    pub supporting_functions: Vec<Function>,
    pub confidence_label: ConfidenceLabel,
    /// In `[0, 1]`, rounded to three decimals.
    pub confidence_value: f64,
    pub rationale: String,
    pub keyword_matches: Vec<SignalMatch>,
    pub citation_matches: Vec<SignalMatch>,
    /// Every signal extracted, for any function.
    pub signals: Vec<Signal>,
}

impl OwnershipDecision {
    /// Low-confidence decisions are the ones a reviewer should look at first.
    pub fn needs_review(&self) -> bool {
        self.confidence_label == ConfidenceLabel::Low
    }
}

/// Counts and percentages over a batch of decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnershipSummary {
    pub total: usize,
    pub by_function: BTreeMap<Function, usize>,
    pub by_confidence: BTreeMap<ConfidenceLabel, usize>,
    pub function_percentages: BTreeMap<Function, f64>,
    pub confidence_percentages: BTreeMap<ConfidenceLabel, f64>,
    pub needs_review_count: usize,
}

impl OwnershipSummary {
    pub fn from_decisions(decisions: &[OwnershipDecision]) -> Self {
        let total = decisions.len();
        if total == 0 {
            return Self::default();
        }

        let mut by_function = BTreeMap::new();
        let mut by_confidence = BTreeMap::new();
        for decision in decisions {
            *by_function.entry(decision.primary_function).or_insert(0) += 1;
            *by_confidence.entry(decision.confidence_label).or_insert(0) += 1;
        }

        let percent = |count: usize| (count as f64 / total as f64 * 1000.0).round() / 10.0;

        Self {
            total,
            function_percentages: by_function.iter().map(|(&f, &c)| (f, percent(c))).collect(),
            confidence_percentages: by_confidence
                .iter()
                .map(|(&l, &c)| (l, percent(c)))
                .collect(),
            needs_review_count: by_confidence
                .get(&ConfidenceLabel::Low)
                .copied()
                .unwrap_or(0),
            by_function,
            by_confidence,
        }
    }
}
