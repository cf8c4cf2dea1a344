use std::sync::Arc;

use tracing::{debug, warn};

use super::config::ClassifierConfig;
use super::types::{ConfidenceLabel, OwnershipDecision, SignalMatch};
use crate::constants::{
    CONFIDENCE_DIVERSITY_STEP, CONFIDENCE_GAP_MAX, CONFIDENCE_GAP_STEP, CONFIDENCE_SCORE_CAP,
    CONFIDENCE_SIGNAL_MAX, CONFIDENCE_SIGNAL_STEP, RATIONALE_MAX_COMPETITORS,
    RATIONALE_MAX_LITERALS,
};
use crate::model::{Function, Question};
use crate::rules::{RuleKind, RuleRegistry, RuleSnapshot};
use crate::signals::{Signal, SignalType};

type Scores = [f64; Function::COUNT];

/// Rule-based ownership classifier.
///
/// Holds a shared [`RuleRegistry`]; each classification reads one snapshot of it, so
/// custom rules added concurrently apply to the next question, never half of this one.
#[derive(Debug, Clone)]
pub struct OwnershipClassifier {
    registry: Arc<RuleRegistry>,
    config: ClassifierConfig,
}

impl Default for OwnershipClassifier {
    fn default() -> Self {
        Self::new(Arc::new(RuleRegistry::new()), ClassifierConfig::default())
    }
}

impl OwnershipClassifier {
    pub fn new(registry: Arc<RuleRegistry>, config: ClassifierConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, question: &Question) -> OwnershipDecision {
        let snapshot = self.registry.snapshot();
        self.classify_with(&snapshot, question)
    }

    /// Classifies a batch against a single rule snapshot.
    pub fn classify_all(&self, questions: &[Question]) -> Vec<OwnershipDecision> {
        let snapshot = self.registry.snapshot();
        questions
            .iter()
            .map(|q| self.classify_with(&snapshot, q))
            .collect()
    }

    /// Every keyword and citation signal the snapshot's rules produce for `question`.
    pub fn extract_signals(snapshot: &RuleSnapshot, question: &Question) -> Vec<Signal> {
        let mut signals = Vec::new();

        let text = question.text_full.to_lowercase();
        for rule in snapshot.rules(RuleKind::Keyword) {
            for m in rule.regex().find_iter(&text) {
                signals.push(Signal {
                    signal_type: SignalType::Keyword,
                    pattern: rule.pattern().to_string(),
                    matched_text: m.as_str().to_string(),
                    target: rule.target(),
                    weight: rule.weight(),
                });
            }
        }

        for citation in &question.citations {
            let compact: String = citation.chars().filter(|c| !c.is_whitespace()).collect();
            for rule in snapshot.rules(RuleKind::Citation) {
                if rule.regex().is_match(&compact) {
                    signals.push(Signal {
                        signal_type: SignalType::Citation,
                        pattern: rule.pattern().to_string(),
                        matched_text: citation.clone(),
                        target: rule.target(),
                        weight: rule.weight(),
                    });
                }
            }
        }

        signals
    }

    fn classify_with(&self, snapshot: &RuleSnapshot, question: &Question) -> OwnershipDecision {
        let signals = Self::extract_signals(snapshot, question);
        let (scores, seen) = aggregate(&signals);

        let primary = if signals.is_empty() {
            warn!(
                qid = %question.qid,
                default = self.config.default_function.name(),
                "no ownership signals, assigning default function; needs review"
            );
            self.config.default_function
        } else {
            argmax(&scores, &seen)
        };

        let raw_confidence = confidence(&scores, &signals);
        let confidence_label = ConfidenceLabel::from_value(raw_confidence);
        let supporting_functions = self.supporting(primary, &scores);
        let rationale = rationale(primary, &signals, &scores);

        let matches_for = |kind: SignalType| -> Vec<SignalMatch> {
            signals
                .iter()
                .filter(|s| s.signal_type == kind && s.target == primary)
                .map(SignalMatch::from)
                .collect()
        };
        let keyword_matches = matches_for(SignalType::Keyword);
        let citation_matches = matches_for(SignalType::Citation);

        debug!(
            qid = %question.qid,
            primary = primary.code(),
            signals = signals.len(),
            confidence = raw_confidence,
            "question classified"
        );

        OwnershipDecision {
            qid: question.qid.clone(),
            primary_function: primary,
            supporting_functions,
            confidence_label,
            confidence_value: round3(raw_confidence),
            rationale,
            keyword_matches,
            citation_matches,
            signals,
        }
    }

    fn supporting(&self, primary: Function, scores: &Scores) -> Vec<Function> {
        let primary_score = scores[primary.index()];
        if primary_score <= 0.0 {
            return Vec::new();
        }

        let mut supporting: Vec<Function> = Function::ALL
            .into_iter()
            .filter(|f| *f != primary)
            .filter(|f| {
                let score = scores[f.index()];
                score > 0.0 && score / primary_score >= self.config.supporting_ratio
            })
            .collect();
        supporting.sort_by(|a, b| scores[b.index()].total_cmp(&scores[a.index()]));
        supporting.truncate(self.config.max_supporting);
        supporting
    }
}

/// Per-function totals, plus the functions in the order their first signal appeared.
fn aggregate(signals: &[Signal]) -> (Scores, Vec<Function>) {
    let mut scores = [0.0; Function::COUNT];
    let mut seen = Vec::with_capacity(Function::COUNT);
    for signal in signals {
        if !seen.contains(&signal.target) {
            seen.push(signal.target);
        }
        scores[signal.target.index()] += signal.weight;
    }
    (scores, seen)
}

/// First function in `seen` holding the maximum score.
///
/// `seen` follows rule iteration order: keyword table, custom keyword rules, citation
/// table, custom citation rules.
fn argmax(scores: &Scores, seen: &[Function]) -> Function {
    let mut best = seen[0];
    for &function in &seen[1..] {
        if scores[function.index()] > scores[best.index()] {
            best = function;
        }
    }
    best
}

fn confidence(scores: &Scores, signals: &[Signal]) -> f64 {
    if signals.is_empty() {
        return 0.0;
    }

    let mut sorted = *scores;
    sorted.sort_by(|a, b| b.total_cmp(a));
    let top = sorted[0];
    let second = sorted[1];
    let gap_ratio = if second > 0.0 { top / second } else { 1.0 };

    let mut kinds: Vec<SignalType> = signals.iter().map(|s| s.signal_type).collect();
    kinds.sort();
    kinds.dedup();

    let base = (top / CONFIDENCE_SCORE_CAP).min(1.0);
    let volume = (signals.len() as f64 * CONFIDENCE_SIGNAL_STEP).min(CONFIDENCE_SIGNAL_MAX);
    let diversity = kinds.len() as f64 * CONFIDENCE_DIVERSITY_STEP;
    let gap = ((gap_ratio - 1.0) * CONFIDENCE_GAP_STEP).min(CONFIDENCE_GAP_MAX);

    (base + volume + diversity + gap).clamp(0.0, 1.0)
}

fn rationale(primary: Function, signals: &[Signal], scores: &Scores) -> String {
    if signals.is_empty() {
        return format!(
            "Assigned to {primary} by default (no signals detected). Manual review recommended."
        );
    }

    let literals = |kind: SignalType| {
        let mut seen: Vec<&str> = Vec::new();
        for signal in signals
            .iter()
            .filter(|s| s.target == primary && s.signal_type == kind)
            .take(RATIONALE_MAX_LITERALS)
        {
            if !seen.contains(&signal.matched_text.as_str()) {
                seen.push(&signal.matched_text);
            }
        }
        seen
    };

    let mut parts = vec![format!("Assigned to {primary} based on:")];

    let keywords = literals(SignalType::Keyword);
    if !keywords.is_empty() {
        parts.push(format!("- Keyword matches: {}", keywords.join(", ")));
    }
    let citations = literals(SignalType::Citation);
    if !citations.is_empty() {
        parts.push(format!("- Citation references: {}", citations.join(", ")));
    }

    let mut competitors: Vec<Function> = Function::ALL
        .into_iter()
        .filter(|f| *f != primary && scores[f.index()] > 0.0)
        .collect();
    competitors.sort_by(|a, b| scores[b.index()].total_cmp(&scores[a.index()]));
    if !competitors.is_empty() {
        let names: Vec<&str> = competitors
            .iter()
            .take(RATIONALE_MAX_COMPETITORS)
            .map(Function::name)
            .collect();
        parts.push(format!(
            "- Note: Also has signals for {} (may need supporting function coordination)",
            names.join(", ")
        ));
    }

    parts.join(" ")
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
