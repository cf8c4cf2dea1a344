use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use super::config::MatchConfig;
use super::context::QuestionContext;
use super::scorer::SectionView;
use super::segment::segment_text;
use super::types::{MatchSuggestion, format_reference};
use crate::model::{ManualSection, Question};

/// Deterministic (question, segment) ranking.
#[derive(Debug, Clone, Default)]
pub struct SectionMatcher {
    config: MatchConfig,
}

/// A retained pair plus the keys that complete the ordering.
struct Ranked {
    suggestion: MatchSuggestion,
    section_index: usize,
    segment_index: usize,
}

impl SectionMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Ranks every segment of `sections` against `question`.
    ///
    /// The result is sorted by score, then page, section number, paragraph label and title,
    /// and holds at most `max_per_manual_type` suggestions per manual type.
    pub fn rank(&self, question: &Question, sections: &[ManualSection]) -> Vec<MatchSuggestion> {
        let ctx = QuestionContext::build(question);
        self.rank_with(&ctx, sections, |_| None)
    }

    /// Ranks with an optional per-section similarity in `[0, 1]`.
    ///
    /// `similarity(i)` is looked up for `sections[i]`; `None` scores that section
    /// deterministically.
    pub(crate) fn rank_with<F>(
        &self,
        ctx: &QuestionContext,
        sections: &[ManualSection],
        similarity: F,
    ) -> Vec<MatchSuggestion>
    where
        F: Fn(usize) -> Option<f64>,
    {
        let config = &self.config;
        let mut ranked = Vec::new();

        for (section_index, section) in sections.iter().enumerate() {
            let segments = segment_text(&section.text, config.min_preamble_words);
            if segments.is_empty() {
                continue;
            }
            let view = SectionView::new(ctx, section);
            let single = segments.len() == 1;
            let sim = similarity(section_index).map(|s| s.clamp(0.0, 1.0));

            for (segment_index, segment) in segments.iter().enumerate() {
                let signals = view.score(ctx, segment, single, config);
                let deterministic = signals.breakdown.total();

                let score = match sim {
                    Some(s) if config.is_semantic_noise(deterministic, s) => continue,
                    Some(s) => config.blend(deterministic, s),
                    None => deterministic,
                };
                if score < config.min_score {
                    continue;
                }

                let paragraph = segment.label.map(str::to_string);
                ranked.push(Ranked {
                    suggestion: MatchSuggestion {
                        manual_id: section.manual_id.clone(),
                        manual_type: section.manual_type.clone(),
                        section_id: section.id.clone(),
                        reference: format_reference(
                            section.section_number.as_deref(),
                            paragraph.as_deref(),
                            &section.title,
                        ),
                        section_number: section.section_number.clone(),
                        section_title: section.title.clone(),
                        paragraph,
                        page_number: section.page_number,
                        score,
                        deterministic_score: deterministic,
                        semantic_score: sim.map(|s| s * config.semantic_scale),
                        semantic_similarity: sim,
                        signals,
                    },
                    section_index,
                    segment_index,
                });
            }
        }

        ranked.sort_by(compare);

        let retained = ranked.len();
        let mut per_type: HashMap<String, usize> = HashMap::new();
        let suggestions: Vec<MatchSuggestion> = ranked
            .into_iter()
            .filter(|r| {
                let count = per_type
                    .entry(r.suggestion.manual_type.clone())
                    .or_default();
                *count += 1;
                *count <= config.max_per_manual_type
            })
            .map(|r| r.suggestion)
            .collect();

        debug!(
            qid = %ctx.qid,
            sections = sections.len(),
            retained,
            returned = suggestions.len(),
            "ranked sections"
        );
        suggestions
    }
}

fn compare(a: &Ranked, b: &Ranked) -> Ordering {
    let (x, y) = (&a.suggestion, &b.suggestion);
    y.score
        .total_cmp(&x.score)
        .then_with(|| {
            x.page_number
                .unwrap_or(u32::MAX)
                .cmp(&y.page_number.unwrap_or(u32::MAX))
        })
        .then_with(|| cmp_missing_last(x.section_number.as_deref(), y.section_number.as_deref()))
        .then_with(|| cmp_missing_last(x.paragraph.as_deref(), y.paragraph.as_deref()))
        .then_with(|| x.section_title.cmp(&y.section_title))
        .then_with(|| x.manual_id.cmp(&y.manual_id))
        .then_with(|| x.section_id.cmp(&y.section_id))
        .then_with(|| a.section_index.cmp(&b.section_index))
        .then_with(|| a.segment_index.cmp(&b.segment_index))
}

fn cmp_missing_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
