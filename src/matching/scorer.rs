use std::collections::BTreeSet;

use super::config::MatchConfig;
use super::context::QuestionContext;
use super::segment::Segment;
use super::types::{MatchSignals, ScoreBreakdown};
use crate::model::ManualSection;
use crate::signals::{
    extract_citations, matches_prohibition, normalize_citation, phrase_weight, token_set, topic,
    trigger_hits,
};

/// Boilerplate titles that say nothing about a section's subject.
pub const GENERIC_TITLES: &[&str] = &[
    "general",
    "overview",
    "introduction",
    "purpose",
    "scope",
    "definitions",
    "applicability",
    "table of contents",
    "manual text",
];

/// Terms common to nearly every manual section. An overlap made only of these is weak evidence.
pub const VAGUE_TERMS: &[&str] = &[
    "aircraft",
    "applicable",
    "appropriate",
    "accordance",
    "company",
    "general",
    "information",
    "maintenance",
    "manual",
    "policy",
    "procedure",
    "procedures",
    "process",
    "program",
    "provide",
    "required",
    "requirements",
    "responsibilities",
    "responsible",
    "review",
    "section",
    "system",
];

pub fn is_generic_title(title: &str) -> bool {
    let normalized = title
        .trim()
        .trim_end_matches(['.', ':'])
        .trim()
        .to_lowercase();
    GENERIC_TITLES.contains(&normalized.as_str())
}

/// Per-section data shared by all of its segments.
#[derive(Debug)]
pub(crate) struct SectionView<'s> {
    pub section: &'s ManualSection,
    title_lower: String,
    title_topics: Vec<String>,
    generic_title: bool,
    /// Section-level citations, credited only when the section is a single segment.
    section_citations: BTreeSet<String>,
}

impl<'s> SectionView<'s> {
    pub fn new(ctx: &QuestionContext, section: &'s ManualSection) -> Self {
        let title_lower = section.title.to_lowercase();
        let title_tokens = token_set(&section.title);

        let title_topics = ctx
            .topics
            .iter()
            .filter_map(|name| topic(name))
            .filter(|def| {
                def.triggers
                    .iter()
                    .any(|t| trigger_hits(t, &title_tokens, &title_lower))
                    || def.phrases.iter().any(|p| title_lower.contains(p))
            })
            .map(|def| def.name.to_string())
            .collect();

        let section_citations = section
            .citations
            .iter()
            .filter_map(|c| normalize_citation(c))
            .collect();

        Self {
            section,
            generic_title: is_generic_title(&section.title),
            title_lower,
            title_topics,
            section_citations,
        }
    }

    /// Scores one segment of this section.
    pub fn score(
        &self,
        ctx: &QuestionContext,
        segment: &Segment<'_>,
        single_segment: bool,
        config: &MatchConfig,
    ) -> MatchSignals {
        let title = &self.section.title;
        let combined = format!("{title} {}", segment.text);
        let combined_lower = combined.to_lowercase();
        let mut breakdown = ScoreBreakdown::default();

        let mut segment_citations = extract_citations(segment.text);
        segment_citations.extend(extract_citations(title));
        if single_segment {
            segment_citations.extend(self.section_citations.iter().cloned());
        }
        let citations: Vec<String> = ctx
            .citations
            .intersection(&segment_citations)
            .cloned()
            .collect();
        breakdown.citation = config.citation_weight * citations.len() as f64;

        let segment_tokens = token_set(&combined);
        let overlap: BTreeSet<&String> = ctx.tokens.intersection(&segment_tokens).collect();
        breakdown.token = config.token_weight * overlap.len() as f64;

        let mut phrases = Vec::new();
        for phrase in &ctx.phrases {
            if combined_lower.contains(phrase.as_str()) {
                breakdown.phrase += phrase_weight(phrase);
                if self.title_lower.contains(phrase.as_str()) {
                    breakdown.phrase += config.phrase_title_bonus;
                }
                phrases.push(phrase.clone());
            }
        }

        let prohibition = ctx.prohibition_intent && matches_prohibition(segment.text);
        if prohibition {
            breakdown.prohibition = config.prohibition_bonus;
        }

        if !self.title_topics.is_empty() {
            breakdown.title_topic = config.title_topic_bonus;
        }

        if self.generic_title {
            breakdown.generic_title_penalty = config.generic_title_penalty;
        }

        let weak_tokens = !overlap.is_empty()
            && overlap.len() <= config.weak_token_max_overlap
            && overlap.iter().all(|t| VAGUE_TERMS.contains(&t.as_str()));
        if weak_tokens {
            breakdown.weak_token_penalty = config.weak_token_penalty;
        }

        let excluded_topic = ctx
            .excluded_topics
            .iter()
            .filter_map(|name| topic(name))
            .find(|def| {
                def.triggers
                    .iter()
                    .any(|t| trigger_hits(t, &segment_tokens, &combined_lower))
            })
            .map(|def| def.name.to_string());
        if excluded_topic.is_some() {
            breakdown.exclusion_penalty = config.exclusion_penalty;
        }

        MatchSignals {
            citations,
            keywords: overlap
                .into_iter()
                .take(config.max_keyword_hits)
                .cloned()
                .collect(),
            phrases,
            title_topics: self.title_topics.clone(),
            prohibition,
            generic_title: self.generic_title,
            weak_tokens,
            excluded_topic,
            breakdown,
        }
    }
}
