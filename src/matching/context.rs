use std::collections::BTreeSet;

use crate::model::Question;
use crate::signals::{
    ReferenceContext, clean_notes, detect_phrases, detect_topics, expand_citation_aliases,
    excluded_topics, extract_citations, extract_regulatory_citations, has_prohibition_intent, is_prohibition_phrase,
    token_set, tokenize, topic_phrases,
};

/// Everything the matcher needs to know about a question, computed once per ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionContext {
    pub qid: String,
    /// Concatenated question text the signals were extracted from.
    pub text: String,
    pub tokens: BTreeSet<String>,
    /// Phrases to look for, including topic and reference expansions.
    pub phrases: BTreeSet<String>,
    pub topics: BTreeSet<&'static str>,
    /// Counter-topics whose sections are penalized.
    pub excluded_topics: BTreeSet<&'static str>,
    /// Normalized section numbers (`"121.369"`) from the question's references, plus
    /// prefixed citations (`14 CFR 121.369`, `§ 43.9`) in its free text.
    pub citations: BTreeSet<String>,
    pub prohibition_intent: bool,
    pub references: ReferenceContext,
}

impl QuestionContext {
    pub fn build(question: &Question) -> Self {
        let text = compose_text(question);

        let reference_strings: Vec<&str> = question
            .citations
            .iter()
            .chain(&question.other_references)
            .map(String::as_str)
            .collect();
        let references = expand_citation_aliases(&reference_strings);

        let mut tokens = token_set(&text);
        for keyword in &references.keywords {
            tokens.extend(tokenize(keyword));
        }

        let topics = detect_topics(&tokens, &text);

        let prohibition_intent = has_prohibition_intent(&text);
        let mut phrases = detect_phrases(&text);
        phrases.extend(references.phrases.iter().cloned());
        phrases.extend(topic_phrases(&topics));
        if !prohibition_intent {
            phrases.retain(|p| !is_prohibition_phrase(p));
        }

        let mut citations = extract_citations(&reference_strings.join(" "));
        citations.extend(extract_regulatory_citations(&text));

        let excluded_topics = excluded_topics(&topics)
            .into_iter()
            .filter(|t| !topics.contains(t))
            .collect();

        Self {
            qid: question.qid.clone(),
            citations,
            text,
            tokens,
            phrases,
            topics,
            excluded_topics,
            prohibition_intent,
            references,
        }
    }
}

/// Full and condensed text, guidance, citations, other references and cleaned notes.
fn compose_text(question: &Question) -> String {
    let notes = clean_notes(&question.notes).join(" ");
    let other = question.other_references.join(", ");
    let reference = question.reference_string();

    [
        question.text_full.as_str(),
        question.text_condensed.as_str(),
        question.guidance.as_str(),
        reference.as_str(),
        other.as_str(),
        notes.as_str(),
    ]
    .into_iter()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
