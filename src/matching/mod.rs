//! Manual-section matching.
//!
//! [`SectionMatcher`] splits each candidate section into paragraph segments, scores every
//! (question, segment) pair from shared citations, tokens, phrases and topics, drops pairs
//! under the minimum score and returns a deterministically ordered list capped per manual
//! type. [`HybridMatcher`] adds an optional semantic term from cached embeddings and falls
//! back to the deterministic ranking whenever the embedding provider is unavailable.

mod config;
mod context;
mod hybrid;
mod matcher;
mod scorer;
mod segment;
mod types;

#[cfg(test)]
mod tests;

pub use config::MatchConfig;
pub use context::QuestionContext;
pub use hybrid::HybridMatcher;
pub use matcher::SectionMatcher;
pub use scorer::{GENERIC_TITLES, VAGUE_TERMS, is_generic_title};
pub use segment::{Segment, segment_text};
pub use types::{
    MatchSignals, MatchSuggestion, ScoreBreakdown, format_reference, group_by_manual_type,
};
