//! Reglens library crate (used by the batch binary and integration tests).
//!
//! Two deterministic engines over audit-questionnaire records:
//!
//! - [`OwnershipClassifier`] assigns each [`Question`] to exactly one of seven
//!   accountable [`Function`]s, with supporting functions, a confidence value and a
//!   rationale built from the matched rules.
//! - [`SectionMatcher`] ranks paragraphs of [`ManualSection`]s against a question;
//!   [`HybridMatcher`] optionally blends in cosine similarity from cached sentence
//!   embeddings and falls back to the deterministic ranking when the provider fails.
//!
//! ## Modules
//! - [`signals`] - tokenization, phrases, citations, topics (shared by both engines)
//! - [`rules`] - keyword/citation rule tables behind an atomically swapped snapshot
//! - [`ownership`] - classification and batch summaries
//! - [`matching`] - segmentation, scoring, ranking and semantic blending
//! - [`embedding`] - provider trait, candle sentence encoder, embedding cache
//! - [`config`] - `REGLENS_*` environment configuration
//!
//! ## Test/Mock Support
//! [`MockEmbedder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod hashing;
pub mod matching;
pub mod model;
pub mod ownership;
pub mod rules;
pub mod signals;

pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{
    EmbeddingCache, EmbeddingError, EmbeddingProvider, EncoderConfig, EntityKind, SentenceEncoder,
};
pub use hashing::{entity_key, short_hash, text_fingerprint};
pub use matching::{
    HybridMatcher, MatchConfig, MatchSignals, MatchSuggestion, QuestionContext, ScoreBreakdown,
    SectionMatcher, group_by_manual_type,
};
pub use model::{Function, FunctionParseError, ManualSection, Question};
pub use ownership::{
    ClassifierConfig, ConfidenceLabel, OwnershipClassifier, OwnershipDecision, OwnershipSummary,
    SignalMatch,
};
pub use rules::{
    CustomRuleSpec, Rule, RuleEntry, RuleError, RuleFile, RuleKind, RuleRegistry, RuleSnapshot,
};
pub use signals::{Signal, SignalType};
