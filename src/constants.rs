//! Cross-cutting, shared constants.
//!
//! Every scoring coefficient used by the classifier and the matcher lives here so the
//! tunables can be overridden from one place (see [`crate::config::Config`]). None of
//! these values are derived from data; they reproduce the behaviour of the rule set the
//! engines were calibrated against.

// Ownership confidence ------------------------------------------------------

/// Top score at which the base confidence term saturates.
pub const CONFIDENCE_SCORE_CAP: f64 = 10.0;
/// Bonus per matched signal.
pub const CONFIDENCE_SIGNAL_STEP: f64 = 0.05;
/// Maximum bonus contributed by signal count.
pub const CONFIDENCE_SIGNAL_MAX: f64 = 0.2;
/// Bonus per distinct signal type present.
pub const CONFIDENCE_DIVERSITY_STEP: f64 = 0.1;
/// Bonus per unit of `top / second - 1`.
pub const CONFIDENCE_GAP_STEP: f64 = 0.1;
/// Maximum bonus contributed by the gap ratio.
pub const CONFIDENCE_GAP_MAX: f64 = 0.2;

/// Confidence value at or above which a decision is labelled High.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.7;
/// Confidence value at or above which a decision is labelled Medium.
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.4;

/// Minimum share of the primary score a function needs to be listed as supporting.
pub const SUPPORTING_RATIO: f64 = 0.3;
/// Maximum number of supporting functions reported.
pub const MAX_SUPPORTING_FUNCTIONS: usize = 3;
/// Maximum number of matched literals quoted per signal type in a rationale.
pub const RATIONALE_MAX_LITERALS: usize = 5;
/// Maximum number of competing functions named in a rationale.
pub const RATIONALE_MAX_COMPETITORS: usize = 3;

// Manual-section matching ---------------------------------------------------

/// Weight of each shared regulatory citation.
pub const CITATION_MATCH_WEIGHT: f64 = 5.0;
/// Weight of each shared token.
pub const TOKEN_MATCH_WEIGHT: f64 = 1.0;
/// Extra credit when a matched phrase also appears in the section title.
pub const PHRASE_TITLE_BONUS: f64 = 1.0;
/// Weight for phrases that are not listed in the phrase table (e.g. citation aliases).
pub const DEFAULT_PHRASE_WEIGHT: f64 = 2.0;
/// Bonus when a prohibition-intent question meets prohibition language.
pub const PROHIBITION_BONUS: f64 = 6.0;
/// Bonus when the section title names one of the question's topics.
pub const TITLE_TOPIC_BONUS: f64 = 4.0;
/// Penalty for boilerplate section titles ("General", "Overview", ...).
pub const GENERIC_TITLE_PENALTY: f64 = 2.0;
/// Penalty when the whole token overlap consists of vague terms.
pub const WEAK_TOKEN_PENALTY: f64 = 3.0;
/// Largest vague-only overlap that still triggers [`WEAK_TOKEN_PENALTY`].
pub const WEAK_TOKEN_MAX_OVERLAP: usize = 3;
/// Penalty when a segment belongs to a topic the question excludes.
pub const TOPIC_EXCLUSION_PENALTY: f64 = 8.0;
/// Pairs scoring below this are discarded.
pub const MIN_MATCH_SCORE: f64 = 2.0;
/// Suggestions kept per manual type.
pub const MAX_SUGGESTIONS_PER_MANUAL_TYPE: usize = 4;
/// Keyword hits reported per suggestion.
pub const MAX_KEYWORD_HITS: usize = 10;
/// A leading preamble needs at least this many words to become its own segment.
pub const MIN_PREAMBLE_WORDS: usize = 8;

// Semantic blending ---------------------------------------------------------

/// Default weight of the semantic term.
pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.3;
/// Similarity is scaled by this factor before blending.
pub const SEMANTIC_SCALE: f64 = 10.0;
/// Pairs below both this deterministic score...
pub const SEMANTIC_NOISE_MIN_DETERMINISTIC: f64 = 1.0;
/// ...and this similarity are discarded even under blending.
pub const SEMANTIC_NOISE_MIN_SIMILARITY: f64 = 0.3;

// Embeddings ----------------------------------------------------------------

/// Default model identifier (a 384-dimension sentence-transformer).
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
/// Output dimension of [`DEFAULT_EMBEDDING_MODEL`].
pub const DEFAULT_EMBEDDING_DIM: usize = 384;
/// Token budget per input.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;
/// Texts are truncated to this many characters before embedding.
pub const MAX_EMBEDDING_TEXT_CHARS: usize = 8000;
/// Default number of cached vectors.
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 10_000;
/// Default provider timeout.
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 30_000;

/// Returns an error if a runtime embedding dimension does not match the expected one.
///
/// Use this at the boundary between a provider and the cache so a misconfigured model
/// is caught before any similarity is computed.
///
/// ```
/// use reglens::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// assert!(validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).is_ok());
/// assert!(validate_embedding_dim(768, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}
