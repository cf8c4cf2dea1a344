use crate::constants::{
    CITATION_MATCH_WEIGHT, DEFAULT_SEMANTIC_WEIGHT, GENERIC_TITLE_PENALTY, MAX_KEYWORD_HITS,
    MAX_SUGGESTIONS_PER_MANUAL_TYPE, MIN_MATCH_SCORE, MIN_PREAMBLE_WORDS, PHRASE_TITLE_BONUS,
    PROHIBITION_BONUS, SEMANTIC_NOISE_MIN_DETERMINISTIC, SEMANTIC_NOISE_MIN_SIMILARITY,
    SEMANTIC_SCALE, TITLE_TOPIC_BONUS, TOKEN_MATCH_WEIGHT, TOPIC_EXCLUSION_PENALTY,
    WEAK_TOKEN_MAX_OVERLAP, WEAK_TOKEN_PENALTY,
};

/// Scoring coefficients and limits for the section matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub citation_weight: f64,
    pub token_weight: f64,
    pub phrase_title_bonus: f64,
    pub prohibition_bonus: f64,
    pub title_topic_bonus: f64,
    pub generic_title_penalty: f64,
    pub weak_token_penalty: f64,
    pub weak_token_max_overlap: usize,
    pub exclusion_penalty: f64,
    /// Pairs scoring below this are dropped; a score equal to it is kept.
    pub min_score: f64,
    pub max_per_manual_type: usize,
    pub max_keyword_hits: usize,
    pub min_preamble_words: usize,
    /// Weight `w` of the semantic term in `det * (1 - w) + similarity * scale * w`.
    pub semantic_weight: f64,
    pub semantic_scale: f64,
    pub noise_min_deterministic: f64,
    pub noise_min_similarity: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            citation_weight: CITATION_MATCH_WEIGHT,
            token_weight: TOKEN_MATCH_WEIGHT,
            phrase_title_bonus: PHRASE_TITLE_BONUS,
            prohibition_bonus: PROHIBITION_BONUS,
            title_topic_bonus: TITLE_TOPIC_BONUS,
            generic_title_penalty: GENERIC_TITLE_PENALTY,
            weak_token_penalty: WEAK_TOKEN_PENALTY,
            weak_token_max_overlap: WEAK_TOKEN_MAX_OVERLAP,
            exclusion_penalty: TOPIC_EXCLUSION_PENALTY,
            min_score: MIN_MATCH_SCORE,
            max_per_manual_type: MAX_SUGGESTIONS_PER_MANUAL_TYPE,
            max_keyword_hits: MAX_KEYWORD_HITS,
            min_preamble_words: MIN_PREAMBLE_WORDS,
            semantic_weight: DEFAULT_SEMANTIC_WEIGHT,
            semantic_scale: SEMANTIC_SCALE,
            noise_min_deterministic: SEMANTIC_NOISE_MIN_DETERMINISTIC,
            noise_min_similarity: SEMANTIC_NOISE_MIN_SIMILARITY,
        }
    }
}

impl MatchConfig {
    pub fn with_semantic_weight(mut self, weight: f64) -> Self {
        self.semantic_weight = weight;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_max_per_manual_type(mut self, max: usize) -> Self {
        self.max_per_manual_type = max;
        self
    }

    /// `det * (1 - w) + similarity * scale * w`, with similarity clamped to `[0, 1]`.
    pub fn blend(&self, deterministic: f64, similarity: f64) -> f64 {
        let w = self.semantic_weight;
        deterministic * (1.0 - w) + similarity.clamp(0.0, 1.0) * self.semantic_scale * w
    }

    /// Weak on both axes: dropped even when blending would lift it over the threshold.
    pub fn is_semantic_noise(&self, deterministic: f64, similarity: f64) -> bool {
        deterministic < self.noise_min_deterministic && similarity < self.noise_min_similarity
    }
}
