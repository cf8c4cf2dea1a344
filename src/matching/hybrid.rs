use std::sync::Arc;
use std::time::Duration;

use tracing::{instrument, warn};

use super::context::QuestionContext;
use super::matcher::SectionMatcher;
use super::types::MatchSuggestion;
use crate::constants::DEFAULT_EMBEDDING_TIMEOUT_MS;
use crate::embedding::{EmbeddingCache, EmbeddingError, EmbeddingProvider, cosine_similarity};
use crate::model::{ManualSection, Question};

struct SemanticLayer<E> {
    cache: Arc<EmbeddingCache<E>>,
    timeout: Duration,
}

/// Section matcher with optional semantic blending.
///
/// Without a semantic layer, or when the provider fails or times out, results are exactly
/// those of [`SectionMatcher::rank`].
pub struct HybridMatcher<E> {
    matcher: SectionMatcher,
    semantic: Option<SemanticLayer<E>>,
}

impl<E: EmbeddingProvider> HybridMatcher<E> {
    pub fn deterministic(matcher: SectionMatcher) -> Self {
        Self {
            matcher,
            semantic: None,
        }
    }

    pub fn with_semantic(matcher: SectionMatcher, cache: Arc<EmbeddingCache<E>>) -> Self {
        Self {
            matcher,
            semantic: Some(SemanticLayer {
                cache,
                timeout: Duration::from_millis(DEFAULT_EMBEDDING_TIMEOUT_MS),
            }),
        }
    }

    /// Bound on the provider round-trip. No effect on a deterministic matcher.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if let Some(layer) = self.semantic.as_mut() {
            layer.timeout = timeout;
        }
        self
    }

    pub fn matcher(&self) -> &SectionMatcher {
        &self.matcher
    }

    pub fn is_semantic_enabled(&self) -> bool {
        self.semantic.is_some()
    }

    #[instrument(skip_all, fields(qid = %question.qid, sections = sections.len()))]
    pub async fn rank(
        &self,
        question: &Question,
        sections: &[ManualSection],
    ) -> Vec<MatchSuggestion> {
        let Some(layer) = &self.semantic else {
            return self.matcher.rank(question, sections);
        };

        let ctx = QuestionContext::build(question);
        let similarities =
            match tokio::time::timeout(layer.timeout, similarities(&layer.cache, question, sections))
                .await
            {
                Ok(Ok(similarities)) => similarities,
                Ok(Err(error)) => {
                    warn!(%error, "embedding provider failed, using deterministic ranking");
                    return self.matcher.rank_with(&ctx, sections, |_| None);
                }
                Err(_) => {
                    warn!(
                        timeout_ms = layer.timeout.as_millis() as u64,
                        "embedding provider timed out, using deterministic ranking"
                    );
                    return self.matcher.rank_with(&ctx, sections, |_| None);
                }
            };

        self.matcher
            .rank_with(&ctx, sections, |i| similarities.get(i).copied())
    }
}

/// Cosine similarity of the question's intent vector with each section's content vector.
async fn similarities<E: EmbeddingProvider>(
    cache: &EmbeddingCache<E>,
    question: &Question,
    sections: &[ManualSection],
) -> Result<Vec<f64>, EmbeddingError> {
    let intent = cache.question_vector(question).await?;
    let content = cache.section_vectors(sections).await?;
    Ok(content
        .iter()
        .map(|vector| f64::from(cosine_similarity(&intent, vector)))
        .collect())
}

impl<E: EmbeddingProvider> std::fmt::Debug for HybridMatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("HybridMatcher");
        s.field("matcher", &self.matcher);
        match &self.semantic {
            Some(layer) => s
                .field("model_id", &layer.cache.model_id())
                .field("timeout", &layer.timeout),
            None => s.field("semantic", &"disabled"),
        };
        s.finish()
    }
}
