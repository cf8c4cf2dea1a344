use std::future::Future;
use std::sync::Arc;

use super::error::EmbeddingError;

/// Source of fixed-length text embeddings.
///
/// Implementations return one vector per input, in input order, each of length
/// [`dimension`](Self::dimension). Vectors are expected to be L2-normalized.
pub trait EmbeddingProvider: Send + Sync {
    /// Identifier of the underlying model; part of every cache key.
    fn model_id(&self) -> &str;

    fn dimension(&self) -> usize;

    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send;
}

impl<E: EmbeddingProvider> EmbeddingProvider for Arc<E> {
    fn model_id(&self) -> &str {
        self.as_ref().model_id()
    }

    fn dimension(&self) -> usize {
        self.as_ref().dimension()
    }

    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send {
        self.as_ref().embed_batch(texts)
    }
}
