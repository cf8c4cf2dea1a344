use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use super::utils::normalize_l2;
use crate::constants::DEFAULT_EMBEDDING_DIM;
use crate::hashing::text_fingerprint;

/// Deterministic in-memory provider for tests.
///
/// Vectors are derived from a hash of the text, so equal texts embed equally. Calls are
/// counted, every batch is recorded, and failures or latency can be injected.
#[derive(Clone)]
pub struct MockEmbedder {
    model_id: String,
    dimension: usize,
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    delay: Arc<Mutex<Option<Duration>>>,
    batches: Arc<Mutex<Vec<Vec<String>>>>,
    overrides: Arc<Mutex<Vec<(String, Vec<f32>)>>>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new("mock-embedder", DEFAULT_EMBEDDING_DIM)
    }
}

impl std::fmt::Debug for MockEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockEmbedder")
            .field("model_id", &self.model_id)
            .field("dimension", &self.dimension)
            .field("calls", &self.call_count())
            .finish()
    }
}

impl MockEmbedder {
    pub fn new(model_id: impl Into<String>, dimension: usize) -> Self {
        Self {
            model_id: model_id.into(),
            dimension,
            calls: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
            delay: Arc::new(Mutex::new(None)),
            batches: Arc::new(Mutex::new(Vec::new())),
            overrides: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of `embed_batch` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts of every batch received, in call order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().clone()
    }

    /// Makes subsequent calls fail with [`EmbeddingError::ProviderUnavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delays each call by `delay` before answering.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }

    /// Returns `vector` (normalized) for any text containing `needle`.
    pub fn set_vector_for(&self, needle: impl Into<String>, vector: Vec<f32>) {
        self.overrides.lock().push((needle.into(), normalize_l2(vector)));
    }

    /// The vector this mock produces for `text`.
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        if let Some((_, v)) = self
            .overrides
            .lock()
            .iter()
            .find(|(needle, _)| text.contains(needle.as_str()))
        {
            return v.clone();
        }

        let seed = text_fingerprint(text);
        let mut state = u64::from_le_bytes([
            seed[0], seed[1], seed[2], seed[3], seed[4], seed[5], seed[6], seed[7],
        ]);
        let mut vector = Vec::with_capacity(self.dimension);
        for _ in 0..self.dimension {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            vector.push(((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0);
        }
        normalize_l2(vector)
    }
}

impl EmbeddingProvider for MockEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().push(texts.to_vec());

        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(EmbeddingError::ProviderUnavailable {
                reason: "mock provider set to fail".to_string(),
            });
        }

        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }
}
