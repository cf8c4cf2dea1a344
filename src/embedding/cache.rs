use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use super::text::{content_text, intent_text, prepare_text};
use crate::constants::{DEFAULT_EMBEDDING_CACHE_CAPACITY, validate_embedding_dim};
use crate::hashing::{entity_key, short_hash, text_fingerprint};
use crate::model::{ManualSection, Question};

/// What an embedded entity is; part of the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Question,
    Section,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Section => "section",
        }
    }
}

#[derive(Clone)]
struct CachedVector {
    fingerprint: [u8; 32],
    vector: Arc<[f32]>,
}

/// One entity to resolve: kind, id, and the text to embed.
struct Request<'a> {
    kind: EntityKind,
    id: &'a str,
    text: String,
}

/// Memoizes provider vectors per (model, entity kind, entity id).
///
/// Each entry remembers a fingerprint of the text it was computed from; a lookup whose
/// text differs is a miss. Misses are embedded in one provider batch and stored only if no
/// matching entry appeared meanwhile, so concurrent callers may duplicate work but always
/// read back the same vector.
pub struct EmbeddingCache<E> {
    provider: E,
    entries: Cache<[u8; 32], CachedVector>,
}

impl<E: EmbeddingProvider> std::fmt::Debug for EmbeddingCache<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingCache")
            .field("model_id", &self.provider.model_id())
            .field("dimension", &self.provider.dimension())
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl<E: EmbeddingProvider> EmbeddingCache<E> {
    pub fn new(provider: E) -> Self {
        Self::with_capacity(provider, DEFAULT_EMBEDDING_CACHE_CAPACITY)
    }

    pub fn with_capacity(provider: E, capacity: u64) -> Self {
        Self {
            provider,
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn provider(&self) -> &E {
        &self.provider
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    fn key(&self, kind: EntityKind, id: &str) -> [u8; 32] {
        entity_key(self.provider.model_id(), kind.as_str(), id)
    }

    /// Cached vector for an entity, if present and computed from the same text.
    pub fn get(&self, kind: EntityKind, id: &str, text: &str) -> Option<Arc<[f32]>> {
        let fingerprint = text_fingerprint(&prepare_text(text));
        self.entries
            .get(&self.key(kind, id))
            .filter(|entry| entry.fingerprint == fingerprint)
            .map(|entry| entry.vector)
    }

    /// Inserts a vector computed elsewhere (e.g. loaded from storage).
    pub fn preload(
        &self,
        kind: EntityKind,
        id: &str,
        text: &str,
        vector: Vec<f32>,
    ) -> Result<(), EmbeddingError> {
        validate_embedding_dim(vector.len(), self.provider.dimension())?;
        self.entries.insert(
            self.key(kind, id),
            CachedVector {
                fingerprint: text_fingerprint(&prepare_text(text)),
                vector: vector.into(),
            },
        );
        Ok(())
    }

    /// Intent vector for a question.
    pub async fn question_vector(&self, question: &Question) -> Result<Arc<[f32]>, EmbeddingError> {
        let request = Request {
            kind: EntityKind::Question,
            id: &question.qid,
            text: intent_text(question),
        };
        let (mut vectors, _) = self.resolve(vec![request]).await?;
        vectors.pop().ok_or(EmbeddingError::BatchSizeMismatch {
            expected: 1,
            actual: 0,
        })
    }

    /// Content vectors for `sections`, in input order.
    pub async fn section_vectors(
        &self,
        sections: &[ManualSection],
    ) -> Result<Vec<Arc<[f32]>>, EmbeddingError> {
        let (vectors, _) = self.resolve(Self::section_requests(sections)).await?;
        Ok(vectors)
    }

    /// Embeds every uncached section in a single provider call; returns how many were computed.
    pub async fn warm_sections(&self, sections: &[ManualSection]) -> Result<usize, EmbeddingError> {
        let (_, computed) = self.resolve(Self::section_requests(sections)).await?;
        Ok(computed)
    }

    fn section_requests(sections: &[ManualSection]) -> Vec<Request<'_>> {
        sections
            .iter()
            .map(|section| Request {
                kind: EntityKind::Section,
                id: &section.id,
                text: content_text(section),
            })
            .collect()
    }

    async fn resolve(
        &self,
        requests: Vec<Request<'_>>,
    ) -> Result<(Vec<Arc<[f32]>>, usize), EmbeddingError> {
        let mut resolved: Vec<Option<Arc<[f32]>>> = Vec::with_capacity(requests.len());
        // Unique (key, fingerprint, prepared text) misses, and which request maps to which miss.
        let mut misses: Vec<([u8; 32], [u8; 32], String)> = Vec::new();
        let mut pending: Vec<(usize, usize)> = Vec::new();

        for (index, request) in requests.iter().enumerate() {
            let key = self.key(request.kind, request.id);
            let text = prepare_text(&request.text);
            let fingerprint = text_fingerprint(&text);

            match self.entries.get(&key) {
                Some(entry) if entry.fingerprint == fingerprint => {
                    resolved.push(Some(entry.vector));
                }
                _ => {
                    resolved.push(None);
                    let slot = match misses
                        .iter()
                        .position(|(k, f, _)| *k == key && *f == fingerprint)
                    {
                        Some(slot) => slot,
                        None => {
                            misses.push((key, fingerprint, text));
                            misses.len() - 1
                        }
                    };
                    pending.push((index, slot));
                }
            }
        }

        let computed = misses.len();
        if computed > 0 {
            let texts: Vec<String> = misses.iter().map(|(_, _, text)| text.clone()).collect();
            debug!(
                model_id = self.provider.model_id(),
                batch = computed,
                requested = requests.len(),
                "Embedding cache misses"
            );

            let vectors = self.provider.embed_batch(&texts).await?;
            if vectors.len() != texts.len() {
                return Err(EmbeddingError::BatchSizeMismatch {
                    expected: texts.len(),
                    actual: vectors.len(),
                });
            }

            let mut stored: Vec<Arc<[f32]>> = Vec::with_capacity(computed);
            for ((key, fingerprint, _), vector) in misses.iter().zip(vectors) {
                validate_embedding_dim(vector.len(), self.provider.dimension())?;
                stored.push(self.store_if_absent(*key, *fingerprint, vector));
            }
            for (index, slot) in pending {
                resolved[index] = Some(Arc::clone(&stored[slot]));
            }
        }

        let vectors = resolved
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(EmbeddingError::BatchSizeMismatch {
                expected: requests.len(),
                actual: 0,
            })?;
        Ok((vectors, computed))
    }

    fn store_if_absent(&self, key: [u8; 32], fingerprint: [u8; 32], vector: Vec<f32>) -> Arc<[f32]> {
        let entry = self
            .entries
            .entry(key)
            .or_insert_with_if(
                || CachedVector {
                    fingerprint,
                    vector: vector.into(),
                },
                |existing| existing.fingerprint != fingerprint,
            );
        if entry.is_fresh() {
            debug!(key = short_hash(&key), "Embedding cached");
        }
        entry.into_value().vector
    }
}
