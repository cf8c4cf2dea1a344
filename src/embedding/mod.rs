//! Embedding capability for semantic blending.
//!
//! - [`EmbeddingProvider`] is the injected capability: text in, unit vectors out.
//! - [`SentenceEncoder`] is the local candle implementation.
//! - [`EmbeddingCache`] memoizes vectors per entity and model, batching misses.
//! - [`intent_text`] / [`content_text`] build the text embedded for questions and sections.

mod cache;
pub mod codec;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Local BERT sentence-transformer.
pub mod encoder;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod provider;
pub mod text;
/// Tokenizer loading and vector helpers.
pub mod utils;

#[cfg(test)]
mod tests;

pub use cache::{EmbeddingCache, EntityKind};
pub use codec::{bytes_to_embedding, embedding_to_bytes};
pub use encoder::{EncoderConfig, SentenceEncoder};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use provider::EmbeddingProvider;
pub use text::{content_text, intent_text, prepare_text};
pub use utils::{cosine_similarity, normalize_l2};
