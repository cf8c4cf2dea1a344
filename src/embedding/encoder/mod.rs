//! Local sentence-transformer encoder (BERT family, safetensors + tokenizer).
//!
//! Token states are mean-pooled under the attention mask and L2-normalized, matching how
//! sentence-transformers produces embeddings. Inference runs on the blocking pool.

pub mod config;

pub use config::{EncoderConfig, REQUIRED_MODEL_FILES};

use std::path::Path;
use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::device::{device_label, select_device};
use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use super::utils::{load_batch_tokenizer, normalize_l2};
use crate::constants::validate_embedding_dim;

struct EncoderInner {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

/// [`EmbeddingProvider`] backed by a local BERT sentence-transformer.
#[derive(Clone)]
pub struct SentenceEncoder {
    inner: Arc<EncoderInner>,
    config: EncoderConfig,
}

impl std::fmt::Debug for SentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEncoder")
            .field("model_id", &self.config.model_id)
            .field("device", &device_label(&self.inner.device))
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEncoder {
    /// Loads weights and tokenizer from `config.model_dir`.
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device()?;
        debug!(?device, "Selected compute device for sentence encoder");

        let model_config = Self::read_model_config(&config)?;
        validate_embedding_dim(model_config.hidden_size, config.embedding_dim)?;

        let weights = config.model_dir.join("model.safetensors");
        let model = load_bert(&weights, &model_config, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT weights: {}", e),
            }
        })?;

        let tokenizer = load_batch_tokenizer(&config.model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            model_id = %config.model_id,
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            device = device_label(&device),
            "Sentence encoder loaded"
        );

        Ok(Self {
            inner: Arc::new(EncoderInner {
                model,
                tokenizer,
                device,
            }),
            config,
        })
    }

    fn read_model_config(config: &EncoderConfig) -> Result<BertConfig, EmbeddingError> {
        let raw = std::fs::read_to_string(config.model_dir.join("config.json"))?;
        serde_json::from_str(&raw).map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to parse config.json: {}", e),
        })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.inner.device
    }

    /// Synchronous batch encode; callers on the async runtime go through
    /// [`EmbeddingProvider::embed_batch`].
    pub fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.inner.encode(texts)
    }
}

/// Loads a BERT encoder whose tensors may sit under a `bert.` or `roberta.` prefix.
fn load_bert(weights: &Path, config: &BertConfig, device: &Device) -> candle_core::Result<BertModel> {
    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device)? };
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb, config)
    }
}

impl EncoderInner {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let batch = encodings.len();
        let seq_len = encodings.first().map(|e| e.get_ids().len()).unwrap_or(0);
        if seq_len == 0 {
            return Err(EmbeddingError::TokenizationFailed {
                reason: "tokenizer produced empty encodings".to_string(),
            });
        }

        let mut ids = Vec::with_capacity(batch * seq_len);
        let mut type_ids = Vec::with_capacity(batch * seq_len);
        let mut mask = Vec::with_capacity(batch * seq_len);
        for encoding in &encodings {
            ids.extend_from_slice(encoding.get_ids());
            type_ids.extend_from_slice(encoding.get_type_ids());
            mask.extend_from_slice(encoding.get_attention_mask());
        }

        debug!(batch, seq_len, "Encoding batch (transformer forward pass)");

        let input_ids = Tensor::from_vec(ids, (batch, seq_len), &self.device)?;
        let token_type_ids = Tensor::from_vec(type_ids, (batch, seq_len), &self.device)?;
        let attention_mask = Tensor::from_vec(mask, (batch, seq_len), &self.device)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Transformer forward pass failed: {}", e),
            })?;

        // [batch, seq, hidden] -> [batch, hidden], averaging attended positions only.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?;

        Ok(pooled
            .to_vec2::<f32>()?
            .into_iter()
            .map(normalize_l2)
            .collect())
    }
}

impl EmbeddingProvider for SentenceEncoder {
    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    fn dimension(&self) -> usize {
        self.config.embedding_dim
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let inner = Arc::clone(&self.inner);
        let texts = texts.to_vec();
        tokio::task::spawn_blocking(move || inner.encode(&texts))
            .await
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("encoder task failed: {}", e),
            })?
    }
}
