//! Little-endian `f32` encoding for persisting cached vectors.

use super::error::EmbeddingError;

pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    if cfg!(target_endian = "little") {
        bytemuck::cast_slice(embedding).to_vec()
    } else {
        embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
    }
}

pub fn bytes_to_embedding(data: &[u8]) -> Result<Vec<f32>, EmbeddingError> {
    if data.len() % 4 != 0 {
        return Err(EmbeddingError::InvalidBytes { len: data.len() });
    }
    if cfg!(target_endian = "little") {
        if let Ok(values) = bytemuck::try_cast_slice::<u8, f32>(data) {
            return Ok(values.to_vec());
        }
    }
    Ok(data
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
