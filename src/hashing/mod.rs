//! BLAKE3 helpers for embedding cache keys and text fingerprints.

use blake3::Hasher;

/// Full 32-byte BLAKE3 digest of `text`.
///
/// Stored next to each cached vector so a changed entity text is detected and recomputed.
#[inline]
pub fn text_fingerprint(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// Cache key for one entity's embedding under one model.
///
/// Fields are length-prefixed so `("a|b", "c")` and `("a", "b|c")` cannot collide.
#[inline]
pub fn entity_key(model_id: &str, kind: &str, entity_id: &str) -> [u8; 32] {
    let mut hasher = Hasher::new();
    for part in [model_id, kind, entity_id] {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    *hasher.finalize().as_bytes()
}

/// First 8 bytes of a BLAKE3 digest as a little-endian `u64`, for log fields.
#[inline]
pub fn short_hash(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(text_fingerprint("abc"), text_fingerprint("abc"));
        assert_ne!(text_fingerprint("abc"), text_fingerprint("abd"));
    }

    #[test]
    fn test_entity_key_separates_fields() {
        let a = entity_key("model", "question", "Q1");
        assert_eq!(a, entity_key("model", "question", "Q1"));
        assert_ne!(a, entity_key("other-model", "question", "Q1"));
        assert_ne!(a, entity_key("model", "section", "Q1"));
        assert_ne!(entity_key("m", "a|b", "c"), entity_key("m", "a", "b|c"));
    }

    #[test]
    fn test_short_hash_matches_digest_prefix() {
        let digest = blake3::hash(b"reglens");
        let expected = u64::from_le_bytes(digest.as_bytes()[..8].try_into().unwrap());
        assert_eq!(short_hash(b"reglens"), expected);
    }
}
