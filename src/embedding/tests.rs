use super::*;
use crate::constants::MAX_EMBEDDING_TEXT_CHARS;
use crate::model::{ManualSection, Question};

fn question() -> Question {
    Question::new("Q-7", "Does the carrier track airworthiness directives?")
        .with_guidance("Review the AD status report.")
        .with_citations(["14 CFR 121.369", "14 CFR 121.380"])
        .with_other_references(["AC 39-9"])
        .with_notes(["Printed copies are uncontrolled.", "Sampled two tail numbers."])
}

fn section(id: &str, text: &str) -> ManualSection {
    ManualSection::new(id, "GMM-1", "GMM")
        .with_number("6.4")
        .with_title("AD Control")
        .with_text(text)
}

mod text_tests {
    use super::*;

    #[test]
    fn test_intent_text_layout() {
        assert_eq!(
            intent_text(&question()),
            "Does the carrier track airworthiness directives? \
             Evidence needed: Review the AD status report. \
             Must comply with: 14 CFR 121.369, 14 CFR 121.380 \
             Referenced guidance: AC 39-9 \
             Additional context: Sampled two tail numbers."
        );
    }

    #[test]
    fn test_intent_text_uses_condensed_when_full_is_blank() {
        let q = Question::new("Q", "  ").with_condensed("Condensed wording");
        assert_eq!(intent_text(&q), "Condensed wording");
    }

    #[test]
    fn test_content_text_layout() {
        let s = section("S1", "The planner reviews each AD.").with_citations(["121.369"]);
        assert_eq!(
            content_text(&s),
            "Section 6.4: AD Control The planner reviews each AD. Addresses compliance with: 121.369"
        );

        let untitled = ManualSection::new("S2", "M", "GMM").with_number("7");
        assert_eq!(content_text(&untitled), "Section 7");

        let unnumbered = ManualSection::new("S3", "M", "GMM").with_title("Overview");
        assert_eq!(content_text(&unnumbered), "Overview");
    }

    #[test]
    fn test_prepare_text_blank_and_long() {
        assert_eq!(prepare_text(""), " ");
        assert_eq!(prepare_text(" \n"), " ");

        let long = "é".repeat(MAX_EMBEDDING_TEXT_CHARS + 10);
        let prepared = prepare_text(&long);
        assert_eq!(prepared.chars().count(), MAX_EMBEDDING_TEXT_CHARS);

        assert_eq!(prepare_text("short"), "short");
    }
}

mod codec_tests {
    use super::*;

    #[test]
    fn test_bytes_are_little_endian_f32() {
        let bytes = embedding_to_bytes(&[1.0, -2.5]);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..4], &1.0f32.to_le_bytes());
        assert_eq!(bytes_to_embedding(&bytes).unwrap(), vec![1.0, -2.5]);
    }

    #[test]
    fn test_bytes_with_bad_length_rejected() {
        assert!(matches!(
            bytes_to_embedding(&[0, 1, 2]),
            Err(EmbeddingError::InvalidBytes { len: 3 })
        ));
        assert!(bytes_to_embedding(&[]).unwrap().is_empty());
    }
}

mod utils_tests {
    use super::*;

    #[test]
    fn test_normalize_l2() {
        let v = normalize_l2(vec![3.0, 4.0]);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        assert_eq!(normalize_l2(vec![0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }
}

mod encoder_config_tests {
    use super::*;
    use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL};

    #[test]
    fn test_encoder_config_default() {
        let config = EncoderConfig::default();
        assert_eq!(config.model_id, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.embedding_dim, DEFAULT_EMBEDDING_DIM);
        assert!(config.model_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_validate_requires_model_dir() {
        let err = EncoderConfig::default().validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_validate_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        let err = EncoderConfig::new(dir.path()).validate().unwrap_err();
        match err {
            EmbeddingError::ModelNotFound { path } => {
                assert!(path.ends_with("model.safetensors"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_dim() {
        let dir = tempfile::tempdir().unwrap();
        let err = EncoderConfig::new(dir.path())
            .with_embedding_dim(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_without_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SentenceEncoder::load(EncoderConfig::new(dir.path())).is_err());
    }
}

mod cache_tests {
    use super::*;

    #[tokio::test]
    async fn test_question_vector_is_memoized() {
        let provider = MockEmbedder::new("mock", 8);
        let cache = EmbeddingCache::new(provider.clone());
        let q = question();

        let first = cache.question_vector(&q).await.unwrap();
        let second = cache.question_vector(&q).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(first.len(), 8);
    }

    #[tokio::test]
    async fn test_changed_text_is_recomputed() {
        let provider = MockEmbedder::new("mock", 8);
        let cache = EmbeddingCache::new(provider.clone());

        let before = cache.section_vectors(&[section("S1", "Old text.")]).await.unwrap();
        let after = cache.section_vectors(&[section("S1", "New text.")]).await.unwrap();

        assert_ne!(before[0], after[0]);
        assert_eq!(provider.call_count(), 2);
        assert!(cache.get(EntityKind::Section, "S1", &content_text(&section("S1", "Old text."))).is_none());
    }

    #[tokio::test]
    async fn test_model_id_partitions_cache() {
        let a = EmbeddingCache::new(MockEmbedder::new("model-a", 8));
        let b = EmbeddingCache::new(MockEmbedder::new("model-b", 8));
        let s = section("S1", "Text.");

        a.warm_sections(std::slice::from_ref(&s)).await.unwrap();
        let text = content_text(&s);
        assert!(a.get(EntityKind::Section, "S1", &text).is_some());
        assert!(b.get(EntityKind::Section, "S1", &text).is_none());
    }

    #[tokio::test]
    async fn test_warm_sections_batches_misses_once() {
        let provider = MockEmbedder::new("mock", 8);
        let cache = EmbeddingCache::new(provider.clone());
        let sections = vec![
            section("S1", "One."),
            section("S2", "Two."),
            section("S3", "Three."),
        ];

        assert_eq!(cache.warm_sections(&sections[..1]).await.unwrap(), 1);
        assert_eq!(cache.warm_sections(&sections).await.unwrap(), 2);
        assert_eq!(cache.warm_sections(&sections).await.unwrap(), 0);

        let batches = provider.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1].len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_sections_share_one_request() {
        let provider = MockEmbedder::new("mock", 8);
        let cache = EmbeddingCache::new(provider.clone());
        let s = section("S1", "Same.");

        let vectors = cache.section_vectors(&[s.clone(), s]).await.unwrap();
        assert_eq!(vectors[0], vectors[1]);
        assert_eq!(provider.batches()[0].len(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_is_returned() {
        let provider = MockEmbedder::new("mock", 8);
        provider.set_failing(true);
        let cache = EmbeddingCache::new(provider);

        let err = cache.question_vector(&question()).await.unwrap_err();
        assert!(matches!(err, EmbeddingError::ProviderUnavailable { .. }));
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_preload_validates_dimension() {
        let cache = EmbeddingCache::new(MockEmbedder::new("mock", 4));
        let err = cache
            .preload(EntityKind::Section, "S1", "text", vec![1.0; 3])
            .unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        ));

        cache
            .preload(EntityKind::Section, "S1", "text", vec![0.5; 4])
            .unwrap();
        assert_eq!(
            cache.get(EntityKind::Section, "S1", "text").unwrap().as_ref(),
            &[0.5; 4]
        );
    }

    #[tokio::test]
    async fn test_preloaded_vector_skips_provider() {
        let provider = MockEmbedder::new("mock", 4);
        let cache = EmbeddingCache::new(provider.clone());
        let s = section("S1", "Stored.");
        let stored = bytes_to_embedding(&embedding_to_bytes(&[0.0, 1.0, 0.0, 0.0])).unwrap();

        cache
            .preload(EntityKind::Section, "S1", &content_text(&s), stored)
            .unwrap();
        let vectors = cache.section_vectors(&[s]).await.unwrap();

        assert_eq!(vectors[0].as_ref(), &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(provider.call_count(), 0);
    }
}

mod mock_tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_vectors_are_deterministic_and_normalized() {
        let mock = MockEmbedder::new("mock", 16);
        let texts = vec!["alpha".to_string(), "alpha".to_string(), "beta".to_string()];
        let vectors = mock.embed_batch(&texts).await.unwrap();

        assert_eq!(vectors[0], vectors[1]);
        assert_ne!(vectors[0], vectors[2]);
        let norm: f32 = vectors[2].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_mock_overrides() {
        let mock = MockEmbedder::new("mock", 2);
        mock.set_vector_for("hangar", vec![0.0, 2.0]);
        let vectors = mock.embed_batch(&["the hangar floor".to_string()]).await.unwrap();
        assert_eq!(vectors[0], vec![0.0, 1.0]);
    }
}
