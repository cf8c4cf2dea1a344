use std::collections::BTreeSet;

use super::*;
use crate::model::{ManualSection, Question};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn ctx_with_tokens(tokens: &[&str]) -> QuestionContext {
    QuestionContext {
        qid: "Q".to_string(),
        tokens: set(tokens),
        ..Default::default()
    }
}

fn section(id: &str, manual_type: &str, text: &str) -> ManualSection {
    ManualSection::new(id, "M-1", manual_type)
        .with_title("Tools")
        .with_text(text)
}

fn unfiltered() -> SectionMatcher {
    SectionMatcher::new(MatchConfig::default().with_min_score(f64::NEG_INFINITY))
}

mod segment_tests {
    use super::*;

    #[test]
    fn test_splits_at_paragraph_markers() {
        let segments = segment_text(
            "(a) The operator shall keep records. (b) Each record must be retained.",
            8,
        );

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, Some("a"));
        assert_eq!(segments[0].text, "(a) The operator shall keep records.");
        assert_eq!(segments[1].label, Some("b"));
        assert_eq!(segments[1].text, "(b) Each record must be retained.");
    }

    #[test]
    fn test_numeric_markers() {
        let segments = segment_text("1. General rules apply. 2. Specific rules follow.", 8);
        let labels: Vec<_> = segments.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![Some("1"), Some("2")]);
    }

    #[test]
    fn test_unmarked_text_is_one_segment() {
        let segments = segment_text("  Torque wrench calibration is tracked monthly.  ", 8);
        assert_eq!(
            segments,
            vec![Segment {
                label: None,
                text: "Torque wrench calibration is tracked monthly."
            }]
        );
    }

    #[test]
    fn test_blank_text_has_no_segments() {
        assert!(segment_text("", 8).is_empty());
        assert!(segment_text(" \n\t ", 8).is_empty());
    }

    #[test]
    fn test_long_preamble_is_kept() {
        let segments = segment_text(
            "This section describes the deferral procedures used by all line stations. \
             (a) Defer items properly. (b) Record them.",
            8,
        );

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].label, None);
        assert!(segments[0].text.starts_with("This section"));
    }

    #[test]
    fn test_capital_letter_with_period_is_not_a_marker() {
        let text = "Forms are listed in Appendix B. The form is signed by John Q. Public.";
        let segments = segment_text(text, 8);
        assert_eq!(segments, vec![Segment { label: None, text }]);

        let segments = segment_text("a. Keep logs. b) Sign entries. (C) Review monthly.", 8);
        let labels: Vec<_> = segments.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![Some("a"), Some("b"), Some("C")]);
    }

    #[test]
    fn test_short_preamble_is_dropped() {
        let segments = segment_text("Scope only. (a) Defer items properly.", 8);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].label, Some("a"));
    }
}

mod context_tests {
    use super::*;

    #[test]
    fn test_ad_question_excludes_mel_and_dispatch() {
        let q = Question::new(
            "Q1",
            "Does the operator have an airworthiness directive management process?",
        );
        let ctx = QuestionContext::build(&q);

        assert!(ctx.topics.contains("ad management"));
        assert_eq!(
            ctx.excluded_topics,
            BTreeSet::from(["dispatch", "mel"])
        );
        assert!(ctx.phrases.contains("airworthiness directive"));
        assert!(!ctx.prohibition_intent);
    }

    #[test]
    fn test_prohibition_phrases_need_intent() {
        let q = Question::new(
            "Q2",
            "How are deferred items on the minimum equipment list tracked?",
        );
        let ctx = QuestionContext::build(&q);

        assert!(ctx.topics.contains("mel"));
        assert!(!ctx.prohibition_intent);
        assert!(ctx.phrases.contains("minimum equipment list"));
        assert!(!ctx.phrases.contains("do not operate"));
        assert!(!ctx.phrases.contains("not be operated"));
    }

    #[test]
    fn test_prohibition_intent_keeps_phrases() {
        let q = Question::new(
            "Q3",
            "Are aircraft with inoperative equipment prohibited from operating?",
        );
        let ctx = QuestionContext::build(&q);

        assert!(ctx.prohibition_intent);
        assert!(ctx.phrases.contains("prohibited from operating"));
        assert!(ctx.phrases.contains("do not operate"));
    }

    #[test]
    fn test_decimals_in_free_text_are_not_citations() {
        let q = Question::new("Q5", "Is the check completed within 2.5 hours?")
            .with_guidance("See Rev. 2.1 of the manual and 14 CFR 121.369.")
            .with_notes(["Per § 43.9, sign the entry."]);
        let ctx = QuestionContext::build(&q);

        assert_eq!(ctx.citations, set(&["121.369", "43.9"]));
    }

    #[test]
    fn test_citations_are_normalized() {
        let q = Question::new("Q4", "Are records retained?").with_citations(["14 CFR 121.380"]);
        let ctx = QuestionContext::build(&q);
        assert!(ctx.citations.contains("121.380"));
    }

    #[test]
    fn test_noise_notes_are_dropped_from_text() {
        let q = Question::new("Q5", "Are records retained?")
            .with_notes(["Printed copies are uncontrolled.", "Check hangar two."]);
        let ctx = QuestionContext::build(&q);

        assert!(ctx.text.contains("Check hangar two."));
        assert!(!ctx.text.contains("uncontrolled"));
    }
}

mod scoring_tests {
    use super::*;

    #[test]
    fn test_generic_titles() {
        assert!(is_generic_title("General"));
        assert!(is_generic_title("  Overview: "));
        assert!(is_generic_title("Table of Contents."));
        assert!(!is_generic_title("General Maintenance Manual"));
    }

    #[test]
    fn test_format_reference() {
        assert_eq!(format_reference(Some("6.4"), Some("a"), "AD Control"), "6.4(a)");
        assert_eq!(format_reference(Some("6.4"), None, "AD Control"), "6.4");
        assert_eq!(format_reference(None, Some("b"), "AD Control"), "AD Control (b)");
        assert_eq!(format_reference(None, None, "AD Control"), "AD Control");
    }

    #[test]
    fn test_threshold_is_inclusive_at_two() {
        let ctx = ctx_with_tokens(&["torque", "wrench"]);
        let sections = [section("s1", "GMM", "Torque wrench calibration.")];

        let below = SectionMatcher::new(MatchConfig {
            token_weight: 0.995,
            ..Default::default()
        });
        let at = SectionMatcher::new(MatchConfig {
            token_weight: 1.0,
            ..Default::default()
        });

        assert!(below.rank_with(&ctx, &sections, |_| None).is_empty());
        let kept = at.rank_with(&ctx, &sections, |_| None);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 2.0);
        assert_eq!(kept[0].signals.keywords, vec!["torque", "wrench"]);
    }

    #[test]
    fn test_cap_per_manual_type() {
        let ctx = ctx_with_tokens(&["torque", "wrench", "limits"]);
        let mut sections: Vec<ManualSection> = (0..10u32)
            .map(|i| {
                section(&format!("s{i}"), "GMM", "Torque wrench calibration.")
                    .with_number(format!("4.{i}"))
                    .with_page(20 - i)
            })
            .collect();
        sections[0].text = "Torque wrench calibration and torque limits table.".to_string();
        sections.push(section("a1", "AIP", "Torque wrench checks."));
        sections.push(section("a2", "AIP", "Torque wrench storage."));

        let ranked = SectionMatcher::default().rank_with(&ctx, &sections, |_| None);

        let gmm: Vec<&str> = ranked
            .iter()
            .filter(|s| s.manual_type == "GMM")
            .map(|s| s.section_id.as_str())
            .collect();
        assert_eq!(gmm, vec!["s0", "s9", "s8", "s7"]);
        assert_eq!(ranked.iter().filter(|s| s.manual_type == "AIP").count(), 2);
        assert_eq!(ranked.len(), 6);
    }

    #[test]
    fn test_topic_exclusion_subtracts_exactly_eight() {
        let sections = [ManualSection::new("s1", "M-1", "GMM")
            .with_title("Deferral Procedures")
            .with_text("Inoperative items are deferred under the MEL.")];

        let neutral = ctx_with_tokens(&["inoperative", "items", "deferred"]);
        let ad_question = QuestionContext {
            topics: BTreeSet::from(["ad management"]),
            excluded_topics: BTreeSet::from(["dispatch", "mel"]),
            ..neutral.clone()
        };

        let matcher = unfiltered();
        let base = &matcher.rank_with(&neutral, &sections, |_| None)[0];
        let excluded = &matcher.rank_with(&ad_question, &sections, |_| None)[0];

        assert_eq!(base.deterministic_score - excluded.deterministic_score, 8.0);
        assert_eq!(excluded.signals.excluded_topic.as_deref(), Some("mel"));
        assert_eq!(base.signals.excluded_topic, None);
    }

    #[test]
    fn test_prohibition_bonus_requires_intent() {
        let sections = [section(
            "s1",
            "GMM",
            "The aircraft may not be operated until the item is repaired.",
        )];
        let plain = ctx_with_tokens(&["repaired"]);
        let intent = QuestionContext {
            prohibition_intent: true,
            ..plain.clone()
        };

        let matcher = unfiltered();
        let without = &matcher.rank_with(&plain, &sections, |_| None)[0];
        let with = &matcher.rank_with(&intent, &sections, |_| None)[0];

        assert_eq!(without.signals.breakdown.prohibition, 0.0);
        assert!(!without.signals.prohibition);
        assert_eq!(with.signals.breakdown.prohibition, 6.0);
        assert_eq!(with.deterministic_score - without.deterministic_score, 6.0);
    }

    #[test]
    fn test_weak_token_overlap_is_penalized() {
        let ctx = ctx_with_tokens(&["maintenance", "program"]);
        let sections = [section("s1", "GMM", "Maintenance program notes.")];

        let ranked = unfiltered().rank_with(&ctx, &sections, |_| None);

        assert!(ranked[0].signals.weak_tokens);
        assert_eq!(ranked[0].signals.breakdown.weak_token_penalty, 3.0);
        assert_eq!(ranked[0].deterministic_score, -1.0);
    }

    #[test]
    fn test_generic_title_penalty() {
        let ctx = ctx_with_tokens(&["torque", "wrench"]);
        let sections = [ManualSection::new("s1", "M-1", "GMM")
            .with_title("General")
            .with_text("Torque wrench calibration.")];

        let ranked = unfiltered().rank_with(&ctx, &sections, |_| None);

        assert!(ranked[0].signals.generic_title);
        assert_eq!(ranked[0].deterministic_score, 0.0);
    }

    #[test]
    fn test_section_citations_only_credit_single_segments() {
        let ctx = QuestionContext {
            citations: set(&["121.369"]),
            ..ctx_with_tokens(&[])
        };
        let sections = [
            section(
                "multi",
                "GMM",
                "(a) Each certificate holder shall comply with 121.369 requirements. (b) Other Text is here.",
            )
            .with_number("6.4")
            .with_citations(["14 CFR 121.369"]),
            section("single", "GMM", "Records are kept.").with_citations(["14 CFR 121.369"]),
        ];

        let ranked = unfiltered().rank_with(&ctx, &sections, |_| None);
        let find = |reference: &str| {
            ranked
                .iter()
                .find(|s| s.reference == reference)
                .map(|s| s.signals.breakdown.citation)
        };

        assert_eq!(find("6.4(a)"), Some(5.0));
        assert_eq!(find("6.4(b)"), Some(0.0));
        assert_eq!(find("Tools"), Some(5.0));
    }

    #[test]
    fn test_title_topic_bonus() {
        let ctx = QuestionContext {
            topics: BTreeSet::from(["records"]),
            ..ctx_with_tokens(&["retention"])
        };
        let sections = [ManualSection::new("s1", "M-1", "GMM")
            .with_title("Logbook Entries")
            .with_text("Retention periods for entries.")];

        let ranked = unfiltered().rank_with(&ctx, &sections, |_| None);

        assert_eq!(ranked[0].signals.title_topics, vec!["records"]);
        assert_eq!(ranked[0].signals.breakdown.title_topic, 4.0);
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let ctx = ctx_with_tokens(&["torque"]);
        let sections = [section("s1", "GMM", "   ")];
        assert!(unfiltered().rank_with(&ctx, &sections, |_| None).is_empty());
    }
}

mod ordering_tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            "Q-11",
            "Does the operator control airworthiness directive compliance records?",
        )
        .with_citations(["14 CFR 121.380"])
    }

    fn sections() -> Vec<ManualSection> {
        vec![
            ManualSection::new("s3", "GMM-1", "GMM")
                .with_number("6.4")
                .with_title("AD Control")
                .with_page(40)
                .with_text(
                    "(a) The airworthiness directive compliance status is recorded. \
                     (b) Records are kept per 121.380.",
                ),
            ManualSection::new("s1", "GMM-1", "GMM")
                .with_number("2.1")
                .with_title("General")
                .with_page(3)
                .with_text("Directive compliance records are kept."),
            ManualSection::new("s2", "AIP-1", "AIP")
                .with_number("1.2")
                .with_title("Records Retention")
                .with_page(12)
                .with_text("Airworthiness directive compliance records are retained."),
        ]
    }

    #[test]
    fn test_rank_is_deterministic() {
        let matcher = SectionMatcher::default();
        let first = matcher.rank(&question(), &sections());
        let second = matcher.rank(&question(), &sections());

        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_results_are_sorted_by_score() {
        let ranked = SectionMatcher::default().rank(&question(), &sections());
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_break_on_page_then_number() {
        let ctx = ctx_with_tokens(&["torque", "wrench"]);
        let sections = [
            section("late", "GMM", "Torque wrench.").with_page(9),
            section("unpaged", "GMM", "Torque wrench."),
            section("b", "GMM", "Torque wrench.").with_page(2).with_number("3.2"),
            section("a", "GMM", "Torque wrench.").with_page(2).with_number("3.1"),
        ];

        let ids: Vec<String> = SectionMatcher::default()
            .rank_with(&ctx, &sections, |_| None)
            .into_iter()
            .map(|s| s.section_id)
            .collect();

        assert_eq!(ids, vec!["a", "b", "late", "unpaged"]);
    }

    #[test]
    fn test_group_by_manual_type() {
        let ranked = SectionMatcher::default().rank(&question(), &sections());
        let grouped = group_by_manual_type(&ranked);

        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, ranked.len());
        for (manual_type, suggestions) in &grouped {
            assert!(suggestions.iter().all(|s| &s.manual_type == manual_type));
        }
    }
}

mod semantic_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::embedding::{EmbeddingCache, MockEmbedder};

    #[test]
    fn test_blend_formula() {
        let config = MatchConfig::default();
        assert!((config.blend(2.0, 1.0) - 4.4).abs() < 1e-9);
        assert!((config.blend(2.0, 1.7) - 4.4).abs() < 1e-9);
        assert!((config.blend(2.0, -0.4) - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_noise_rule_needs_both_weak() {
        let config = MatchConfig::default();
        assert!(config.is_semantic_noise(0.5, 0.29));
        assert!(!config.is_semantic_noise(0.5, 0.3));
        assert!(!config.is_semantic_noise(1.0, 0.0));
    }

    #[test]
    fn test_noise_pairs_are_dropped_under_blending() {
        let ctx = ctx_with_tokens(&[]);
        let sections = [section("s1", "GMM", "Cabin lighting.")];
        let matcher = SectionMatcher::new(MatchConfig::default().with_semantic_weight(1.0));

        assert!(matcher.rank_with(&ctx, &sections, |_| Some(0.29)).is_empty());
        let kept = matcher.rank_with(&ctx, &sections, |_| Some(0.3));
        assert_eq!(kept.len(), 1);
        assert!((kept[0].score - 3.0).abs() < 1e-9);
        assert_eq!(kept[0].deterministic_score, 0.0);
        assert_eq!(kept[0].semantic_similarity, Some(0.3));
    }

    fn fixture() -> (Question, Vec<ManualSection>) {
        let q = Question::new("Q-1", "Are torque wrench checks done?");
        let sections = vec![
            ManualSection::new("s1", "GMM-1", "GMM")
                .with_number("1")
                .with_title("Tools")
                .with_text("Torque wrench calibration records."),
            ManualSection::new("s2", "GMM-1", "GMM")
                .with_number("2")
                .with_title("Torque Tools")
                .with_text("Torque wrench storage and torque wrench issue."),
        ];
        (q, sections)
    }

    #[tokio::test]
    async fn test_deterministic_hybrid_matches_section_matcher() {
        let (q, sections) = fixture();
        let hybrid = HybridMatcher::<MockEmbedder>::deterministic(SectionMatcher::default());

        assert!(!hybrid.is_semantic_enabled());
        assert_eq!(
            hybrid.rank(&q, &sections).await,
            SectionMatcher::default().rank(&q, &sections)
        );
    }

    #[tokio::test]
    async fn test_failing_provider_falls_back() {
        let (q, sections) = fixture();
        let mock = MockEmbedder::new("mock", 4);
        mock.set_failing(true);
        let cache = Arc::new(EmbeddingCache::new(mock.clone()));
        let hybrid = HybridMatcher::with_semantic(SectionMatcher::default(), cache);

        let ranked = hybrid.rank(&q, &sections).await;

        assert!(hybrid.is_semantic_enabled());
        assert_eq!(ranked, SectionMatcher::default().rank(&q, &sections));
        assert!(ranked.iter().all(|s| s.semantic_similarity.is_none()));
        assert!(mock.call_count() >= 1);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_and_falls_back() {
        let (q, sections) = fixture();
        let mock = MockEmbedder::new("mock", 4);
        mock.set_delay(Some(Duration::from_millis(500)));
        let cache = Arc::new(EmbeddingCache::new(mock));
        let hybrid = HybridMatcher::with_semantic(SectionMatcher::default(), cache)
            .with_timeout(Duration::from_millis(20));

        assert_eq!(
            hybrid.rank(&q, &sections).await,
            SectionMatcher::default().rank(&q, &sections)
        );
    }

    #[tokio::test]
    async fn test_blended_scores_and_single_warm_up() {
        let (q, sections) = fixture();
        let mock = MockEmbedder::new("mock", 4);
        mock.set_vector_for("torque wrench checks", vec![1.0, 0.0, 0.0, 0.0]);
        mock.set_vector_for("calibration records", vec![1.0, 0.0, 0.0, 0.0]);
        mock.set_vector_for("storage", vec![0.0, 1.0, 0.0, 0.0]);
        let cache = Arc::new(EmbeddingCache::new(mock.clone()));
        let hybrid = HybridMatcher::with_semantic(SectionMatcher::default(), cache);

        let first = hybrid.rank(&q, &sections).await;
        let calls_after_first = mock.call_count();
        let second = hybrid.rank(&q, &sections).await;

        assert_eq!(first, second);
        assert_eq!(mock.call_count(), calls_after_first);
        assert_eq!(calls_after_first, 2);

        let s1 = first.iter().find(|s| s.section_id == "s1").unwrap();
        assert_eq!(s1.deterministic_score, 2.0);
        assert!((s1.semantic_similarity.unwrap() - 1.0).abs() < 1e-6);
        assert!((s1.score - 4.4).abs() < 1e-6);
        assert!((s1.semantic_score.unwrap() - 10.0).abs() < 1e-5);

        // Deterministically 2.0, but orthogonal vectors blend it down to 1.4.
        assert!(first.iter().all(|s| s.section_id != "s2"));
    }
}
