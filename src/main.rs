//! Reglens batch runner.
//!
//! Usage: `reglens <batch.json>` where the file holds `{"questions": [...], "sections": [...]}`.
//! Prints one JSON document with a decision and ranked suggestions per question.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;
use serde::{Deserialize, Serialize};

use reglens::config::Config;
use reglens::embedding::{EmbeddingCache, SentenceEncoder};
use reglens::matching::{HybridMatcher, MatchSuggestion, SectionMatcher};
use reglens::model::{ManualSection, Question};
use reglens::ownership::{OwnershipClassifier, OwnershipDecision, OwnershipSummary};
use reglens::rules::RuleRegistry;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Deserialize)]
struct Batch {
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    sections: Vec<ManualSection>,
}

#[derive(Debug, Serialize)]
struct QuestionReport {
    qid: String,
    decision: OwnershipDecision,
    suggestions: Vec<MatchSuggestion>,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    summary: OwnershipSummary,
    semantic: bool,
    questions: Vec<QuestionReport>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let input: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: reglens <batch.json>")?;

    let config = Config::from_env()?;
    config.validate()?;

    let raw = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;
    let batch: Batch = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", input.display()))?;

    tracing::info!(
        questions = batch.questions.len(),
        sections = batch.sections.len(),
        "Batch loaded"
    );

    let registry = Arc::new(RuleRegistry::new());
    if let Some(path) = &config.rules_path {
        let added = registry.load_rule_file(path)?;
        tracing::info!(path = %path.display(), added, "Custom rules loaded");
    }

    let classifier = OwnershipClassifier::new(registry, config.classifier_config());
    let hybrid = build_matcher(&config);

    let decisions = classifier.classify_all(&batch.questions);
    let mut questions = Vec::with_capacity(decisions.len());
    for (question, decision) in batch.questions.iter().zip(decisions.iter()) {
        let suggestions = hybrid.rank(question, &batch.sections).await;
        questions.push(QuestionReport {
            qid: question.qid.clone(),
            decision: decision.clone(),
            suggestions,
        });
    }

    let report = BatchReport {
        summary: OwnershipSummary::from_decisions(&decisions),
        semantic: hybrid.is_semantic_enabled(),
        questions,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Resolves the embedding capability once; any problem leaves ranking deterministic.
fn build_matcher(config: &Config) -> HybridMatcher<SentenceEncoder> {
    let matcher = SectionMatcher::new(config.match_config());

    if !config.embedding_enabled {
        return HybridMatcher::deterministic(matcher);
    }

    let Some(encoder_config) = config.encoder_config() else {
        tracing::warn!("Embeddings enabled but REGLENS_MODEL_PATH is not set, ranking deterministically");
        return HybridMatcher::deterministic(matcher);
    };

    match SentenceEncoder::load(encoder_config) {
        Ok(encoder) => {
            let cache = EmbeddingCache::with_capacity(encoder, config.embedding_cache_capacity);
            HybridMatcher::with_semantic(matcher, Arc::new(cache))
                .with_timeout(config.embedding_timeout())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load sentence encoder, ranking deterministically");
            HybridMatcher::deterministic(matcher)
        }
    }
}
