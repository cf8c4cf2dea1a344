//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `REGLENS_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_EMBEDDING_CACHE_CAPACITY, DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_TIMEOUT_MS,
    DEFAULT_SEMANTIC_WEIGHT, GENERIC_TITLE_PENALTY, MAX_SUGGESTIONS_PER_MANUAL_TYPE,
    MIN_MATCH_SCORE, PROHIBITION_BONUS, TITLE_TOPIC_BONUS, TOPIC_EXCLUSION_PENALTY,
    WEAK_TOKEN_PENALTY,
};
use crate::embedding::EncoderConfig;
use crate::matching::MatchConfig;
use crate::model::Function;
use crate::ownership::ClassifierConfig;

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `REGLENS_*` overrides on top of defaults, then
/// [`Config::validate`] before building the engines.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Blend semantic similarity into section ranking. Default: `false`.
    pub embedding_enabled: bool,

    /// Embedding model identifier (part of every cache key). Default: `all-MiniLM-L6-v2`.
    pub embedding_model: String,

    /// Sentence-transformer directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub model_path: Option<PathBuf>,

    /// Weight of the semantic term, in `[0, 1]`. Default: `0.3`.
    pub semantic_weight: f64,

    /// Provider round-trip bound in milliseconds. Default: `30000`.
    pub embedding_timeout_ms: u64,

    /// Max cached vectors. Default: `10_000`.
    pub embedding_cache_capacity: u64,

    /// Function assigned to questions without signals. Default: Director of Maintenance.
    pub default_function: Function,

    /// JSON file of custom rules registered at startup.
    pub rules_path: Option<PathBuf>,

    pub min_score: f64,
    pub prohibition_bonus: f64,
    pub title_topic_bonus: f64,
    pub exclusion_penalty: f64,
    pub weak_token_penalty: f64,
    pub generic_title_penalty: f64,
    pub max_per_manual_type: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedding_enabled: false,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            model_path: None,
            semantic_weight: DEFAULT_SEMANTIC_WEIGHT,
            embedding_timeout_ms: DEFAULT_EMBEDDING_TIMEOUT_MS,
            embedding_cache_capacity: DEFAULT_EMBEDDING_CACHE_CAPACITY,
            default_function: Function::DirectorOfMaintenance,
            rules_path: None,
            min_score: MIN_MATCH_SCORE,
            prohibition_bonus: PROHIBITION_BONUS,
            title_topic_bonus: TITLE_TOPIC_BONUS,
            exclusion_penalty: TOPIC_EXCLUSION_PENALTY,
            weak_token_penalty: WEAK_TOKEN_PENALTY,
            generic_title_penalty: GENERIC_TITLE_PENALTY,
            max_per_manual_type: MAX_SUGGESTIONS_PER_MANUAL_TYPE,
        }
    }
}

impl Config {
    const ENV_EMBEDDING_ENABLED: &'static str = "REGLENS_EMBEDDING_ENABLED";
    const ENV_EMBEDDING_MODEL: &'static str = "REGLENS_EMBEDDING_MODEL";
    const ENV_MODEL_PATH: &'static str = "REGLENS_MODEL_PATH";
    const ENV_SEMANTIC_WEIGHT: &'static str = "REGLENS_SEMANTIC_WEIGHT";
    const ENV_EMBEDDING_TIMEOUT_MS: &'static str = "REGLENS_EMBEDDING_TIMEOUT_MS";
    const ENV_EMBEDDING_CACHE_CAPACITY: &'static str = "REGLENS_EMBEDDING_CACHE_CAPACITY";
    const ENV_DEFAULT_FUNCTION: &'static str = "REGLENS_DEFAULT_FUNCTION";
    const ENV_RULES_PATH: &'static str = "REGLENS_RULES_PATH";
    const ENV_MIN_SCORE: &'static str = "REGLENS_MIN_SCORE";
    const ENV_PROHIBITION_BONUS: &'static str = "REGLENS_PROHIBITION_BONUS";
    const ENV_TITLE_TOPIC_BONUS: &'static str = "REGLENS_TITLE_TOPIC_BONUS";
    const ENV_EXCLUSION_PENALTY: &'static str = "REGLENS_EXCLUSION_PENALTY";
    const ENV_WEAK_TOKEN_PENALTY: &'static str = "REGLENS_WEAK_TOKEN_PENALTY";
    const ENV_GENERIC_TITLE_PENALTY: &'static str = "REGLENS_GENERIC_TITLE_PENALTY";
    const ENV_MAX_PER_MANUAL_TYPE: &'static str = "REGLENS_MAX_PER_MANUAL_TYPE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let d = Self::default();

        let default_function = match Self::read(Self::ENV_DEFAULT_FUNCTION) {
            Some(value) => value.parse::<Function>()?,
            None => d.default_function,
        };

        Ok(Self {
            embedding_enabled: Self::parse_bool_from_env(
                Self::ENV_EMBEDDING_ENABLED,
                d.embedding_enabled,
            )?,
            embedding_model: Self::read(Self::ENV_EMBEDDING_MODEL).unwrap_or(d.embedding_model),
            model_path: Self::read(Self::ENV_MODEL_PATH).map(PathBuf::from),
            semantic_weight: Self::parse_from_env(Self::ENV_SEMANTIC_WEIGHT, d.semantic_weight)?,
            embedding_timeout_ms: Self::parse_from_env(
                Self::ENV_EMBEDDING_TIMEOUT_MS,
                d.embedding_timeout_ms,
            )?,
            embedding_cache_capacity: Self::parse_from_env(
                Self::ENV_EMBEDDING_CACHE_CAPACITY,
                d.embedding_cache_capacity,
            )?,
            default_function,
            rules_path: Self::read(Self::ENV_RULES_PATH).map(PathBuf::from),
            min_score: Self::parse_from_env(Self::ENV_MIN_SCORE, d.min_score)?,
            prohibition_bonus: Self::parse_from_env(
                Self::ENV_PROHIBITION_BONUS,
                d.prohibition_bonus,
            )?,
            title_topic_bonus: Self::parse_from_env(
                Self::ENV_TITLE_TOPIC_BONUS,
                d.title_topic_bonus,
            )?,
            exclusion_penalty: Self::parse_from_env(
                Self::ENV_EXCLUSION_PENALTY,
                d.exclusion_penalty,
            )?,
            weak_token_penalty: Self::parse_from_env(
                Self::ENV_WEAK_TOKEN_PENALTY,
                d.weak_token_penalty,
            )?,
            generic_title_penalty: Self::parse_from_env(
                Self::ENV_GENERIC_TITLE_PENALTY,
                d.generic_title_penalty,
            )?,
            max_per_manual_type: Self::parse_from_env(
                Self::ENV_MAX_PER_MANUAL_TYPE,
                d.max_per_manual_type,
            )?,
        })
    }

    /// Checks ranges and paths (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.semantic_weight) {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_SEMANTIC_WEIGHT,
                value: self.semantic_weight,
                reason: "must be between 0 and 1",
            });
        }

        if !self.min_score.is_finite() {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_MIN_SCORE,
                value: self.min_score,
                reason: "must be finite",
            });
        }

        for (name, value) in [
            (Self::ENV_PROHIBITION_BONUS, self.prohibition_bonus),
            (Self::ENV_TITLE_TOPIC_BONUS, self.title_topic_bonus),
            (Self::ENV_EXCLUSION_PENALTY, self.exclusion_penalty),
            (Self::ENV_WEAK_TOKEN_PENALTY, self.weak_token_penalty),
            (Self::ENV_GENERIC_TITLE_PENALTY, self.generic_title_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    reason: "must be a finite, non-negative magnitude",
                });
            }
        }

        for (name, value) in [
            (Self::ENV_MAX_PER_MANUAL_TYPE, self.max_per_manual_type as u64),
            (Self::ENV_EMBEDDING_TIMEOUT_MS, self.embedding_timeout_ms),
            (Self::ENV_EMBEDDING_CACHE_CAPACITY, self.embedding_cache_capacity),
        ] {
            if value == 0 {
                return Err(ConfigError::OutOfRange {
                    name,
                    value: 0.0,
                    reason: "must be greater than zero",
                });
            }
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.rules_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            min_score: self.min_score,
            prohibition_bonus: self.prohibition_bonus,
            title_topic_bonus: self.title_topic_bonus,
            exclusion_penalty: self.exclusion_penalty,
            weak_token_penalty: self.weak_token_penalty,
            generic_title_penalty: self.generic_title_penalty,
            max_per_manual_type: self.max_per_manual_type,
            semantic_weight: self.semantic_weight,
            ..MatchConfig::default()
        }
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig::default().with_default_function(self.default_function)
    }

    /// Encoder settings, if a model directory is configured.
    pub fn encoder_config(&self) -> Option<EncoderConfig> {
        self.model_path
            .as_ref()
            .map(|dir| EncoderConfig::new(dir).with_model_id(self.embedding_model.clone()))
    }

    pub fn embedding_timeout(&self) -> Duration {
        Duration::from_millis(self.embedding_timeout_ms)
    }

    fn read(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_from_env<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
        match Self::read(name) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name, value }),
            None => Ok(default),
        }
    }

    fn parse_bool_from_env(name: &'static str, default: bool) -> Result<bool, ConfigError> {
        let Some(value) = Self::read(name) else {
            return Ok(default);
        };
        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidBool { name, value }),
        }
    }
}
