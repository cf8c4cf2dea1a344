use std::path::PathBuf;

use thiserror::Error;

use crate::model::FunctionParseError;

/// Errors raised while building or extending a rule table.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("unknown rule type '{value}': expected 'keyword' or 'citation'")]
    UnknownRuleType { value: String },

    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    UnknownFunction(#[from] FunctionParseError),

    #[error("invalid rule weight {weight}: must be finite and greater than zero")]
    InvalidWeight { weight: f64 },

    #[error("failed to read rule file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
