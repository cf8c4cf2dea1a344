//! Ownership rule tables.
//!
//! A [`Rule`] is a compiled, case-insensitive pattern that votes for one [`Function`] with a
//! fixed weight. Keyword rules run against question text; citation rules run against each
//! citation string. [`RuleRegistry`] publishes the tables as an immutable
//! [`RuleSnapshot`] and swaps in a new snapshot when a custom rule is added, so an
//! in-flight classification always sees one consistent table.

mod defaults;
mod error;
mod registry;


use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::model::Function;

pub use error::RuleError;
pub use registry::{CustomRuleSpec, RuleFile, RuleRegistry, RuleSnapshot};

/// Which input a rule is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Matched against the lowercased full question text.
    Keyword,
    /// Matched against each citation with whitespace removed.
    Citation,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Citation => "citation",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "citation" => Ok(Self::Citation),
            _ => Err(RuleError::UnknownRuleType {
                value: s.to_string(),
            }),
        }
    }
}

/// A compiled ownership rule.
#[derive(Clone)]
pub struct Rule {
    kind: RuleKind,
    pattern: String,
    regex: Regex,
    target: Function,
    weight: f64,
    notes: String,
}

impl Rule {
    /// Compiles `pattern` case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidWeight`] unless `weight` is finite and positive, and
    /// [`RuleError::InvalidPattern`] if the pattern does not compile.
    pub fn new(
        kind: RuleKind,
        pattern: impl Into<String>,
        target: Function,
        weight: f64,
        notes: impl Into<String>,
    ) -> Result<Self, RuleError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(RuleError::InvalidWeight { weight });
        }
        let pattern = pattern.into();
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        Ok(Self {
            kind,
            pattern,
            regex,
            target,
            weight,
            notes: notes.into(),
        })
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn target(&self) -> Function {
        self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Serializable form of this rule.
    pub fn to_entry(&self) -> RuleEntry {
        RuleEntry {
            pattern: self.pattern.clone(),
            target_function: self.target,
            weight: self.weight,
            notes: self.notes.clone(),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern)
            .field("target", &self.target)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Serializable rule row used by [`RuleSnapshot::from_entries`] and [`RuleSnapshot::entries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub pattern: String,
    pub target_function: Function,
    pub weight: f64,
    #[serde(default)]
    pub notes: String,
}

impl RuleEntry {
    pub fn compile(&self, kind: RuleKind) -> Result<Rule, RuleError> {
        Rule::new(
            kind,
            self.pattern.clone(),
            self.target_function,
            self.weight,
            self.notes.clone(),
        )
    }
}
