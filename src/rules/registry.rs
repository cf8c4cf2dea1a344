use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::defaults::{CITATION_RULES, KEYWORD_RULES, RuleRow};
use super::{Rule, RuleEntry, RuleError, RuleKind};
use crate::model::Function;

static DEFAULT_SNAPSHOT: LazyLock<RuleSnapshot> = LazyLock::new(|| {
    RuleSnapshot::compile_rows(KEYWORD_RULES, CITATION_RULES)
        .expect("built-in rule tables compile")
});

/// An immutable view of every active rule.
#[derive(Debug, Clone)]
pub struct RuleSnapshot {
    keyword_rules: Vec<Rule>,
    citation_rules: Vec<Rule>,
    custom_rules: Vec<Rule>,
}

impl RuleSnapshot {
    /// The built-in keyword and citation tables with no custom rules.
    pub fn defaults() -> Self {
        DEFAULT_SNAPSHOT.clone()
    }

    /// Builds a snapshot from serialized table rows.
    pub fn from_entries(
        keyword: &[RuleEntry],
        citation: &[RuleEntry],
    ) -> Result<Self, RuleError> {
        Ok(Self {
            keyword_rules: keyword
                .iter()
                .map(|e| e.compile(RuleKind::Keyword))
                .collect::<Result<_, _>>()?,
            citation_rules: citation
                .iter()
                .map(|e| e.compile(RuleKind::Citation))
                .collect::<Result<_, _>>()?,
            custom_rules: Vec::new(),
        })
    }

    fn compile_rows(keyword: &[RuleRow], citation: &[RuleRow]) -> Result<Self, RuleError> {
        let compile = |kind: RuleKind, rows: &[RuleRow]| {
            rows.iter()
                .map(|&(target, pattern, weight, notes)| {
                    Rule::new(kind, pattern, target, weight, notes)
                })
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            keyword_rules: compile(RuleKind::Keyword, keyword)?,
            citation_rules: compile(RuleKind::Citation, citation)?,
            custom_rules: Vec::new(),
        })
    }

    /// Table rules of `kind` followed by custom rules of the same kind.
    pub fn rules(&self, kind: RuleKind) -> impl Iterator<Item = &Rule> {
        let table = match kind {
            RuleKind::Keyword => &self.keyword_rules,
            RuleKind::Citation => &self.citation_rules,
        };
        table
            .iter()
            .chain(self.custom_rules.iter().filter(move |r| r.kind == kind))
    }

    /// Serializable rows of `kind`, custom rules included.
    pub fn entries(&self, kind: RuleKind) -> Vec<RuleEntry> {
        self.rules(kind).map(Rule::to_entry).collect()
    }

    pub fn custom_rules(&self) -> &[Rule] {
        &self.custom_rules
    }

    pub fn len(&self) -> usize {
        self.keyword_rules.len() + self.citation_rules.len() + self.custom_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RuleSnapshot {
    fn default() -> Self {
        Self::defaults()
    }
}

/// One custom rule as it appears in a rule file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRuleSpec {
    pub rule_type: String,
    pub pattern: String,
    pub target_function: String,
    #[serde(default = "default_custom_weight")]
    pub weight: f64,
    #[serde(default)]
    pub description: String,
}

fn default_custom_weight() -> f64 {
    1.0
}

/// JSON document of custom rules: `{ "rules": [ ... ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<CustomRuleSpec>,
}

/// Read-mostly holder of the active [`RuleSnapshot`].
///
/// Readers call [`snapshot`](Self::snapshot) once per classification. Writers build a new
/// snapshot and swap it in, so readers never observe a partially applied change.
pub struct RuleRegistry {
    current: ArcSwap<RuleSnapshot>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::with_snapshot(RuleSnapshot::defaults())
    }

    pub fn with_snapshot(snapshot: RuleSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Builds a registry whose tables come from external data instead of the built-ins.
    pub fn from_entries(
        keyword: &[RuleEntry],
        citation: &[RuleEntry],
    ) -> Result<Self, RuleError> {
        Ok(Self::with_snapshot(RuleSnapshot::from_entries(keyword, citation)?))
    }

    pub fn snapshot(&self) -> Arc<RuleSnapshot> {
        self.current.load_full()
    }

    /// Validates and appends a custom rule.
    ///
    /// `rule_type` is `keyword` or `citation`; `target_function` accepts a function name or
    /// its short code.
    ///
    /// # Errors
    ///
    /// Fails on an unknown rule type or function, a non-positive weight, or a pattern that
    /// does not compile. The visible snapshot is unchanged on failure.
    pub fn add_custom_rule(
        &self,
        rule_type: &str,
        pattern: &str,
        target_function: &str,
        weight: f64,
        description: &str,
    ) -> Result<(), RuleError> {
        let kind: RuleKind = rule_type.parse()?;
        let target: Function = target_function.parse()?;
        let rule = Rule::new(kind, pattern, target, weight, description)?;
        self.push(rule);
        info!(
            rule_type = kind.as_str(),
            pattern,
            target = target.code(),
            weight,
            "custom rule added"
        );
        Ok(())
    }

    /// Appends an already compiled rule.
    pub fn add_rule(&self, rule: Rule) {
        debug!(pattern = rule.pattern(), kind = %rule.kind(), "adding rule");
        self.push(rule);
    }

    fn push(&self, rule: Rule) {
        self.current.rcu(|current| {
            let mut next = RuleSnapshot::clone(current);
            next.custom_rules.push(rule.clone());
            next
        });
    }

    /// Applies every rule in a [`RuleFile`].
    ///
    /// All rules are validated before any is published; one bad row rejects the file.
    pub fn apply_rule_file(&self, file: &RuleFile) -> Result<usize, RuleError> {
        let rules = file
            .rules
            .iter()
            .map(|spec| {
                let kind: RuleKind = spec.rule_type.parse()?;
                let target: Function = spec.target_function.parse()?;
                Rule::new(kind, spec.pattern.clone(), target, spec.weight, spec.description.clone())
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        let count = rules.len();
        self.current.rcu(|current| {
            let mut next = RuleSnapshot::clone(current);
            next.custom_rules.extend(rules.iter().cloned());
            next
        });
        info!(count, "custom rule file applied");
        Ok(count)
    }

    /// Reads a JSON [`RuleFile`] from disk and applies it.
    pub fn load_rule_file(&self, path: impl AsRef<Path>) -> Result<usize, RuleError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| RuleError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let file: RuleFile =
            serde_json::from_str(&raw).map_err(|source| RuleError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;
        self.apply_rule_file(&file)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.current.load();
        f.debug_struct("RuleRegistry")
            .field("rules", &snapshot.len())
            .field("custom_rules", &snapshot.custom_rules.len())
            .finish()
    }
}
