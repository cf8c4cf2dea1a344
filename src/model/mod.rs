//! Input records shared by both engines.
//!
//! [`Question`] and [`ManualSection`] are produced by the external document parser and
//! are read-only here. Missing fields deserialize as empty so malformed upstream
//! records degrade to "no signals" instead of failing.

mod function;

#[cfg(test)]
mod tests;

pub use function::{Function, FunctionParseError};

use serde::{Deserialize, Serialize};

/// One audit question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Question {
    /// Unique question identifier (QID).
    pub qid: String,
    /// Full question text.
    pub text_full: String,
    /// Condensed question text.
    pub text_condensed: String,
    /// Data-collection guidance (what evidence satisfies the question).
    pub guidance: String,
    /// Regulatory citations, e.g. `"14 CFR 121.369"`.
    pub citations: Vec<String>,
    /// Advisory or guidance references, e.g. `"AC 39-9"`.
    pub other_references: Vec<String>,
    /// Free-text notes attached by the parser.
    pub notes: Vec<String>,
}

impl Question {
    pub fn new(qid: impl Into<String>, text_full: impl Into<String>) -> Self {
        Self {
            qid: qid.into(),
            text_full: text_full.into(),
            ..Default::default()
        }
    }

    pub fn with_condensed(mut self, text: impl Into<String>) -> Self {
        self.text_condensed = text.into();
        self
    }

    pub fn with_guidance(mut self, guidance: impl Into<String>) -> Self {
        self.guidance = guidance.into();
        self
    }

    pub fn with_citations<I, S>(mut self, citations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.citations = citations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_other_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.other_references = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes = notes.into_iter().map(Into::into).collect();
        self
    }

    /// The citation list joined into one reference string.
    pub fn reference_string(&self) -> String {
        self.citations.join(", ")
    }
}

/// One section of a reference manual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualSection {
    /// Stable section identifier (used as the embedding cache key).
    pub id: String,
    /// Identifier of the manual this section belongs to.
    pub manual_id: String,
    /// Manual type tag, e.g. `"GMM"` or `"AIP"`.
    pub manual_type: String,
    /// Section number, e.g. `"6.4"`.
    pub section_number: Option<String>,
    /// Section title.
    pub title: String,
    /// Full section body.
    pub text: String,
    /// Page the section starts on.
    pub page_number: Option<u32>,
    /// Regulatory citations found in the section text.
    pub citations: Vec<String>,
}

impl ManualSection {
    pub fn new(
        id: impl Into<String>,
        manual_id: impl Into<String>,
        manual_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            manual_id: manual_id.into(),
            manual_type: manual_type.into(),
            ..Default::default()
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.section_number = Some(number.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    pub fn with_citations<I, S>(mut self, citations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.citations = citations.into_iter().map(Into::into).collect();
        self
    }
}
