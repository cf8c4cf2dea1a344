//! Ownership classification.
//!
//! [`OwnershipClassifier::classify`] runs every keyword rule over a question's full text
//! and every citation rule over its citations, sums the weights per [`Function`], picks the
//! highest-scoring function (first in [`Function::ALL`] order on ties) and explains the pick.
//! A question with no signals falls back to [`ClassifierConfig::default_function`] with
//! zero confidence.
//!
//! [`Function`]: crate::model::Function
//! [`Function::ALL`]: crate::model::Function::ALL

mod classifier;
mod config;
mod types;


pub use classifier::OwnershipClassifier;
pub use config::ClassifierConfig;
pub use types::{ConfidenceLabel, OwnershipDecision, OwnershipSummary, SignalMatch};
