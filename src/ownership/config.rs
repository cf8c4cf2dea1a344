use crate::constants::{MAX_SUPPORTING_FUNCTIONS, SUPPORTING_RATIO};
use crate::model::Function;

/// Classifier policy knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Function assigned when a question produces no signals.
    pub default_function: Function,
    /// Share of the primary score a function needs to be listed as supporting.
    pub supporting_ratio: f64,
    pub max_supporting: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_function: Function::DirectorOfMaintenance,
            supporting_ratio: SUPPORTING_RATIO,
            max_supporting: MAX_SUPPORTING_FUNCTIONS,
        }
    }
}

impl ClassifierConfig {
    pub fn with_default_function(mut self, function: Function) -> Self {
        self.default_function = function;
        self
    }
}
