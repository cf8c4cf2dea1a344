use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The seven accountable organizational functions a question can be owned by.
///
/// Variant order is the table order used for deterministic tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Function {
    #[serde(rename = "Maintenance Planning")]
    MaintenancePlanning,
    #[serde(rename = "Maintenance Operations Center")]
    MaintenanceOperationsCenter,
    #[serde(rename = "Director of Maintenance")]
    DirectorOfMaintenance,
    #[serde(rename = "Aircraft Records")]
    AircraftRecords,
    #[serde(rename = "Quality")]
    Quality,
    #[serde(rename = "Training")]
    Training,
    #[serde(rename = "Safety")]
    Safety,
}

/// Returned when a string names none of the seven functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown function '{value}': expected one of the 7 authorized functions")]
pub struct FunctionParseError {
    pub value: String,
}

impl Function {
    /// All functions in table order.
    pub const ALL: [Function; 7] = [
        Function::MaintenancePlanning,
        Function::MaintenanceOperationsCenter,
        Function::DirectorOfMaintenance,
        Function::AircraftRecords,
        Function::Quality,
        Function::Training,
        Function::Safety,
    ];

    /// Number of functions.
    pub const COUNT: usize = Self::ALL.len();

    /// Human-readable name, as used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Function::MaintenancePlanning => "Maintenance Planning",
            Function::MaintenanceOperationsCenter => "Maintenance Operations Center",
            Function::DirectorOfMaintenance => "Director of Maintenance",
            Function::AircraftRecords => "Aircraft Records",
            Function::Quality => "Quality",
            Function::Training => "Training",
            Function::Safety => "Safety",
        }
    }

    /// Short code.
    pub fn code(&self) -> &'static str {
        match self {
            Function::MaintenancePlanning => "MP",
            Function::MaintenanceOperationsCenter => "MOC",
            Function::DirectorOfMaintenance => "DOM",
            Function::AircraftRecords => "RECORDS",
            Function::Quality => "QUALITY",
            Function::Training => "TRAINING",
            Function::Safety => "SAFETY",
        }
    }

    /// Position in [`Function::ALL`]; used to index per-function score arrays.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Function::MaintenancePlanning => 0,
            Function::MaintenanceOperationsCenter => 1,
            Function::DirectorOfMaintenance => 2,
            Function::AircraftRecords => 3,
            Function::Quality => 4,
            Function::Training => 5,
            Function::Safety => 6,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = FunctionParseError;

    /// Accepts the display name or the short code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Function::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(wanted) || f.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FunctionParseError {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Function {
    type Error = FunctionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
