use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// the characteristic a search should optimize for. TRANSFERS is
/// rewritten to QUICK with an increased transfer penalty during
/// request assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizeType {
    Quick,
    Safe,
    Greenways,
    Flat,
    Triangle,
    Transfers,
}

impl Display for OptimizeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OptimizeType::Quick => "QUICK",
            OptimizeType::Safe => "SAFE",
            OptimizeType::Greenways => "GREENWAYS",
            OptimizeType::Flat => "FLAT",
            OptimizeType::Triangle => "TRIANGLE",
            OptimizeType::Transfers => "TRANSFERS",
        };
        write!(f, "{name}")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized optimize type '{0}'")]
pub struct UnknownOptimizeType(pub String);

impl FromStr for OptimizeType {
    type Err = UnknownOptimizeType;

    // case-sensitive, matching the query interface
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUICK" => Ok(OptimizeType::Quick),
            "SAFE" => Ok(OptimizeType::Safe),
            "GREENWAYS" => Ok(OptimizeType::Greenways),
            "FLAT" => Ok(OptimizeType::Flat),
            "TRIANGLE" => Ok(OptimizeType::Triangle),
            "TRANSFERS" => Ok(OptimizeType::Transfers),
            other => Err(UnknownOptimizeType(other.to_string())),
        }
    }
}
