use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// a single means of travel, either on the street network or on transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraverseMode {
    Walk,
    Bicycle,
    Car,
    Transit,
    Bus,
    Rail,
    Subway,
    Tram,
    Ferry,
}

impl TraverseMode {
    pub fn is_driving(&self) -> bool {
        matches!(self, TraverseMode::Car)
    }

    pub fn is_transit(&self) -> bool {
        matches!(
            self,
            TraverseMode::Transit
                | TraverseMode::Bus
                | TraverseMode::Rail
                | TraverseMode::Subway
                | TraverseMode::Tram
                | TraverseMode::Ferry
        )
    }

    pub fn is_on_street_non_transit(&self) -> bool {
        matches!(
            self,
            TraverseMode::Walk | TraverseMode::Bicycle | TraverseMode::Car
        )
    }
}

impl Display for TraverseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TraverseMode::Walk => "WALK",
            TraverseMode::Bicycle => "BICYCLE",
            TraverseMode::Car => "CAR",
            TraverseMode::Transit => "TRANSIT",
            TraverseMode::Bus => "BUS",
            TraverseMode::Rail => "RAIL",
            TraverseMode::Subway => "SUBWAY",
            TraverseMode::Tram => "TRAM",
            TraverseMode::Ferry => "FERRY",
        };
        write!(f, "{name}")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized traverse mode '{0}'")]
pub struct UnknownTraverseMode(pub String);

impl FromStr for TraverseMode {
    type Err = UnknownTraverseMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WALK" => Ok(TraverseMode::Walk),
            "BICYCLE" => Ok(TraverseMode::Bicycle),
            "CAR" => Ok(TraverseMode::Car),
            "TRANSIT" => Ok(TraverseMode::Transit),
            "BUS" => Ok(TraverseMode::Bus),
            "RAIL" => Ok(TraverseMode::Rail),
            "SUBWAY" => Ok(TraverseMode::Subway),
            "TRAM" => Ok(TraverseMode::Tram),
            "FERRY" => Ok(TraverseMode::Ferry),
            other => Err(UnknownTraverseMode(other.to_string())),
        }
    }
}
