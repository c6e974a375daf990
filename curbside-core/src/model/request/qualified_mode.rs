use crate::model::network::{TraverseMode, TraverseModeSet};
use crate::model::request::RoutingRequest;
use std::str::FromStr;

/// how a vehicle of some mode is obtained or disposed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Rent,
    Park,
    Kiss,
}

impl FromStr for Qualifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RENT" => Ok(Qualifier::Rent),
            "PARK" => Ok(Qualifier::Park),
            "KISS" => Ok(Qualifier::Kiss),
            other => Err(other.to_string()),
        }
    }
}

/// a travel mode with optional qualifiers, e.g. `CAR_PARK` or
/// `BICYCLE_RENT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedMode {
    pub mode: TraverseMode,
    pub qualifiers: Vec<Qualifier>,
}

impl FromStr for QualifiedMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('_');
        let mode_token = parts.next().unwrap_or_default();
        let mode = TraverseMode::from_str(mode_token).map_err(|e| e.to_string())?;
        let mut qualifiers = vec![];
        for token in parts {
            match Qualifier::from_str(token) {
                Ok(q) => qualifiers.push(q),
                Err(other) => {
                    log::warn!("ignoring unrecognized mode qualifier '{other}' in '{s}'");
                }
            }
        }
        Ok(QualifiedMode { mode, qualifiers })
    }
}

/// the comma-separated qualified mode list of a query, e.g.
/// `TRANSIT,WALK` or `CAR_KISS,TRANSIT,WALK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedModeSet {
    pub modes: Vec<QualifiedMode>,
}

impl FromStr for QualifiedModeSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modes = vec![];
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            modes.push(QualifiedMode::from_str(token)?);
        }
        Ok(QualifiedModeSet { modes })
    }
}

impl QualifiedModeSet {
    /// writes the mode set and any park/kiss/rental flags onto the
    /// request. qualified street modes also enable walking, since the
    /// traveler continues on foot once the vehicle is disposed of.
    pub fn apply_to_request(&self, request: &mut RoutingRequest) {
        let mut modes = TraverseModeSet::empty();
        for qualified in self.modes.iter() {
            modes.insert(qualified.mode);
            for qualifier in qualified.qualifiers.iter() {
                match (qualified.mode, qualifier) {
                    (TraverseMode::Bicycle, Qualifier::Rent) => {
                        request.allow_bike_rental = true;
                        modes.insert(TraverseMode::Walk);
                    }
                    (TraverseMode::Car, Qualifier::Park) => {
                        request.park_and_ride = true;
                        modes.insert(TraverseMode::Walk);
                    }
                    (TraverseMode::Car, Qualifier::Kiss) => {
                        request.kiss_and_ride = true;
                        modes.insert(TraverseMode::Walk);
                    }
                    (mode, qualifier) => {
                        log::warn!("ignoring qualifier {qualifier:?} on mode {mode}");
                    }
                }
            }
        }
        request.set_modes(modes);
    }
}
