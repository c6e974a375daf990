use crate::model::network::{TraverseMode, TraverseModeSet};
use std::fmt::Display;

const PEDESTRIAN_BIT: u8 = 1;
const BICYCLE_BIT: u8 = 2;
const CAR_BIT: u8 = 4;

/// the street modes an edge may be traversed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalPermission(u8);

impl TraversalPermission {
    pub const NONE: TraversalPermission = TraversalPermission(0);
    pub const PEDESTRIAN: TraversalPermission = TraversalPermission(PEDESTRIAN_BIT);
    pub const BICYCLE: TraversalPermission = TraversalPermission(BICYCLE_BIT);
    pub const CAR: TraversalPermission = TraversalPermission(CAR_BIT);
    pub const PEDESTRIAN_AND_BICYCLE: TraversalPermission =
        TraversalPermission(PEDESTRIAN_BIT | BICYCLE_BIT);
    pub const PEDESTRIAN_AND_CAR: TraversalPermission =
        TraversalPermission(PEDESTRIAN_BIT | CAR_BIT);
    pub const BICYCLE_AND_CAR: TraversalPermission = TraversalPermission(BICYCLE_BIT | CAR_BIT);
    pub const ALL: TraversalPermission =
        TraversalPermission(PEDESTRIAN_BIT | BICYCLE_BIT | CAR_BIT);

    pub fn allows_mode(&self, mode: TraverseMode) -> bool {
        match mode {
            TraverseMode::Walk => self.0 & PEDESTRIAN_BIT != 0,
            TraverseMode::Bicycle => self.0 & BICYCLE_BIT != 0,
            TraverseMode::Car => self.0 & CAR_BIT != 0,
            _ => false,
        }
    }

    /// true when any street mode in the set is permitted.
    pub fn allows_set(&self, modes: &TraverseModeSet) -> bool {
        modes.iter().any(|mode| self.allows_mode(mode))
    }

    pub fn union(&self, other: TraversalPermission) -> TraversalPermission {
        TraversalPermission(self.0 | other.0)
    }

    pub fn intersection(&self, other: TraversalPermission) -> TraversalPermission {
        TraversalPermission(self.0 & other.0)
    }
}

impl Display for TraversalPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = vec![];
        if self.0 & PEDESTRIAN_BIT != 0 {
            parts.push("PEDESTRIAN");
        }
        if self.0 & BICYCLE_BIT != 0 {
            parts.push("BICYCLE");
        }
        if self.0 & CAR_BIT != 0 {
            parts.push("CAR");
        }
        if parts.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", parts.join("_AND_"))
        }
    }
}
