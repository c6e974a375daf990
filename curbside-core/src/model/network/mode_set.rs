use crate::model::network::TraverseMode;
use itertools::Itertools;
use std::fmt::Display;

const ALL_MODES: [TraverseMode; 9] = [
    TraverseMode::Walk,
    TraverseMode::Bicycle,
    TraverseMode::Car,
    TraverseMode::Transit,
    TraverseMode::Bus,
    TraverseMode::Rail,
    TraverseMode::Subway,
    TraverseMode::Tram,
    TraverseMode::Ferry,
];

/// the set of modes a traveler is willing to use. TRANSIT acts as an
/// umbrella that expands to every transit subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraverseModeSet(u16);

impl TraverseModeSet {
    pub fn empty() -> TraverseModeSet {
        TraverseModeSet(0)
    }

    pub fn of(modes: &[TraverseMode]) -> TraverseModeSet {
        let mut set = TraverseModeSet::empty();
        for mode in modes {
            set.insert(*mode);
        }
        set
    }

    fn bit(mode: TraverseMode) -> u16 {
        1 << (mode as u16)
    }

    pub fn insert(&mut self, mode: TraverseMode) {
        self.0 |= Self::bit(mode);
        if mode == TraverseMode::Transit {
            for sub in ALL_MODES.iter().filter(|m| m.is_transit()) {
                self.0 |= Self::bit(*sub);
            }
        }
    }

    pub fn remove(&mut self, mode: TraverseMode) {
        self.0 &= !Self::bit(mode);
    }

    pub fn contains(&self, mode: TraverseMode) -> bool {
        self.0 & Self::bit(mode) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn has_walk(&self) -> bool {
        self.contains(TraverseMode::Walk)
    }

    pub fn has_bicycle(&self) -> bool {
        self.contains(TraverseMode::Bicycle)
    }

    pub fn has_car(&self) -> bool {
        self.contains(TraverseMode::Car)
    }

    pub fn has_transit(&self) -> bool {
        ALL_MODES
            .iter()
            .any(|m| m.is_transit() && self.contains(*m))
    }

    pub fn iter(&self) -> impl Iterator<Item = TraverseMode> + '_ {
        ALL_MODES.into_iter().filter(|m| self.contains(*m))
    }
}

impl Display for TraverseModeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iter().map(|m| m.to_string()).join(","))
    }
}
