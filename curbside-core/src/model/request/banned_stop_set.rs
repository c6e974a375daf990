use std::collections::BTreeSet;

/// which stop indices of a banned trip may not be boarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannedStopSet {
    /// boarding is banned at every stop on the trip.
    All,
    Stops(BTreeSet<u32>),
}

impl BannedStopSet {
    pub fn of(indices: &[u32]) -> BannedStopSet {
        BannedStopSet::Stops(indices.iter().copied().collect())
    }

    pub fn contains(&self, stop_index: u32) -> bool {
        match self {
            BannedStopSet::All => true,
            BannedStopSet::Stops(stops) => stops.contains(&stop_index),
        }
    }
}
