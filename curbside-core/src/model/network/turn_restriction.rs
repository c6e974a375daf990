use crate::model::network::{EdgeId, TraverseModeSet};

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRestrictionType {
    NoTurn,
    OnlyTurn,
}

/// a daily window during which a restriction applies, in seconds after
/// local midnight. windows may wrap past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_second_of_day: u32,
    pub end_second_of_day: u32,
}

impl TimeWindow {
    fn covers(&self, second_of_day: u32) -> bool {
        if self.start_second_of_day <= self.end_second_of_day {
            (self.start_second_of_day..=self.end_second_of_day).contains(&second_of_day)
        } else {
            second_of_day >= self.start_second_of_day || second_of_day <= self.end_second_of_day
        }
    }
}

/// restricts turning from one edge onto another for the given modes.
/// attached to the incoming edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRestriction {
    pub restriction_type: TurnRestrictionType,
    pub from: EdgeId,
    pub to: EdgeId,
    pub modes: TraverseModeSet,
    /// empty means always active.
    pub time_windows: Vec<TimeWindow>,
}

impl TurnRestriction {
    pub fn always(
        restriction_type: TurnRestrictionType,
        from: EdgeId,
        to: EdgeId,
        modes: TraverseModeSet,
    ) -> TurnRestriction {
        TurnRestriction {
            restriction_type,
            from,
            to,
            modes,
            time_windows: vec![],
        }
    }

    pub fn active(&self, time_seconds: i64) -> bool {
        if self.time_windows.is_empty() {
            return true;
        }
        let second_of_day = time_seconds.rem_euclid(SECONDS_PER_DAY) as u32;
        self.time_windows.iter().any(|w| w.covers(second_of_day))
    }
}
