//! parser for the banned-trips parameter: a comma-separated list of
//! `agency:trip[:stopIndex...]` entries mapping each trip to the stop
//! indices where boarding is banned.

use curbside_core::model::network::FeedScopedId;
use curbside_core::model::request::BannedStopSet;
use std::collections::{BTreeSet, HashMap};

/// entries with fewer than two colon-separated parts are silently
/// skipped. an entry with no stop indices bans the whole trip.
pub fn make_banned_trip_map(banned: &str) -> HashMap<FeedScopedId, BannedStopSet> {
    let mut banned_trip_map = HashMap::new();
    for trip_string in banned.split(',') {
        let parts: Vec<&str> = trip_string.split(':').collect();
        if parts.len() < 2 {
            continue;
        }
        let trip_id = FeedScopedId::new(parts[0], parts[1]);
        let banned_stops = if parts.len() == 2 {
            BannedStopSet::All
        } else {
            let mut stops = BTreeSet::new();
            for raw in &parts[2..] {
                match raw.parse::<u32>() {
                    Ok(index) => {
                        stops.insert(index);
                    }
                    Err(_) => {
                        log::warn!(
                            "ignoring malformed stop index '{raw}' in banned trip '{trip_string}'"
                        );
                    }
                }
            }
            BannedStopSet::Stops(stops)
        };
        banned_trip_map.insert(trip_id, banned_stops);
    }
    banned_trip_map
}
