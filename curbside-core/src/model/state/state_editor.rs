use crate::model::network::{StreetEdge, TraverseMode};
use crate::model::request::RoutingRequest;
use crate::model::state::State;
use std::sync::Arc;

/// mutation scratch-space for building one successor state. commits via
/// `make_state`, which refuses the successor when a post-edit invariant
/// does not hold.
pub struct StateEditor {
    child: State,
    defective: bool,
}

impl StateEditor {
    pub(crate) fn new(parent: &State, edge: &StreetEdge) -> StateEditor {
        let mut child = parent.clone();
        child.back_state = Some(Arc::new(parent.clone()));
        child.back_edge = Some(edge.edge_id());
        child.next_result = None;
        child.vertex = if parent.request.arrive_by {
            edge.from_vertex()
        } else {
            edge.to_vertex()
        };
        StateEditor {
            child,
            defective: false,
        }
    }

    /// moves the clock by the given duration, backwards for arrive-by
    /// searches.
    pub fn increment_time_seconds(&mut self, seconds: i64) {
        if self.child.request.arrive_by {
            self.child.time_seconds -= seconds;
        } else {
            self.child.time_seconds += seconds;
        }
    }

    pub fn increment_weight(&mut self, weight: f64) {
        if weight.is_nan() {
            log::warn!("weight increment is NaN, invalidating traversal");
            self.defective = true;
            return;
        }
        if weight < 0.0 {
            log::warn!("weight increment {weight} is negative, invalidating traversal");
            self.defective = true;
            return;
        }
        self.child.weight += weight;
    }

    pub fn increment_walk_distance(&mut self, meters: f64) {
        if meters < 0.0 {
            log::warn!("walk distance increment {meters} is negative, invalidating traversal");
            self.defective = true;
            return;
        }
        self.child.walk_distance += meters;
    }

    pub fn increment_pre_transit_time(&mut self, seconds: i32) {
        if seconds < 0 {
            log::warn!("pre-transit time increment {seconds} is negative, invalidating traversal");
            self.defective = true;
            return;
        }
        self.child.pre_transit_time += seconds;
    }

    pub fn set_back_mode(&mut self, mode: Option<TraverseMode>) {
        self.child.back_mode = mode;
    }

    pub fn set_back_walking_bike(&mut self, walking_bike: bool) {
        self.child.back_walking_bike = walking_bike;
    }

    pub fn set_car_parked(&mut self, car_parked: bool) {
        self.child.car_parked = car_parked;
    }

    pub fn set_ever_boarded(&mut self, ever_boarded: bool) {
        self.child.ever_boarded = ever_boarded;
    }

    pub fn walk_distance(&self) -> f64 {
        self.child.walk_distance
    }

    pub fn pre_transit_time(&self) -> i32 {
        self.child.pre_transit_time
    }

    pub fn walked_too_far(&self, request: &RoutingRequest) -> bool {
        self.child.walk_distance > request.max_walk_distance
    }

    pub fn pre_transit_time_exceeded(&self, request: &RoutingRequest) -> bool {
        self.child.pre_transit_time > request.max_pre_transit_time
    }

    /// commits the buffer. yields nothing when an invariant failed: a
    /// defective edit, time moving against the search direction, or a
    /// weight below the parent's.
    pub fn make_state(self) -> Option<State> {
        if self.defective {
            return None;
        }
        let parent = self.child.back_state.as_deref()?;
        let time_delta = self.child.time_seconds - parent.time_seconds;
        let backward = self.child.request.arrive_by;
        if (backward && time_delta > 0) || (!backward && time_delta < 0) {
            log::warn!("time was incremented against the search direction, dropping state");
            return None;
        }
        if self.child.weight < parent.weight {
            log::warn!("weight may not decrease along a path, dropping state");
            return None;
        }
        Some(self.child)
    }
}
