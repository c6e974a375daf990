use crate::model::network::{EdgeId, StreetEdge, TraverseMode, VertexId};
use crate::model::request::RoutingRequest;
use crate::model::state::StateEditor;
use std::sync::Arc;

/// identity of a state within the search frontier. two states with the
/// same key compete for dominance; states with different keys coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub vertex: VertexId,
    pub car_parked: bool,
    pub ever_boarded: bool,
    pub back_walking_bike: bool,
}

/// a node in the search. the chain of back states reconstructs the
/// path; the next-result chain carries alternate successors produced by
/// a mode-switch fork.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) vertex: VertexId,
    pub(crate) time_seconds: i64,
    pub(crate) start_time_seconds: i64,
    pub(crate) weight: f64,
    /// meters walked (or biked) so far; also the tie-breaker bucket for
    /// turn costs.
    pub(crate) walk_distance: f64,
    /// seconds spent before boarding transit on a drive-to-transit trip.
    pub(crate) pre_transit_time: i32,
    pub(crate) car_parked: bool,
    pub(crate) ever_boarded: bool,
    pub(crate) back_walking_bike: bool,
    pub(crate) back_mode: Option<TraverseMode>,
    pub(crate) back_edge: Option<EdgeId>,
    pub(crate) back_state: Option<Arc<State>>,
    pub(crate) next_result: Option<Box<State>>,
    pub(crate) request: Arc<RoutingRequest>,
}

impl State {
    /// the initial state of a search. arrive-by drive-to-transit trips
    /// begin with the car already parked; the kiss-and-ride fork later
    /// un-parks it.
    pub fn origin(vertex: VertexId, time_seconds: i64, request: Arc<RoutingRequest>) -> State {
        let car_parked = request.arrive_by && (request.park_and_ride || request.kiss_and_ride);
        State {
            vertex,
            time_seconds,
            start_time_seconds: time_seconds,
            weight: 0.0,
            walk_distance: 0.0,
            pre_transit_time: 0,
            car_parked,
            ever_boarded: false,
            back_walking_bike: false,
            back_mode: None,
            back_edge: None,
            back_state: None,
            next_result: None,
            request,
        }
    }

    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    pub fn time_seconds(&self) -> i64 {
        self.time_seconds
    }

    pub fn start_time_seconds(&self) -> i64 {
        self.start_time_seconds
    }

    /// seconds spent since the start of the search, regardless of
    /// search direction.
    pub fn elapsed_time_seconds(&self) -> i64 {
        (self.time_seconds - self.start_time_seconds).abs()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn walk_distance(&self) -> f64 {
        self.walk_distance
    }

    pub fn pre_transit_time(&self) -> i32 {
        self.pre_transit_time
    }

    pub fn is_car_parked(&self) -> bool {
        self.car_parked
    }

    pub fn is_ever_boarded(&self) -> bool {
        self.ever_boarded
    }

    pub fn is_back_walking_bike(&self) -> bool {
        self.back_walking_bike
    }

    pub fn back_mode(&self) -> Option<TraverseMode> {
        self.back_mode
    }

    pub fn back_edge(&self) -> Option<EdgeId> {
        self.back_edge
    }

    pub fn back_state(&self) -> Option<&State> {
        self.back_state.as_deref()
    }

    pub fn next_result(&self) -> Option<&State> {
        self.next_result.as_deref()
    }

    pub fn request(&self) -> &Arc<RoutingRequest> {
        &self.request
    }

    pub fn key(&self) -> StateKey {
        StateKey {
            vertex: self.vertex,
            car_parked: self.car_parked,
            ever_boarded: self.ever_boarded,
            back_walking_bike: self.back_walking_bike,
        }
    }

    /// the street mode this state is currently traveling by, derived
    /// from the permitted modes and the vehicle flags.
    pub fn non_transit_mode(&self) -> TraverseMode {
        let modes = &self.request.modes;
        if modes.has_car() {
            if self.car_parked {
                return TraverseMode::Walk;
            }
            return TraverseMode::Car;
        }
        if modes.has_bicycle() {
            return TraverseMode::Bicycle;
        }
        TraverseMode::Walk
    }

    /// opens a mutation buffer for traversing the given edge from this
    /// state. the buffer commits via `make_state`.
    pub fn edit(&self, edge: &StreetEdge) -> StateEditor {
        StateEditor::new(self, edge)
    }

    /// appends an existing result chain behind this state's own chain.
    pub fn add_to_existing_result_chain(&mut self, existing: Option<Box<State>>) {
        match self.next_result.as_mut() {
            Some(next) => next.add_to_existing_result_chain(existing),
            None => self.next_result = existing,
        }
    }

    /// number of states linked through the result chain, this one
    /// included.
    pub fn result_chain_len(&self) -> usize {
        let mut n = 1;
        let mut cursor = self.next_result.as_deref();
        while let Some(state) = cursor {
            n += 1;
            cursor = state.next_result.as_deref();
        }
        n
    }
}
