use crate::model::network::{FeedScopedId, TraverseMode, TraverseModeSet};
use crate::model::request::{BannedStopSet, FeaturePreference, Locale, OptimizeType};
use crate::model::traversal::intersection_cost::{
    IntersectionTraversalCostModel, SimpleTraversalCostModel,
};
use std::collections::HashMap;
use std::sync::Arc;
use uom::si::f64::Velocity;
use uom::si::velocity::meter_per_second;

/// maximum ADA-compliant ramp slope, the default wheelchair limit.
pub const DEFAULT_MAX_SLOPE: f64 = 0.0833333333333;

/// all parameters of a single path search. cloned from a process-wide
/// prototype during assembly, then consumed read-only by the search.
#[derive(Debug, Clone)]
pub struct RoutingRequest {
    pub from_place: Option<String>,
    pub to_place: Option<String>,
    pub intermediate_places: Vec<String>,
    /// departure (or arrival, when `arrive_by`) time, epoch seconds.
    pub date_time: i64,
    pub arrive_by: bool,
    pub modes: TraverseModeSet,
    pub wheelchair_accessible: bool,
    pub max_slope: f64,

    pub walk_reluctance: f64,
    pub wait_reluctance: f64,
    pub wait_at_beginning_factor: f64,
    pub stairs_reluctance: f64,
    pub turn_reluctance: f64,

    pub walk_speed: Velocity,
    pub bike_speed: Velocity,
    pub car_speed: Velocity,

    pub bike_switch_time: i32,
    pub bike_switch_cost: i32,

    pub optimize: OptimizeType,
    pub triangle_safety_factor: f64,
    pub triangle_slope_factor: f64,
    pub triangle_time_factor: f64,

    pub walk_board_cost: i32,
    pub bike_board_cost: i32,
    pub transfer_penalty: i32,
    pub nonpreferred_transfer_penalty: i32,

    pub max_walk_distance: f64,
    pub soft_walk_limiting: bool,
    pub soft_walk_penalty: f64,
    pub soft_walk_overage_rate: f64,

    pub max_pre_transit_time: i32,
    pub soft_pre_transit_limiting: bool,
    pub pre_transit_penalty: f64,
    pub pre_transit_overage_rate: f64,

    pub board_slack: i32,
    pub alight_slack: i32,
    pub transfer_slack: i32,

    pub preferred_routes: Vec<String>,
    pub other_than_preferred_routes_penalty: i32,
    pub preferred_agencies: Vec<String>,
    pub unpreferred_routes: Vec<String>,
    pub unpreferred_agencies: Vec<String>,
    pub banned_routes: Vec<String>,
    pub banned_agencies: Vec<String>,
    pub banned_trips: HashMap<FeedScopedId, BannedStopSet>,
    pub banned_stops: Vec<FeedScopedId>,
    pub banned_stops_hard: Vec<FeedScopedId>,

    pub max_transfers: i32,
    pub num_itineraries: i32,
    pub batch: bool,
    pub show_intermediate_stops: bool,
    pub starting_transit_stop_id: Option<FeedScopedId>,
    pub starting_transit_trip_id: Option<FeedScopedId>,
    pub clamp_initial_wait: i64,
    pub reverse_optimize_on_the_fly: bool,
    pub ignore_realtime_updates: bool,
    pub disable_remaining_weight_heuristic: bool,
    pub use_bike_rental_availability_information: bool,

    pub locale: Locale,

    pub permit_footway: bool,
    pub permit_crossing: FeaturePreference,
    pub permit_bollard: FeaturePreference,
    pub permit_cycle_barrier: FeaturePreference,
    pub permit_turnstile: FeaturePreference,
    pub permit_traffic_light_sound: FeaturePreference,
    pub permit_traffic_light_vibration: FeaturePreference,
    pub permit_traffic_light_vibration_floor: FeaturePreference,

    pub kiss_and_ride: bool,
    pub park_and_ride: bool,
    pub allow_bike_rental: bool,

    /// true on the walking-the-bike variant of a bicycle request.
    pub walking_bike: bool,
    /// substitute options used when a cyclist dismounts and walks the
    /// bike. None means this request is its own walking variant.
    pub bike_walking_options: Option<Arc<RoutingRequest>>,

    pub intersection_cost_model: Arc<dyn IntersectionTraversalCostModel>,
}

impl Default for RoutingRequest {
    fn default() -> Self {
        RoutingRequest {
            from_place: None,
            to_place: None,
            intermediate_places: vec![],
            date_time: 0,
            arrive_by: false,
            modes: TraverseModeSet::of(&[TraverseMode::Transit, TraverseMode::Walk]),
            wheelchair_accessible: false,
            max_slope: DEFAULT_MAX_SLOPE,
            walk_reluctance: 2.0,
            wait_reluctance: 1.0,
            wait_at_beginning_factor: 0.4,
            stairs_reluctance: 2.0,
            turn_reluctance: 1.0,
            walk_speed: Velocity::new::<meter_per_second>(1.33),
            bike_speed: Velocity::new::<meter_per_second>(5.0),
            car_speed: Velocity::new::<meter_per_second>(40.0),
            bike_switch_time: 0,
            bike_switch_cost: 0,
            optimize: OptimizeType::Quick,
            triangle_safety_factor: 0.0,
            triangle_slope_factor: 0.0,
            triangle_time_factor: 0.0,
            walk_board_cost: 600,
            bike_board_cost: 600,
            transfer_penalty: 0,
            nonpreferred_transfer_penalty: 180,
            max_walk_distance: f64::MAX,
            soft_walk_limiting: true,
            soft_walk_penalty: 60.0,
            soft_walk_overage_rate: 5.0,
            max_pre_transit_time: i32::MAX,
            soft_pre_transit_limiting: true,
            pre_transit_penalty: 300.0,
            pre_transit_overage_rate: 10.0,
            board_slack: 0,
            alight_slack: 0,
            transfer_slack: 120,
            preferred_routes: vec![],
            other_than_preferred_routes_penalty: 300,
            preferred_agencies: vec![],
            unpreferred_routes: vec![],
            unpreferred_agencies: vec![],
            banned_routes: vec![],
            banned_agencies: vec![],
            banned_trips: HashMap::new(),
            banned_stops: vec![],
            banned_stops_hard: vec![],
            max_transfers: 2,
            num_itineraries: 3,
            batch: false,
            show_intermediate_stops: false,
            starting_transit_stop_id: None,
            starting_transit_trip_id: None,
            clamp_initial_wait: -1,
            reverse_optimize_on_the_fly: false,
            ignore_realtime_updates: false,
            disable_remaining_weight_heuristic: false,
            use_bike_rental_availability_information: false,
            locale: Locale::default(),
            permit_footway: false,
            permit_crossing: FeaturePreference::Neutral,
            permit_bollard: FeaturePreference::Neutral,
            permit_cycle_barrier: FeaturePreference::Neutral,
            permit_turnstile: FeaturePreference::Neutral,
            permit_traffic_light_sound: FeaturePreference::Neutral,
            permit_traffic_light_vibration: FeaturePreference::Neutral,
            permit_traffic_light_vibration_floor: FeaturePreference::Neutral,
            kiss_and_ride: false,
            park_and_ride: false,
            allow_bike_rental: false,
            walking_bike: false,
            bike_walking_options: None,
            intersection_cost_model: Arc::new(SimpleTraversalCostModel),
        }
    }
}

impl RoutingRequest {
    /// traveler speed for a street mode, meters per second. driving
    /// speeds on actual edges come from the edge, not from here.
    pub fn speed(&self, mode: TraverseMode) -> Velocity {
        match mode {
            TraverseMode::Walk => self.walk_speed,
            TraverseMode::Bicycle => self.bike_speed,
            TraverseMode::Car => self.car_speed,
            other => {
                log::warn!("no speed is defined for mode {other}");
                Velocity::new::<meter_per_second>(f64::NAN)
            }
        }
    }

    /// fastest speed any permitted street mode can attain.
    pub fn street_speed_upper_bound(&self) -> Velocity {
        if self.modes.has_car() {
            self.car_speed
        } else if self.modes.has_bicycle() {
            self.bike_speed
        } else {
            self.walk_speed
        }
    }

    /// replaces the mode set. when the set includes a bicycle or car,
    /// a snapshot of this request is stored as the walking variant used
    /// after dismounting, with walking-a-bike derates applied.
    pub fn set_modes(&mut self, modes: TraverseModeSet) {
        self.modes = modes;
        if modes.has_bicycle() {
            let mut walking = self.clone();
            walking.bike_walking_options = None;
            // walking a bike: slower, more reluctant, stairs worse
            walking.walk_speed = self.walk_speed * 0.8;
            walking.walk_reluctance = self.walk_reluctance * 2.7;
            walking.stairs_reluctance = self.stairs_reluctance * 5.0;
            let mut walk_modes = modes;
            walk_modes.remove(TraverseMode::Bicycle);
            walk_modes.insert(TraverseMode::Walk);
            walking.modes = walk_modes;
            walking.walking_bike = true;
            self.bike_walking_options = Some(Arc::new(walking));
        } else if modes.has_car() {
            let mut walking = self.clone();
            walking.bike_walking_options = None;
            let mut walk_modes = modes;
            walk_modes.remove(TraverseMode::Bicycle);
            walk_modes.insert(TraverseMode::Walk);
            walking.modes = walk_modes;
            self.bike_walking_options = Some(Arc::new(walking));
        } else {
            self.bike_walking_options = None;
        }
    }

    pub fn set_optimize(&mut self, optimize: OptimizeType) {
        self.optimize = optimize;
        if let Some(walking) = self.bike_walking_options.take() {
            let mut walking = walking.as_ref().clone();
            walking.optimize = optimize;
            self.bike_walking_options = Some(Arc::new(walking));
        }
    }

    pub fn set_triangle_factors(&mut self, safety: f64, slope: f64, time: f64) {
        self.triangle_safety_factor = safety;
        self.triangle_slope_factor = slope;
        self.triangle_time_factor = time;
        if let Some(walking) = self.bike_walking_options.take() {
            let mut walking = walking.as_ref().clone();
            walking.triangle_safety_factor = safety;
            walking.triangle_slope_factor = slope;
            walking.triangle_time_factor = time;
            self.bike_walking_options = Some(Arc::new(walking));
        }
    }
}
