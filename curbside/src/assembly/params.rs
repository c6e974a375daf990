//! the enumerated record of recognized query options. every field is a
//! list because query parameters may repeat; the assembler selects the
//! n-th (or last) occurrence per field.

use curbside_core::model::request::OptimizeType;
use serde::Deserialize;

/// picks the n-th item of a repeated-parameter list, or the item with
/// the highest index when fewer than n are present, or the default when
/// the list is empty. picked integers of `-1` and doubles of `-1.0` are
/// the "unspecified" sentinel and also yield the default.
pub fn pick<T: ParamValue>(values: &[T], n: usize, default: T) -> T {
    match pick_raw(values, n) {
        Some(value) if !value.is_unset() => value.clone(),
        _ => default,
    }
}

/// like [`pick`] but with no default: absent and sentinel values are
/// both `None`.
pub fn pick_opt<T: ParamValue>(values: &[T], n: usize) -> Option<T> {
    pick_raw(values, n).filter(|v| !v.is_unset()).cloned()
}

fn pick_raw<T>(values: &[T], n: usize) -> Option<&T> {
    if values.is_empty() {
        None
    } else {
        values.get(n.min(values.len() - 1))
    }
}

/// a value that may carry the "unspecified" sentinel.
pub trait ParamValue: Clone {
    fn is_unset(&self) -> bool {
        false
    }
}

impl ParamValue for i32 {
    fn is_unset(&self) -> bool {
        *self == -1
    }
}

impl ParamValue for i64 {
    fn is_unset(&self) -> bool {
        *self == -1
    }
}

impl ParamValue for f64 {
    fn is_unset(&self) -> bool {
        *self == -1.0
    }
}

impl ParamValue for bool {}
impl ParamValue for String {}
impl ParamValue for OptimizeType {}

/// one repeated-parameter list per recognized option, in the HTTP
/// layer's camel-case spelling.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestParams {
    pub from_place: Vec<String>,
    pub to_place: Vec<String>,
    /// shared across requests built from the same parameters, because
    /// the places themselves are an ordered list.
    pub intermediate_places: Vec<String>,
    pub date: Vec<String>,
    pub time: Vec<String>,
    pub arrive_by: Vec<bool>,
    pub wheelchair: Vec<bool>,
    pub max_walk_distance: Vec<f64>,
    pub max_pre_transit_time: Vec<i32>,
    pub walk_reluctance: Vec<f64>,
    pub wait_reluctance: Vec<f64>,
    pub wait_at_beginning_factor: Vec<f64>,
    pub walk_speed: Vec<f64>,
    pub bike_speed: Vec<f64>,
    pub bike_switch_time: Vec<i32>,
    pub bike_switch_cost: Vec<i32>,
    pub triangle_safety_factor: Vec<f64>,
    pub triangle_slope_factor: Vec<f64>,
    pub triangle_time_factor: Vec<f64>,
    pub optimize: Vec<OptimizeType>,
    pub mode: Vec<String>,
    pub min_transfer_time: Vec<i32>,
    pub num_itineraries: Vec<i32>,
    pub preferred_routes: Vec<String>,
    pub other_than_preferred_routes_penalty: Vec<i32>,
    pub preferred_agencies: Vec<String>,
    pub unpreferred_routes: Vec<String>,
    pub unpreferred_agencies: Vec<String>,
    pub show_intermediate_stops: Vec<bool>,
    pub walk_board_cost: Vec<i32>,
    pub bike_board_cost: Vec<i32>,
    pub banned_routes: Vec<String>,
    pub banned_agencies: Vec<String>,
    pub banned_trips: Vec<String>,
    pub banned_stops: Vec<String>,
    pub banned_stops_hard: Vec<String>,
    pub transfer_penalty: Vec<i32>,
    pub nonpreferred_transfer_penalty: Vec<i32>,
    pub max_transfers: Vec<i32>,
    pub batch: Vec<bool>,
    pub start_transit_stop_id: Vec<String>,
    pub start_transit_trip_id: Vec<String>,
    pub clamp_initial_wait: Vec<i64>,
    pub reverse_optimize_on_the_fly: Vec<bool>,
    pub board_slack: Vec<i32>,
    pub alight_slack: Vec<i32>,
    pub locale: Vec<String>,
    pub ignore_realtime_updates: Vec<bool>,
    pub disable_remaining_weight_heuristic: Vec<bool>,
    pub footway: Vec<bool>,
    pub permit_crossing: Vec<i32>,
    pub permit_bollard: Vec<i32>,
    pub permit_turnstile: Vec<i32>,
    pub permit_cycle_barrier: Vec<i32>,
    pub permit_traffic_light_sound: Vec<i32>,
    pub permit_traffic_light_vibration: Vec<i32>,
    pub permit_traffic_light_vibration_floor: Vec<i32>,
}
