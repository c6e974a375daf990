//! builds an immutable RoutingRequest from the repeated-parameter
//! record: clones the process-wide prototype, overlays each recognized
//! option, and cross-validates.

use crate::assembly::banned_trips::make_banned_trip_map;
use crate::assembly::datetime::resolve_date_time;
use crate::assembly::error::ParameterError;
use crate::assembly::params::{pick, pick_opt, RequestParams};
use chrono::{DateTime, Utc};
use curbside_core::model::network::{FeedScopedId, StreetGraph};
use curbside_core::model::request::{
    FeaturePreference, Locale, OptimizeType, QualifiedModeSet, RoutingRequest,
};
use std::str::FromStr;
use uom::si::f64::Velocity;
use uom::si::velocity::meter_per_second;

const DEFAULT_MODES: &str = "TRANSIT,WALK";

/// slower bike speed for bike sharing, meters per second.
const BIKE_RENTAL_SPEED: f64 = 4.3;

/// a request counts as planned for "now" within this window, enabling
/// live rental availability data.
const NOW_THRESHOLD_MILLIS: i64 = 15 * 60 * 60 * 1000;

/// builds the n-th request from the parameter lists against the wall
/// clock. several requests can be built from the same query by
/// re-specifying only the parameters that change between them.
pub fn assemble(
    params: &RequestParams,
    n: usize,
    prototype: &RoutingRequest,
    graph: &StreetGraph,
) -> Result<RoutingRequest, ParameterError> {
    assemble_at(params, n, prototype, graph, Utc::now())
}

/// like [`assemble`] with an explicit clock.
pub fn assemble_at(
    params: &RequestParams,
    n: usize,
    prototype: &RoutingRequest,
    graph: &StreetGraph,
    now: DateTime<Utc>,
) -> Result<RoutingRequest, ParameterError> {
    let mut request = prototype.clone();

    if let Some(from_place) = pick_opt(&params.from_place, n) {
        request.from_place = Some(from_place);
    }
    if let Some(to_place) = pick_opt(&params.to_place, n) {
        request.to_place = Some(to_place);
    }

    {
        let date = pick_opt(&params.date, n);
        let time = pick_opt(&params.time, n);
        request.date_time = resolve_date_time(
            date.as_deref(),
            time.as_deref(),
            graph.time_zone(),
            now,
        );
    }

    request.permit_crossing = pick_preference(&params.permit_crossing, n, request.permit_crossing);
    request.permit_bollard = pick_preference(&params.permit_bollard, n, request.permit_bollard);
    request.permit_cycle_barrier =
        pick_preference(&params.permit_cycle_barrier, n, request.permit_cycle_barrier);
    request.permit_turnstile =
        pick_preference(&params.permit_turnstile, n, request.permit_turnstile);
    request.permit_traffic_light_sound = pick_preference(
        &params.permit_traffic_light_sound,
        n,
        request.permit_traffic_light_sound,
    );
    request.permit_traffic_light_vibration = pick_preference(
        &params.permit_traffic_light_vibration,
        n,
        request.permit_traffic_light_vibration,
    );
    request.permit_traffic_light_vibration_floor = pick_preference(
        &params.permit_traffic_light_vibration_floor,
        n,
        request.permit_traffic_light_vibration_floor,
    );

    request.permit_footway = pick(&params.footway, n, request.permit_footway);
    request.wheelchair_accessible = pick(&params.wheelchair, n, request.wheelchair_accessible);
    request.num_itineraries = pick(&params.num_itineraries, n, request.num_itineraries);
    request.max_walk_distance = pick(&params.max_walk_distance, n, request.max_walk_distance);
    request.max_pre_transit_time =
        pick(&params.max_pre_transit_time, n, request.max_pre_transit_time);
    request.walk_reluctance = pick(&params.walk_reluctance, n, request.walk_reluctance);
    request.wait_reluctance = pick(&params.wait_reluctance, n, request.wait_reluctance);
    request.wait_at_beginning_factor = pick(
        &params.wait_at_beginning_factor,
        n,
        request.wait_at_beginning_factor,
    );
    if let Some(walk_speed) = pick_opt(&params.walk_speed, n) {
        request.walk_speed = Velocity::new::<meter_per_second>(walk_speed);
    }
    // whether the bike speed was actually supplied matters again below,
    // when rental mode applies its own default
    let bike_speed_param = pick_opt(&params.bike_speed, n);
    if let Some(bike_speed) = bike_speed_param {
        request.bike_speed = Velocity::new::<meter_per_second>(bike_speed);
    }
    request.bike_switch_time = pick(&params.bike_switch_time, n, request.bike_switch_time);
    request.bike_switch_cost = pick(&params.bike_switch_cost, n, request.bike_switch_cost);

    let mut opt = pick(&params.optimize, n, request.optimize);
    {
        let tsafe = pick_opt(&params.triangle_safety_factor, n);
        let tslope = pick_opt(&params.triangle_slope_factor, n);
        let ttime = pick_opt(&params.triangle_time_factor, n);
        if tsafe.is_some() || tslope.is_some() || ttime.is_some() {
            let (tsafe, tslope, ttime) = match (tsafe, tslope, ttime) {
                (Some(tsafe), Some(tslope), Some(ttime)) => (tsafe, tslope, ttime),
                _ => return Err(ParameterError::UnderspecifiedTriangle),
            };
            // the effective optimize type, supplied or inherited from
            // the prototype, must already be TRIANGLE
            if opt != OptimizeType::Triangle {
                return Err(ParameterError::TriangleOptimizeTypeNotSet);
            }
            if (tsafe + tslope + ttime - 1.0).abs() > f64::EPSILON * 3.0 {
                return Err(ParameterError::TriangleNotAffine);
            }
            request.triangle_safety_factor = tsafe;
            request.triangle_slope_factor = tslope;
            request.triangle_time_factor = ttime;
        } else if opt == OptimizeType::Triangle {
            return Err(ParameterError::TriangleValuesNotSet);
        }
    }

    request.arrive_by = pick(&params.arrive_by, n, false);
    request.show_intermediate_stops = pick(
        &params.show_intermediate_stops,
        n,
        request.show_intermediate_stops,
    );
    // intermediate places and their ordering are shared because they
    // are themselves a list
    if !params.intermediate_places.is_empty() && !params.intermediate_places[0].is_empty() {
        request.intermediate_places = params.intermediate_places.clone();
    }

    if let Some(raw) = pick_opt(&params.preferred_routes, n) {
        request.preferred_routes = split_csv(&raw);
    }
    request.other_than_preferred_routes_penalty = pick(
        &params.other_than_preferred_routes_penalty,
        n,
        request.other_than_preferred_routes_penalty,
    );
    if let Some(raw) = pick_opt(&params.preferred_agencies, n) {
        request.preferred_agencies = split_csv(&raw);
    }
    if let Some(raw) = pick_opt(&params.unpreferred_routes, n) {
        request.unpreferred_routes = split_csv(&raw);
    }
    if let Some(raw) = pick_opt(&params.unpreferred_agencies, n) {
        request.unpreferred_agencies = split_csv(&raw);
    }
    request.walk_board_cost = pick(&params.walk_board_cost, n, request.walk_board_cost);
    request.bike_board_cost = pick(&params.bike_board_cost, n, request.bike_board_cost);
    if let Some(raw) = pick_opt(&params.banned_routes, n) {
        request.banned_routes = split_csv(&raw);
    }
    if let Some(raw) = pick_opt(&params.banned_agencies, n) {
        request.banned_agencies = split_csv(&raw);
    }
    if let Some(raw) = pick_opt(&params.banned_trips, n) {
        request.banned_trips = make_banned_trip_map(&raw);
    }
    if let Some(raw) = pick_opt(&params.banned_stops, n) {
        request.banned_stops = parse_scoped_id_list(&raw);
    }
    if let Some(raw) = pick_opt(&params.banned_stops_hard, n) {
        request.banned_stops_hard = parse_scoped_id_list(&raw);
    }

    // "least transfers" is accomplished via an increased transfer
    // penalty
    if opt == OptimizeType::Transfers {
        opt = OptimizeType::Quick;
        request.transfer_penalty = pick(&params.transfer_penalty, n, 0) + 1800;
    } else {
        request.transfer_penalty = pick(&params.transfer_penalty, n, request.transfer_penalty);
    }
    request.batch = pick(&params.batch, n, request.batch);
    request.set_optimize(opt);

    // mode qualifiers carry the park/kiss/rental flags; the first
    // occurrence applies to every request built from this query
    let modes_raw = params
        .mode
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODES.to_string());
    match QualifiedModeSet::from_str(&modes_raw) {
        Ok(mode_set) => mode_set.apply_to_request(&mut request),
        Err(e) => {
            log::warn!("unrecognized mode list '{modes_raw}' ({e}), keeping prototype modes");
            let prototype_modes = request.modes;
            request.set_modes(prototype_modes);
        }
    }

    if request.allow_bike_rental && bike_speed_param.is_none() {
        request.bike_speed = Velocity::new::<meter_per_second>(BIKE_RENTAL_SPEED);
    }

    request.board_slack = pick(&params.board_slack, n, request.board_slack);
    request.alight_slack = pick(&params.alight_slack, n, request.alight_slack);
    request.transfer_slack = pick(&params.min_transfer_time, n, request.transfer_slack);
    request.nonpreferred_transfer_penalty = pick(
        &params.nonpreferred_transfer_penalty,
        n,
        request.nonpreferred_transfer_penalty,
    );

    if request.board_slack + request.alight_slack > request.transfer_slack {
        return Err(ParameterError::SlackInvariantViolated);
    }

    request.max_transfers = pick(&params.max_transfers, n, request.max_transfers);

    let trip_planned_for_now =
        (request.date_time * 1000 - now.timestamp_millis()).abs() < NOW_THRESHOLD_MILLIS;
    request.use_bike_rental_availability_information = trip_planned_for_now;

    let start_stop_raw = pick(
        &params.start_transit_stop_id,
        n,
        FeedScopedId::convert_to_string(request.starting_transit_stop_id.as_ref()),
    );
    if !start_stop_raw.is_empty() {
        match FeedScopedId::convert_from_string(&start_stop_raw) {
            Some(id) => request.starting_transit_stop_id = Some(id),
            None => log::warn!("ignoring malformed starting transit stop id '{start_stop_raw}'"),
        }
    }
    let start_trip_raw = pick(
        &params.start_transit_trip_id,
        n,
        FeedScopedId::convert_to_string(request.starting_transit_trip_id.as_ref()),
    );
    if !start_trip_raw.is_empty() {
        match FeedScopedId::convert_from_string(&start_trip_raw) {
            Some(id) => request.starting_transit_trip_id = Some(id),
            None => log::warn!("ignoring malformed starting transit trip id '{start_trip_raw}'"),
        }
    }

    request.clamp_initial_wait = pick(&params.clamp_initial_wait, n, request.clamp_initial_wait);
    request.reverse_optimize_on_the_fly = pick(
        &params.reverse_optimize_on_the_fly,
        n,
        request.reverse_optimize_on_the_fly,
    );
    request.ignore_realtime_updates = pick(
        &params.ignore_realtime_updates,
        n,
        request.ignore_realtime_updates,
    );
    request.disable_remaining_weight_heuristic = pick(
        &params.disable_remaining_weight_heuristic,
        n,
        request.disable_remaining_weight_heuristic,
    );

    let locale_spec = pick(&params.locale, n, "en".to_string());
    request.locale = Locale::from_spec(&locale_spec);

    Ok(request)
}

fn pick_preference(values: &[i32], n: usize, default: FeaturePreference) -> FeaturePreference {
    FeaturePreference::from_value(pick(values, n, default.value()))
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_scoped_id_list(raw: &str) -> Vec<FeedScopedId> {
    split_csv(raw)
        .iter()
        .filter_map(|part| {
            let parsed = FeedScopedId::convert_from_string(part);
            if parsed.is_none() {
                log::warn!("ignoring malformed agency-scoped id '{part}'");
            }
            parsed
        })
        .collect()
}
