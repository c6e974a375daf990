//! the per-edge traversal contract: admissibility, cost, and the
//! kiss-and-ride mode-switch policy. the search engine calls
//! [`StreetEdge::traverse`], which delegates here.

use crate::model::network::street_edge::GREENWAY_SAFETY_FACTOR;
use crate::model::network::{StreetEdge, StreetGraph, TraverseMode};
use crate::model::request::{OptimizeType, RoutingRequest};
use crate::model::state::{State, StateEditor};
use crate::model::traversal::slope_ops;
use std::sync::Arc;
use uom::si::length::meter;
use uom::si::time::second;
use uom::si::velocity::meter_per_second;

/// traverses `edge` from `s0`. yields no state when the edge is
/// inadmissible; kiss-and-ride trips may yield a two-state result chain.
pub fn traverse(edge: &StreetEdge, s0: &State, graph: &StreetGraph) -> Option<State> {
    let options = Arc::clone(s0.request());
    let curr_mode = s0.non_transit_mode();
    let editor = do_traverse(edge, s0, graph, &options, curr_mode);
    let state = editor.and_then(StateEditor::make_state);
    // kiss-and-ride mode transitions occur without the explicit loop
    // edges used in park-and-ride
    if options.kiss_and_ride {
        if options.arrive_by {
            // branch the search to an un-parked CAR state as soon as
            // transit has been used. the WALK check prevents infinite
            // recursion
            if s0.is_car_parked() && s0.is_ever_boarded() && curr_mode == TraverseMode::Walk {
                if let Some(mut editor) = do_traverse(edge, s0, graph, &options, TraverseMode::Car)
                {
                    // clearing the flag also switches the mode to CAR
                    editor.set_car_parked(false);
                    if let Some(mut fork_state) = editor.make_state() {
                        fork_state.add_to_existing_result_chain(state.map(Box::new));
                        // both the parked and the unparked state
                        return Some(fork_state);
                    }
                }
            }
        } else {
            // irrevocable transition from driving to walking; "parking"
            // means being dropped off here. the CAR check prevents
            // infinite recursion
            if !s0.is_car_parked()
                && !edge.permission().allows_mode(TraverseMode::Car)
                && curr_mode == TraverseMode::Car
            {
                if let Some(mut editor) = do_traverse(edge, s0, graph, &options, TraverseMode::Walk)
                {
                    // setting the flag switches to WALK and prevents
                    // further car use
                    editor.set_car_parked(true);
                    // only the "parked" walking state
                    return editor.make_state();
                }
            }
        }
    }
    state
}

/// the cost kernel. returns a StateEditor rather than a State so the
/// caller can make parking and mode-switch modifications before
/// committing.
fn do_traverse(
    edge: &StreetEdge,
    s0: &State,
    graph: &StreetGraph,
    options: &Arc<RoutingRequest>,
    traverse_mode: TraverseMode,
) -> Option<StateEditor> {
    let mut walking_bike = options.walking_bike;
    let mut back_walking_bike = s0.is_back_walking_bike();
    let back_mode = s0.back_mode();
    let back_edge = s0.back_edge().and_then(|id| graph.edge(id));

    if let Some(back) = back_edge {
        // no illegal U-turns. both edges get a chance to decide they
        // are the reverse of the other, and the guard holds in either
        // search direction
        if edge.is_reverse_of(back) || back.is_reverse_of(edge) {
            return None;
        }
    }

    // only actually walking counts as walking a bike
    back_walking_bike &= back_mode == Some(TraverseMode::Walk);
    walking_bike &= traverse_mode == TraverseMode::Walk;

    // if the street disallows the mode and we are biking, attempt to
    // walk the bike
    if !edge.can_traverse(options, traverse_mode) {
        if traverse_mode == TraverseMode::Bicycle {
            let walking_options =
                Arc::clone(options.bike_walking_options.as_ref().unwrap_or(options));
            return do_traverse(edge, s0, graph, &walking_options, TraverseMode::Walk);
        }
        return None;
    }

    let speed = edge
        .calculate_speed(options, Some(traverse_mode))
        .get::<meter_per_second>();
    let distance = edge.distance();
    let slope_speed_length = edge.slope_speed_effective_length().get::<meter>();
    let slope_work_length = edge.slope_work_cost_effective_length().get::<meter>();

    let mut time = distance / speed;
    let mut weight;
    if options.wheelchair_accessible {
        weight = slope_speed_length / speed;
    } else if traverse_mode == TraverseMode::Bicycle {
        time = slope_speed_length / speed;
        match options.optimize {
            OptimizeType::Safe => {
                weight = edge.bicycle_safety_factor() as f64 * distance / speed;
            }
            OptimizeType::Greenways => {
                weight = edge.bicycle_safety_factor() as f64 * distance / speed;
                if edge.bicycle_safety_factor() <= GREENWAY_SAFETY_FACTOR {
                    // greenways are treated as even safer than they are
                    weight *= 0.66;
                }
            }
            OptimizeType::Flat => {
                weight = distance / speed + slope_work_length;
            }
            OptimizeType::Quick => {
                weight = slope_speed_length / speed;
            }
            OptimizeType::Triangle => {
                let quick = slope_speed_length;
                let safety = edge.bicycle_safety_factor() as f64 * distance;
                let slope = slope_work_length;
                weight = quick * options.triangle_time_factor
                    + slope * options.triangle_slope_factor
                    + safety * options.triangle_safety_factor;
                weight /= speed;
            }
            OptimizeType::Transfers => {
                // normalized to QUICK during assembly; plain time as a
                // fallback
                weight = distance / speed;
            }
        }
    } else {
        if walking_bike {
            // take slopes into account when walking bikes
            time = slope_speed_length / speed;
        }
        weight = time;
        if traverse_mode == TraverseMode::Walk {
            // the slope cost table assumes the reference walking speed,
            // rescale to the traveler's
            let costs = slope_ops::walk_cost_for_slope(edge.length(), edge.max_slope());
            weight = costs.get::<second>() * (slope_ops::REFERENCE_WALK_SPEED / speed);
            // cost and time coincide in this model (check with
            // max_slope == 0)
            time = weight;
            weight *= accessibility_multiplier(edge, options);
        }
    }

    if edge.is_stairs() {
        weight *= options.stairs_reluctance;
    } else {
        // note: this is applied even when biking or driving
        weight *= options.walk_reluctance;
    }

    let mut s1 = s0.edit(edge);
    s1.set_back_mode(Some(traverse_mode));
    s1.set_back_walking_bike(walking_bike);

    /* compute turn cost */
    if let Some(back_pse) = back_edge {
        let state_options = s0.request();
        let back_options = if back_walking_bike {
            state_options
                .bike_walking_options
                .as_ref()
                .unwrap_or(state_options)
        } else {
            state_options
        };
        let back_speed = back_pse.calculate_speed(back_options, back_mode);

        // apply turn restrictions
        if options.arrive_by && !edge.can_turn_onto(back_pse, s0, back_mode, graph) {
            return None;
        } else if !options.arrive_by && !back_pse.can_turn_onto(edge, s0, Some(traverse_mode), graph)
        {
            return None;
        }

        // turn costs are evaluated on the turn *into* this edge going
        // forward and the turn *out of* it going backward, with the back
        // edge's mode and speed, so that costs sum identically over a
        // path in both directions
        let current_speed = edge.calculate_speed(options, Some(traverse_mode));
        let real_turn_cost = if options.arrive_by {
            match (graph.vertex(edge.to_vertex()), back_mode) {
                (Some(vertex), Some(mode)) if vertex.is_intersection() => {
                    back_options.intersection_cost_model.compute_traversal_cost(
                        vertex,
                        edge,
                        back_pse,
                        mode,
                        back_options,
                        current_speed,
                        back_speed,
                    )
                }
                _ => {
                    // a temporary edge not connected to an intersection
                    log::debug!("not computing turn cost for edge {edge}");
                    0.0
                }
            }
        } else {
            match graph.vertex(edge.from_vertex()) {
                Some(vertex) if vertex.is_intersection() => {
                    options.intersection_cost_model.compute_traversal_cost(
                        vertex,
                        back_pse,
                        edge,
                        traverse_mode,
                        options,
                        back_speed,
                        current_speed,
                    )
                }
                _ => {
                    log::debug!("not computing turn cost for edge {edge}");
                    0.0
                }
            }
        };

        if !traverse_mode.is_driving() {
            // just a tie-breaker
            s1.increment_walk_distance(real_turn_cost / 100.0);
        }
        let turn_time = real_turn_cost.ceil();
        time += turn_time;
        weight += options.turn_reluctance * real_turn_cost;
    }

    if (walking_bike || traverse_mode == TraverseMode::Bicycle)
        && !(back_walking_bike || back_mode == Some(TraverseMode::Bicycle))
    {
        s1.increment_time_seconds(options.bike_switch_time as i64);
        s1.increment_weight(options.bike_switch_cost as f64);
    }

    if !traverse_mode.is_driving() {
        s1.increment_walk_distance(edge.distance());
    }

    /* on the pre-kiss/pre-park leg, limit both walking and driving,
    either soft or hard */
    let rounded_time = time.ceil() as i32;
    if options.kiss_and_ride || options.park_and_ride {
        let pre_transit = if options.arrive_by {
            !s0.is_car_parked()
        } else {
            !s0.is_ever_boarded()
        };
        if pre_transit {
            s1.increment_pre_transit_time(rounded_time);
        }
        if s1.pre_transit_time_exceeded(options) {
            if options.soft_pre_transit_limiting {
                weight += overage_weight(
                    s0.pre_transit_time() as f64,
                    s1.pre_transit_time() as f64,
                    options.max_pre_transit_time as f64,
                    options.pre_transit_penalty,
                    options.pre_transit_overage_rate,
                );
            } else {
                return None;
            }
        }
    }

    /* a soft walk limit adds weight for the overage, a hard limit
    prunes the branch */
    if s1.walked_too_far(options) {
        if options.soft_walk_limiting {
            weight += overage_weight(
                s0.walk_distance(),
                s1.walk_distance(),
                options.max_walk_distance,
                options.soft_walk_penalty,
                options.soft_walk_overage_rate,
            );
        } else {
            log::debug!("too much walking, bailing");
            return None;
        }
    }

    s1.increment_time_seconds(rounded_time as i64);
    s1.increment_weight(weight);
    Some(s1)
}

/// composes the per-feature weight multipliers for a walked edge.
/// crossing-signal preferences apply only on crossing edges; bollards,
/// turnstiles, and cycle barriers apply independently.
pub fn accessibility_multiplier(edge: &StreetEdge, options: &RoutingRequest) -> f64 {
    let mut mult = 1.0;
    if edge.is_crossing() {
        mult *= options.permit_crossing.multiplier();
        if edge.has_traffic_light_sound() {
            mult *= options.permit_traffic_light_sound.multiplier();
        }
        if edge.has_traffic_light_vibration() {
            mult *= options.permit_traffic_light_vibration.multiplier();
        }
        if edge.has_traffic_light_floor_vibration() {
            mult *= options.permit_traffic_light_vibration_floor.multiplier();
        }
    }
    if edge.has_bollard() {
        mult *= options.permit_bollard.multiplier();
    }
    if edge.has_turnstile() {
        mult *= options.permit_turnstile.multiplier();
    }
    if edge.has_cycle_barrier() {
        mult *= options.permit_cycle_barrier.multiplier();
    }
    mult
}

/// weight penalty for stepping past a soft limit: the overage is billed
/// at `overage_rate`, plus `soft_penalty` once on the traversal that
/// crossed the limit.
pub(crate) fn overage_weight(
    first_value: f64,
    second_value: f64,
    max_value: f64,
    soft_penalty: f64,
    overage_rate: f64,
) -> f64 {
    let (apply_penalty, overage_value) = if first_value <= max_value && second_value > max_value {
        (true, second_value - max_value)
    } else {
        (false, second_value - first_value)
    };
    overage_rate * overage_value + if apply_penalty { soft_penalty } else { 0.0 }
}

#[cfg(test)]
mod test {
    use super::{accessibility_multiplier, overage_weight};
    use crate::model::network::{
        EdgeId, StreetEdge, StreetGraph, TraversalPermission, TraverseMode, TraverseModeSet,
        TurnRestriction, TurnRestrictionType, Vertex,
    };
    use crate::model::request::{FeaturePreference, OptimizeType, RoutingRequest};
    use crate::model::state::State;
    use crate::model::traversal::slope_ops;
    use std::sync::Arc;
    use uom::si::velocity::meter_per_second;

    const EPSILON: f64 = 1e-9;

    fn mock_graph(n_vertices: usize) -> StreetGraph {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut graph = StreetGraph::new(chrono_tz::America::New_York);
        for i in 0..n_vertices {
            graph.add_vertex(Vertex::intersection(i, i as f64 * 0.01, 0.0));
        }
        graph
    }

    fn add_edge(
        graph: &mut StreetGraph,
        from: usize,
        to: usize,
        length: f64,
        permission: TraversalPermission,
    ) -> EdgeId {
        let id = graph.next_edge_id();
        graph.add_edge(StreetEdge::new(
            id, from, to, None, "test st", length, permission, false,
        ))
    }

    fn walk_request() -> RoutingRequest {
        let mut request = RoutingRequest::default();
        request.set_modes(TraverseModeSet::of(&[TraverseMode::Walk]));
        request
    }

    fn origin(request: RoutingRequest) -> State {
        State::origin(0, 1_000_000, Arc::new(request))
    }

    /// the kernel's walking weight for a flat, featureless edge.
    fn expected_walk_weight(distance: f64, request: &RoutingRequest) -> f64 {
        let costs = distance / slope_ops::REFERENCE_WALK_SPEED;
        let speed = request.walk_speed.get::<meter_per_second>();
        costs * (slope_ops::REFERENCE_WALK_SPEED / speed) * request.walk_reluctance
    }

    #[test]
    fn test_plain_walk_traversal() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::ALL);
        let s0 = origin(walk_request());
        let edge = graph.edge(e0).expect("test invariant failed: edge missing");

        let s1 = edge.traverse(&s0, &graph).expect("traversal should succeed");

        let expected = expected_walk_weight(100.0, s0.request());
        assert!((s1.weight() - expected).abs() < EPSILON);
        assert_eq!(s1.walk_distance(), 100.0);
        // time advances by the rounded-up traversal seconds
        let raw_time = expected / s0.request().walk_reluctance;
        assert_eq!(
            s1.time_seconds(),
            1_000_000 + raw_time.ceil() as i64
        );
        assert_eq!(s1.back_mode(), Some(TraverseMode::Walk));
        assert_eq!(s1.vertex(), 1);
    }

    #[test]
    fn test_successor_never_regresses() {
        let mut graph = mock_graph(3);
        let e0 = add_edge(&mut graph, 0, 1, 42.0, TraversalPermission::ALL);
        let e1 = add_edge(&mut graph, 1, 2, 250.0, TraversalPermission::ALL);
        let s0 = origin(walk_request());
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("traversal should succeed");
        let s2 = graph
            .edge(e1)
            .expect("test invariant failed")
            .traverse(&s1, &graph)
            .expect("traversal should succeed");
        for (prev, next) in [(&s0, &s1), (&s1, &s2)] {
            assert!(next.weight() >= prev.weight());
            assert!(next.time_seconds() >= prev.time_seconds());
            assert!(next.walk_distance() >= prev.walk_distance());
        }
    }

    #[test]
    fn test_neutral_preferences_are_identity() {
        // an edge dense with features costs the same as a bare one when
        // every preference is neutral
        let mut graph = mock_graph(2);
        let bare = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::ALL);
        let loaded = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::ALL);
        {
            let edge = graph.edge_mut(loaded).expect("test invariant failed");
            edge.flags_mut().set_crossing(true);
            edge.flags_mut().set_bollard(true);
            edge.flags_mut().set_turnstile(true);
            edge.flags_mut().set_traffic_light_sound(true);
        }
        let s0 = origin(walk_request());
        let w_bare = graph
            .edge(bare)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("traversal should succeed")
            .weight();
        let w_loaded = graph
            .edge(loaded)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("traversal should succeed")
            .weight();
        assert!((w_bare - w_loaded).abs() < EPSILON);
    }

    #[test]
    fn test_crossing_with_sound_signal_disliked_quadruples_weight() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 80.0, TraversalPermission::ALL);
        {
            let edge = graph.edge_mut(e0).expect("test invariant failed");
            edge.flags_mut().set_crossing(true);
            edge.flags_mut().set_traffic_light_sound(true);
        }
        let mut request = walk_request();
        request.permit_crossing = FeaturePreference::Dislike;
        request.permit_traffic_light_sound = FeaturePreference::Dislike;
        let s0 = origin(request);
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("traversal should succeed");
        let baseline = expected_walk_weight(80.0, s0.request());
        assert!((s1.weight() - baseline * 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_multipliers_compose_multiplicatively() {
        // bollard disliked (x2), turnstile preferred (x0.5), cycle
        // barrier disliked (x2): expected product 2.0
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        {
            let edge = graph.edge_mut(e0).expect("test invariant failed");
            edge.flags_mut().set_bollard(true);
            edge.flags_mut().set_turnstile(true);
            edge.flags_mut().set_cycle_barrier(true);
        }
        let mut request = walk_request();
        request.permit_bollard = FeaturePreference::Dislike;
        request.permit_turnstile = FeaturePreference::Prefer;
        request.permit_cycle_barrier = FeaturePreference::Dislike;
        let s0 = origin(request);
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("traversal should succeed");
        let baseline = expected_walk_weight(60.0, s0.request());
        assert!((s1.weight() - baseline * 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_signal_preferences_ignored_off_crossings() {
        // a sound-signal preference has no effect on an edge that is
        // not a crossing
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        graph
            .edge_mut(e0)
            .expect("test invariant failed")
            .flags_mut()
            .set_traffic_light_sound(true);
        let mut request = walk_request();
        request.permit_traffic_light_sound = FeaturePreference::Dislike;
        let s0 = origin(request);
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("traversal should succeed");
        let baseline = expected_walk_weight(60.0, s0.request());
        assert!((s1.weight() - baseline).abs() < EPSILON);
    }

    #[test]
    fn test_forbidden_bollard_is_inadmissible() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        graph
            .edge_mut(e0)
            .expect("test invariant failed")
            .flags_mut()
            .set_bollard(true);
        let mut request = walk_request();
        request.permit_bollard = FeaturePreference::Forbid;
        let s0 = origin(request);
        assert!(graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .is_none());
    }

    #[test]
    fn test_footway_opt_out() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        graph
            .edge_mut(e0)
            .expect("test invariant failed")
            .flags_mut()
            .set_footway(true);
        // the prototype does not permit footways
        let s0 = origin(walk_request());
        assert!(graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .is_none());

        let mut permissive = walk_request();
        permissive.permit_footway = true;
        let s0 = origin(permissive);
        assert!(graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .is_some());
    }

    #[test]
    fn test_u_turn_guard() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        let e1 = add_edge(&mut graph, 1, 0, 60.0, TraversalPermission::ALL);
        let s0 = origin(walk_request());
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("outbound traversal should succeed");
        assert!(graph
            .edge(e1)
            .expect("test invariant failed")
            .traverse(&s1, &graph)
            .is_none());
    }

    #[test]
    fn test_stairs_use_stairs_reluctance() {
        let mut graph = mock_graph(2);
        let plain = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        let stairs = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        graph
            .edge_mut(stairs)
            .expect("test invariant failed")
            .flags_mut()
            .set_stairs(true);
        let mut request = walk_request();
        request.walk_reluctance = 2.0;
        request.stairs_reluctance = 3.0;
        let s0 = origin(request);
        let w_plain = graph
            .edge(plain)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("traversal should succeed")
            .weight();
        let w_stairs = graph
            .edge(stairs)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("traversal should succeed")
            .weight();
        assert!((w_stairs / w_plain - 1.5).abs() < EPSILON);
    }

    #[test]
    fn test_wheelchair_requirements() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        let mut request = walk_request();
        request.wheelchair_accessible = true;
        let s0 = origin(request);
        // accessible by default: admissible
        assert!(graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .is_some());
        // retagged inaccessible: rejected
        graph
            .edge_mut(e0)
            .expect("test invariant failed")
            .flags_mut()
            .set_wheelchair_accessible(false);
        assert!(graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .is_none());
    }

    #[test]
    fn test_wheelchair_slope_limit() {
        use crate::model::network::SlopeProfile;
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        graph
            .edge_mut(e0)
            .expect("test invariant failed")
            .set_slope_profile(Some(SlopeProfile {
                max_slope: 0.12,
                slope_speed_effective_length: 75.0,
                slope_work_cost_effective_length: 90.0,
            }));
        let mut request = walk_request();
        request.wheelchair_accessible = true;
        // the ADA default limit is steeper than 12%
        let s0 = origin(request);
        assert!(graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .is_none());
    }

    #[test]
    fn test_bicycle_optimize_branches() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::ALL);
        graph
            .edge_mut(e0)
            .expect("test invariant failed")
            .set_bicycle_safety_factor(0.05);

        let weight_for = |optimize: OptimizeType, factors: Option<(f64, f64, f64)>| {
            let mut request = RoutingRequest::default();
            request.set_modes(TraverseModeSet::of(&[
                TraverseMode::Bicycle,
                TraverseMode::Walk,
            ]));
            request.set_optimize(optimize);
            if let Some((safety, slope, time)) = factors {
                request.set_triangle_factors(safety, slope, time);
            }
            let s0 = origin(request);
            graph
                .edge(e0)
                .expect("test invariant failed")
                .traverse(&s0, &graph)
                .expect("traversal should succeed")
                .weight()
        };

        // bike speed 5 m/s, walk reluctance 2.0 applies across the board;
        // the safety factor is stored in single precision
        let safety_factor = 0.05f32 as f64;
        let quick = weight_for(OptimizeType::Quick, None);
        assert!((quick - (100.0 / 5.0) * 2.0).abs() < EPSILON);

        let safe = weight_for(OptimizeType::Safe, None);
        assert!((safe - (safety_factor * 100.0 / 5.0) * 2.0).abs() < EPSILON);

        // safety factor 0.05 marks a greenway, which gets the 0.66 bonus
        let greenways = weight_for(OptimizeType::Greenways, None);
        assert!((greenways - safe * 0.66).abs() < EPSILON);

        let flat = weight_for(OptimizeType::Flat, None);
        assert!((flat - (100.0 / 5.0 + 100.0) * 2.0).abs() < EPSILON);

        let triangle = weight_for(OptimizeType::Triangle, Some((0.3, 0.2, 0.5)));
        let expected = (100.0 * 0.5 + 100.0 * 0.2 + safety_factor * 100.0 * 0.3) / 5.0 * 2.0;
        assert!((triangle - expected).abs() < EPSILON);
    }

    #[test]
    fn test_bicycle_walks_bike_where_riding_is_banned() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::PEDESTRIAN);
        let mut request = RoutingRequest::default();
        request.set_modes(TraverseModeSet::of(&[
            TraverseMode::Bicycle,
            TraverseMode::Walk,
        ]));
        let s0 = origin(request);
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("should fall back to walking the bike");
        assert_eq!(s1.back_mode(), Some(TraverseMode::Walk));
        assert!(s1.is_back_walking_bike());
    }

    #[test]
    fn test_bike_switch_cost_applies_once() {
        let mut graph = mock_graph(3);
        let e0 = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::ALL);
        let e1 = add_edge(&mut graph, 1, 2, 100.0, TraversalPermission::ALL);
        let mut request = RoutingRequest::default();
        request.bike_switch_time = 10;
        request.bike_switch_cost = 100;
        request.set_modes(TraverseModeSet::of(&[
            TraverseMode::Bicycle,
            TraverseMode::Walk,
        ]));
        let s0 = origin(request);
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("traversal should succeed");
        // mounting the bike pays the switch cost
        let base = (100.0_f64 / 5.0) * 2.0;
        assert!((s1.weight() - (base + 100.0)).abs() < EPSILON);
        assert_eq!(s1.time_seconds() - s0.time_seconds(), 20 + 10);

        // continuing by bike does not pay again
        let s2 = graph
            .edge(e1)
            .expect("test invariant failed")
            .traverse(&s1, &graph)
            .expect("traversal should succeed");
        let delta = s2.weight() - s1.weight();
        // second edge adds base weight plus a turn cost, but no switch fee
        assert!(delta < base + 100.0);
    }

    #[test]
    fn test_turn_restriction_no_turn() {
        let mut graph = mock_graph(3);
        let e0 = add_edge(&mut graph, 0, 1, 50.0, TraversalPermission::ALL);
        let e1 = add_edge(&mut graph, 1, 2, 50.0, TraversalPermission::ALL);
        graph.add_turn_restriction(TurnRestriction::always(
            TurnRestrictionType::NoTurn,
            e0,
            e1,
            TraverseModeSet::of(&[TraverseMode::Walk]),
        ));
        let s0 = origin(walk_request());
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("first edge should traverse");
        assert!(graph
            .edge(e1)
            .expect("test invariant failed")
            .traverse(&s1, &graph)
            .is_none());
    }

    #[test]
    fn test_turn_restriction_only_turn() {
        let mut graph = mock_graph(4);
        let e0 = add_edge(&mut graph, 0, 1, 50.0, TraversalPermission::ALL);
        let e1 = add_edge(&mut graph, 1, 2, 50.0, TraversalPermission::ALL);
        let e2 = add_edge(&mut graph, 1, 3, 50.0, TraversalPermission::ALL);
        graph.add_turn_restriction(TurnRestriction::always(
            TurnRestrictionType::OnlyTurn,
            e0,
            e1,
            TraverseModeSet::of(&[TraverseMode::Walk]),
        ));
        let s0 = origin(walk_request());
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("first edge should traverse");
        // the mandated continuation is open, the other is not
        assert!(graph
            .edge(e1)
            .expect("test invariant failed")
            .traverse(&s1, &graph)
            .is_some());
        assert!(graph
            .edge(e2)
            .expect("test invariant failed")
            .traverse(&s1, &graph)
            .is_none());
    }

    #[test]
    fn test_turn_restriction_ignores_other_modes() {
        let mut graph = mock_graph(3);
        let e0 = add_edge(&mut graph, 0, 1, 50.0, TraversalPermission::ALL);
        let e1 = add_edge(&mut graph, 1, 2, 50.0, TraversalPermission::ALL);
        graph.add_turn_restriction(TurnRestriction::always(
            TurnRestrictionType::NoTurn,
            e0,
            e1,
            TraverseModeSet::of(&[TraverseMode::Car]),
        ));
        let s0 = origin(walk_request());
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("first edge should traverse");
        assert!(graph
            .edge(e1)
            .expect("test invariant failed")
            .traverse(&s1, &graph)
            .is_some());
    }

    #[test]
    fn test_soft_walk_limit_adds_overage() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::ALL);
        let mut request = walk_request();
        request.max_walk_distance = 50.0;
        let s0 = origin(request);
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("soft limiting should not prune");
        let baseline = expected_walk_weight(100.0, s0.request());
        // stepping over the limit bills the 50m overage and the penalty
        let overage = (100.0 - 50.0) * s0.request().soft_walk_overage_rate
            + s0.request().soft_walk_penalty;
        assert!((s1.weight() - (baseline + overage)).abs() < EPSILON);
    }

    #[test]
    fn test_hard_walk_limit_prunes() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::ALL);
        let mut request = walk_request();
        request.max_walk_distance = 50.0;
        request.soft_walk_limiting = false;
        let s0 = origin(request);
        assert!(graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .is_none());
    }

    #[test]
    fn test_overage_weight_formula() {
        // crossing the limit: overage past the max plus the penalty
        assert_eq!(overage_weight(40.0, 110.0, 100.0, 60.0, 5.0), 110.0);
        // already over the limit: the full step is billed, no new penalty
        assert_eq!(overage_weight(110.0, 130.0, 100.0, 60.0, 5.0), 100.0);
    }

    #[test]
    fn test_pre_transit_hard_limit() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 1000.0, TraversalPermission::ALL);
        let mut request = RoutingRequest::default();
        request.kiss_and_ride = true;
        request.max_pre_transit_time = 5;
        request.soft_pre_transit_limiting = false;
        request.set_modes(TraverseModeSet::of(&[
            TraverseMode::Car,
            TraverseMode::Walk,
            TraverseMode::Transit,
        ]));
        let s0 = origin(request);
        // 1000m at the default edge car speed takes ~90s, far past 5s
        assert!(graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .is_none());
    }

    #[test]
    fn test_pre_transit_soft_limit_adds_overage() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 1000.0, TraversalPermission::ALL);
        let mut request = RoutingRequest::default();
        request.kiss_and_ride = true;
        request.max_pre_transit_time = 5;
        request.set_modes(TraverseModeSet::of(&[
            TraverseMode::Car,
            TraverseMode::Walk,
            TraverseMode::Transit,
        ]));
        let s0 = origin(request);
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("soft limiting should not prune");
        let rounded_time = (1000.0 / graph
            .edge(e0)
            .expect("test invariant failed")
            .car_speed() as f64)
            .ceil();
        let expected_overage = (rounded_time - 5.0) * s0.request().pre_transit_overage_rate
            + s0.request().pre_transit_penalty;
        // driving weight: time scaled by walk reluctance, plus overage
        let base = (1000.0 / graph
            .edge(e0)
            .expect("test invariant failed")
            .car_speed() as f64)
            * s0.request().walk_reluctance;
        assert!((s1.weight() - (base + expected_overage)).abs() < EPSILON);
        assert_eq!(s1.pre_transit_time(), rounded_time as i32);
    }

    #[test]
    fn test_kiss_and_ride_arrive_by_fork() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::ALL);
        let mut request = RoutingRequest::default();
        request.arrive_by = true;
        request.kiss_and_ride = true;
        request.set_modes(TraverseModeSet::of(&[
            TraverseMode::Car,
            TraverseMode::Walk,
            TraverseMode::Transit,
        ]));
        let mut s0 = origin(request);
        assert!(s0.is_car_parked());
        s0.ever_boarded = true;

        let result = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("fork should yield a state");

        // the chain head is the un-parked car branch, the walking state
        // rides along behind it
        assert_eq!(result.result_chain_len(), 2);
        assert!(!result.is_car_parked());
        assert_eq!(result.back_mode(), Some(TraverseMode::Car));
        let walking = result.next_result().expect("chain should hold two states");
        assert!(walking.is_car_parked());
        assert_eq!(walking.back_mode(), Some(TraverseMode::Walk));
    }

    #[test]
    fn test_kiss_and_ride_arrive_by_fork_requires_boarding() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::ALL);
        let mut request = RoutingRequest::default();
        request.arrive_by = true;
        request.kiss_and_ride = true;
        request.set_modes(TraverseModeSet::of(&[
            TraverseMode::Car,
            TraverseMode::Walk,
            TraverseMode::Transit,
        ]));
        let s0 = origin(request);
        let result = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("plain traversal should still succeed");
        assert_eq!(result.result_chain_len(), 1);
        assert_eq!(result.back_mode(), Some(TraverseMode::Walk));
    }

    #[test]
    fn test_kiss_and_ride_depart_after_switch_is_irrevocable() {
        let mut graph = mock_graph(3);
        let e0 = add_edge(&mut graph, 0, 1, 100.0, TraversalPermission::PEDESTRIAN);
        let e1 = add_edge(&mut graph, 1, 2, 100.0, TraversalPermission::ALL);
        let mut request = RoutingRequest::default();
        request.kiss_and_ride = true;
        request.set_modes(TraverseModeSet::of(&[
            TraverseMode::Car,
            TraverseMode::Walk,
            TraverseMode::Transit,
        ]));
        let s0 = origin(request);
        assert_eq!(s0.non_transit_mode(), TraverseMode::Car);

        // the car cannot use the footpath, so the traveler is dropped off
        let s1 = graph
            .edge(e0)
            .expect("test invariant failed")
            .traverse(&s0, &graph)
            .expect("drop-off should yield a walking state");
        assert!(s1.is_car_parked());
        assert_eq!(s1.back_mode(), Some(TraverseMode::Walk));
        assert_eq!(s1.result_chain_len(), 1);

        // even on a drivable edge, the mode stays WALK
        assert_eq!(s1.non_transit_mode(), TraverseMode::Walk);
        let s2 = graph
            .edge(e1)
            .expect("test invariant failed")
            .traverse(&s1, &graph)
            .expect("walking onward should succeed");
        assert_eq!(s2.back_mode(), Some(TraverseMode::Walk));
    }

    #[test]
    fn test_accessibility_multiplier_is_stateless() {
        let mut graph = mock_graph(2);
        let e0 = add_edge(&mut graph, 0, 1, 60.0, TraversalPermission::ALL);
        graph
            .edge_mut(e0)
            .expect("test invariant failed")
            .flags_mut()
            .set_bollard(true);
        let request = walk_request();
        let edge = graph.edge(e0).expect("test invariant failed");
        let once = accessibility_multiplier(edge, &request);
        let twice = accessibility_multiplier(edge, &request);
        assert_eq!(once, 1.0);
        assert_eq!(once, twice);
    }
}
