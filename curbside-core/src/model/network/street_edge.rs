use crate::model::network::{
    EdgeFlags, EdgeId, StreetClass, StreetGraph, TraversalPermission, TraverseMode,
    TraverseModeSet, TurnRestrictionType, VertexId,
};
use crate::model::request::RoutingRequest;
use crate::model::state::State;
use crate::model::traversal::traversal_ops;
use crate::util::azimuth_ops;
use geo::LineString;
use std::fmt::Display;
use std::sync::Arc;
use uom::si::f64::{Length, Velocity};
use uom::si::length::meter;
use uom::si::velocity::meter_per_second;

/// bicycle safety factors at or below this threshold mark a greenway.
pub const GREENWAY_SAFETY_FACTOR: f32 = 0.1;

/// fallback automobile speed in meters per second.
pub const DEFAULT_CAR_SPEED: f32 = 11.2;

/// elevation-derived lengths attached by the graph loader. absent on
/// edges without an elevation profile, in which case the plain length
/// stands in for both effective lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeProfile {
    pub max_slope: f32,
    /// meters, adjusted for the speed impact of slope.
    pub slope_speed_effective_length: f64,
    /// meters, adjusted for the energy cost of slope.
    pub slope_work_cost_effective_length: f64,
}

/// a street segment.
///
/// length is stored as 32-bit fixed-point millimeters, which allows
/// edges of up to ~2100km; distances exposed outside this struct are
/// double-precision meters. angles are stored as signed-byte brads.
#[derive(Debug, Clone)]
pub struct StreetEdge {
    edge_id: EdgeId,
    from_vertex: VertexId,
    to_vertex: VertexId,
    length_mm: i32,
    bicycle_safety_factor: f32,
    permission: TraversalPermission,
    car_speed: f32,
    in_angle: i8,
    out_angle: i8,
    street_class: StreetClass,
    geometry: Option<Arc<LineString<f64>>>,
    name: String,
    flags: EdgeFlags,
    slope_profile: Option<SlopeProfile>,
    /// for temporary edges: the graph edge this edge stands in for.
    parent_edge: Option<EdgeId>,
}

impl StreetEdge {
    pub fn new(
        edge_id: EdgeId,
        from_vertex: VertexId,
        to_vertex: VertexId,
        geometry: Option<LineString<f64>>,
        name: &str,
        length_meters: f64,
        permission: TraversalPermission,
        back: bool,
    ) -> StreetEdge {
        let mut flags = EdgeFlags::empty();
        flags.set_back(back);
        // accessible by default
        flags.set_wheelchair_accessible(true);
        let (in_angle, out_angle) = match &geometry {
            Some(g) => compute_angles(g),
            None => (0, 0),
        };
        StreetEdge {
            edge_id,
            from_vertex,
            to_vertex,
            length_mm: (length_meters * 1000.0) as i32,
            bicycle_safety_factor: 1.0,
            permission,
            car_speed: DEFAULT_CAR_SPEED,
            in_angle,
            out_angle,
            street_class: StreetClass::default(),
            geometry: geometry.map(Arc::new),
            name: name.to_string(),
            flags,
            slope_profile: None,
            parent_edge: None,
        }
    }

    pub fn edge_id(&self) -> EdgeId {
        self.edge_id
    }

    pub fn from_vertex(&self) -> VertexId {
        self.from_vertex
    }

    pub fn to_vertex(&self) -> VertexId {
        self.to_vertex
    }

    /// length in meters.
    pub fn distance(&self) -> f64 {
        self.length_mm as f64 / 1000.0
    }

    pub fn length(&self) -> Length {
        Length::new::<meter>(self.distance())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn permission(&self) -> TraversalPermission {
        self.permission
    }

    pub fn set_permission(&mut self, permission: TraversalPermission) {
        self.permission = permission;
    }

    pub fn street_class(&self) -> StreetClass {
        self.street_class
    }

    pub fn set_street_class(&mut self, street_class: StreetClass) {
        self.street_class = street_class;
    }

    /// automobile traversal speed in meters per second.
    pub fn car_speed(&self) -> f32 {
        self.car_speed
    }

    pub fn set_car_speed(&mut self, car_speed: f32) {
        self.car_speed = car_speed;
    }

    pub fn bicycle_safety_factor(&self) -> f32 {
        self.bicycle_safety_factor
    }

    pub fn set_bicycle_safety_factor(&mut self, factor: f32) {
        self.bicycle_safety_factor = factor;
    }

    pub fn geometry(&self) -> Option<&LineString<f64>> {
        self.geometry.as_deref()
    }

    /// reuses the reversed twin's geometry allocation when the two are
    /// coordinate-equal.
    pub fn share_geometry(&mut self, reversed: &StreetEdge) {
        let shared = match (&self.geometry, &reversed.geometry) {
            (Some(own), Some(theirs)) if own == theirs => Some(Arc::clone(theirs)),
            _ => None,
        };
        match shared {
            Some(geometry) => self.geometry = Some(geometry),
            None => log::warn!("can't share geometry between {self} and {reversed}"),
        }
    }

    pub fn parent_edge(&self) -> Option<EdgeId> {
        self.parent_edge
    }

    pub fn set_parent_edge(&mut self, parent: Option<EdgeId>) {
        self.parent_edge = parent;
    }

    pub fn flags(&self) -> &EdgeFlags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut EdgeFlags {
        &mut self.flags
    }

    pub fn is_back(&self) -> bool {
        self.flags.is_back()
    }

    pub fn is_roundabout(&self) -> bool {
        self.flags.is_roundabout()
    }

    pub fn is_stairs(&self) -> bool {
        self.flags.is_stairs()
    }

    pub fn is_wheelchair_accessible(&self) -> bool {
        self.flags.is_wheelchair_accessible()
    }

    pub fn is_footway(&self) -> bool {
        self.flags.is_footway()
    }

    pub fn is_crossing(&self) -> bool {
        self.flags.is_crossing()
    }

    pub fn has_bollard(&self) -> bool {
        self.flags.has_bollard()
    }

    pub fn has_turnstile(&self) -> bool {
        self.flags.has_turnstile()
    }

    pub fn has_cycle_barrier(&self) -> bool {
        self.flags.has_cycle_barrier()
    }

    pub fn has_traffic_light_sound(&self) -> bool {
        self.flags.has_traffic_light_sound()
    }

    pub fn has_traffic_light_vibration(&self) -> bool {
        self.flags.has_traffic_light_vibration()
    }

    pub fn has_traffic_light_floor_vibration(&self) -> bool {
        self.flags.has_traffic_light_floor_vibration()
    }

    pub fn max_slope(&self) -> f32 {
        self.slope_profile.map(|p| p.max_slope).unwrap_or(0.0)
    }

    pub fn slope_speed_effective_length(&self) -> Length {
        match self.slope_profile {
            Some(p) => Length::new::<meter>(p.slope_speed_effective_length),
            None => self.length(),
        }
    }

    pub fn slope_work_cost_effective_length(&self) -> Length {
        match self.slope_profile {
            Some(p) => Length::new::<meter>(p.slope_work_cost_effective_length),
            None => self.length(),
        }
    }

    pub fn set_slope_profile(&mut self, profile: Option<SlopeProfile>) {
        self.slope_profile = profile;
    }

    /// azimuth of the first segment in integer degrees. the encoding
    /// maps a half-turn to -180 rather than +180; the serialized form
    /// depends on that wrap.
    pub fn in_angle(&self) -> i32 {
        self.in_angle as i32 * 180 / 128
    }

    /// azimuth of the last segment in integer degrees, encoded like
    /// `in_angle`.
    pub fn out_angle(&self) -> i32 {
        self.out_angle as i32 * 180 / 128
    }

    /// speed for traversing this edge with the given mode, in the
    /// orientation the search uses: driving reads the edge, everything
    /// else reads the request.
    pub fn calculate_speed(
        &self,
        request: &RoutingRequest,
        mode: Option<TraverseMode>,
    ) -> Velocity {
        match mode {
            None => Velocity::new::<meter_per_second>(f64::NAN),
            Some(m) if m.is_driving() => Velocity::new::<meter_per_second>(self.car_speed as f64),
            Some(m) => request.speed(m),
        }
    }

    pub fn can_traverse_set(&self, modes: &TraverseModeSet) -> bool {
        self.permission.allows_set(modes)
    }

    /// mode-set admissibility used by the search frontier.
    pub fn can_traverse_request(&self, request: &RoutingRequest) -> bool {
        if request.wheelchair_accessible {
            if !self.is_wheelchair_accessible() {
                return false;
            }
            if self.max_slope() as f64 > request.max_slope {
                return false;
            }
        }
        self.can_traverse_set(&request.modes)
    }

    /// single-mode admissibility: wheelchair and slope limits, footway
    /// opt-out, forbidden accessibility features, mode permission.
    pub fn can_traverse(&self, request: &RoutingRequest, mode: TraverseMode) -> bool {
        if request.wheelchair_accessible {
            if !self.is_wheelchair_accessible() {
                return false;
            }
            if self.max_slope() as f64 > request.max_slope {
                return false;
            }
        }

        if !request.permit_footway && self.is_footway() {
            return false;
        }

        if (request.permit_crossing.forbids() && self.is_crossing())
            || (request.permit_bollard.forbids() && self.has_bollard())
            || (request.permit_cycle_barrier.forbids() && self.has_cycle_barrier())
            || (request.permit_turnstile.forbids() && self.has_turnstile())
            || (request.permit_traffic_light_sound.forbids() && self.has_traffic_light_sound())
            || (request.permit_traffic_light_vibration.forbids()
                && self.has_traffic_light_vibration())
            || (request.permit_traffic_light_vibration_floor.forbids()
                && self.has_traffic_light_floor_vibration())
        {
            return false;
        }

        self.permission.allows_mode(mode)
    }

    /// whether the restrictions attached to this edge permit turning
    /// onto `onto` at the state's time with the given mode. equivalence
    /// is decided by the edge being turned onto, so temporary edges can
    /// stand in for the graph edges they alias.
    pub fn can_turn_onto(
        &self,
        onto: &StreetEdge,
        state: &State,
        mode: Option<TraverseMode>,
        graph: &StreetGraph,
    ) -> bool {
        for restriction in graph.turn_restrictions(self.edge_id) {
            let mode_applies = match mode {
                Some(m) => restriction.modes.contains(m),
                None => false,
            };
            if !mode_applies || !restriction.active(state.time_seconds()) {
                continue;
            }
            let equivalent = graph
                .edge(restriction.to)
                .map(|to_edge| onto.is_equivalent_to(to_edge))
                .unwrap_or(false);
            match restriction.restriction_type {
                TurnRestrictionType::OnlyTurn => {
                    if !equivalent {
                        return false;
                    }
                }
                TurnRestrictionType::NoTurn => {
                    if equivalent {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// traversals against the grain of this edge are U-turns and are
    /// disallowed by the kernel.
    pub fn is_reverse_of(&self, other: &StreetEdge) -> bool {
        self.from_vertex == other.to_vertex && self.to_vertex == other.from_vertex
    }

    pub fn is_equivalent_to(&self, other: &StreetEdge) -> bool {
        self.edge_id == other.edge_id
            || self.parent_edge == Some(other.edge_id)
            || other.parent_edge == Some(self.edge_id)
    }

    /// per-edge traversal contract invoked by the search engine. yields
    /// no state when the edge is inadmissible from `s0`; a kiss-and-ride
    /// fork may attach a second state to the result chain.
    pub fn traverse(&self, s0: &State, graph: &StreetGraph) -> Option<State> {
        traversal_ops::traverse(self, s0, graph)
    }

    /// admissible lower bound on traversal weight, for goal-directed
    /// search heuristics.
    pub fn weight_lower_bound(&self, request: &RoutingRequest) -> f64 {
        self.time_lower_bound(request) * request.walk_reluctance
    }

    /// admissible lower bound on traversal time in seconds.
    pub fn time_lower_bound(&self, request: &RoutingRequest) -> f64 {
        self.distance() / request.street_speed_upper_bound().get::<meter_per_second>()
    }
}

impl Display for StreetEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StreetEdge({}, {}, {} -> {} length={} carSpeed={} permission={})",
            self.edge_id,
            self.name,
            self.from_vertex,
            self.to_vertex,
            self.distance(),
            self.car_speed,
            self.permission
        )
    }
}

/// single signed byte per angle: `round(radians * 128 / pi) + 128`,
/// with the wrap on the byte cast re-orienting the reference direction.
fn encode_angle(radians: f64) -> i8 {
    ((radians * 128.0 / std::f64::consts::PI + 128.0).round() as i64) as i8
}

fn compute_angles(geometry: &LineString<f64>) -> (i8, i8) {
    let first = azimuth_ops::first_segment_azimuth(geometry);
    let last = azimuth_ops::last_segment_azimuth(geometry);
    match (first, last) {
        (Ok(first), Ok(last)) => (encode_angle(first), encode_angle(last)),
        _ => {
            log::error!(
                "exception while determining street edge angles, setting to zero; \
                 there is probably something wrong with this street segment's geometry"
            );
            (0, 0)
        }
    }
}
