use crate::model::network::{StreetEdge, TraverseMode, Vertex};
use crate::model::request::RoutingRequest;
use uom::si::f64::Velocity;
use uom::si::velocity::meter_per_second;

/// expected seconds added by traversing an intersection. forward and
/// reverse searches call this with swapped operands so that turn costs
/// add up the same over a path in either direction.
pub trait IntersectionTraversalCostModel: std::fmt::Debug + Send + Sync {
    fn compute_traversal_cost(
        &self,
        vertex: &Vertex,
        from: &StreetEdge,
        to: &StreetEdge,
        mode: TraverseMode,
        request: &RoutingRequest,
        from_speed: Velocity,
        to_speed: Velocity,
    ) -> f64;
}

const EXPECTED_RIGHT_AT_LIGHT_SEC: f64 = 15.0;
const EXPECTED_LEFT_AT_LIGHT_SEC: f64 = 45.0;
const EXPECTED_FREE_FLOWING_RIGHT_SEC: f64 = 8.0;
const EXPECTED_FREE_FLOWING_LEFT_SEC: f64 = 25.0;

/// both legs faster than this are treated as a highway junction with no
/// turn cost, meters per second.
const HIGHWAY_SPEED_FLOOR: f32 = 25.0;

/// angle-based turn costs: a flat per-turn expectation for driving,
/// and a deflection-proportional slowdown for walking and cycling.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTraversalCostModel;

impl SimpleTraversalCostModel {
    /// turn deflection in [0, 360) degrees from the incoming edge's
    /// exit azimuth to the outgoing edge's entry azimuth.
    fn turn_angle(&self, from: &StreetEdge, to: &StreetEdge) -> i32 {
        let angle_out_of_intersection = to.in_angle();
        let angle_into_intersection = from.out_angle();
        let mut turn_angle = angle_out_of_intersection - angle_into_intersection;
        if turn_angle < 0 {
            turn_angle += 360;
        }
        turn_angle
    }

    /// a right turn, which does not cross oncoming traffic when
    /// driving on the right.
    fn is_safe_turn(&self, turn_angle: i32) -> bool {
        (45..135).contains(&turn_angle)
    }

    fn non_driving_cost(&self, from: &StreetEdge, to: &StreetEdge, to_speed: Velocity) -> f64 {
        // the deflection at the shared vertex: the incoming edge's exit
        // azimuth against the outgoing edge's entry azimuth
        let mut turn_cost = (to.in_angle() - from.out_angle()).abs();
        if turn_cost > 180 {
            turn_cost = 360 - turn_cost;
        }
        // the turn cost falls as speed rises
        (turn_cost as f64 / 20.0) / to_speed.get::<meter_per_second>()
    }

    fn driving_cost(&self, vertex: &Vertex, from: &StreetEdge, to: &StreetEdge) -> f64 {
        let turn_angle = self.turn_angle(from, to);
        if vertex.has_traffic_light() {
            if self.is_safe_turn(turn_angle) {
                EXPECTED_RIGHT_AT_LIGHT_SEC
            } else {
                EXPECTED_LEFT_AT_LIGHT_SEC
            }
        } else if from.car_speed() > HIGHWAY_SPEED_FLOOR && to.car_speed() > HIGHWAY_SPEED_FLOOR {
            0.0
        } else if self.is_safe_turn(turn_angle) {
            EXPECTED_FREE_FLOWING_RIGHT_SEC
        } else {
            EXPECTED_FREE_FLOWING_LEFT_SEC
        }
    }
}

impl IntersectionTraversalCostModel for SimpleTraversalCostModel {
    fn compute_traversal_cost(
        &self,
        vertex: &Vertex,
        from: &StreetEdge,
        to: &StreetEdge,
        mode: TraverseMode,
        _request: &RoutingRequest,
        _from_speed: Velocity,
        to_speed: Velocity,
    ) -> f64 {
        if vertex.is_free_flowing() {
            return 0.0;
        }
        if !mode.is_driving() {
            return self.non_driving_cost(from, to, to_speed);
        }
        self.driving_cost(vertex, from, to)
    }
}

#[cfg(test)]
mod test {
    use super::{IntersectionTraversalCostModel, SimpleTraversalCostModel};
    use crate::model::network::{StreetEdge, TraversalPermission, TraverseMode, Vertex, VertexKind};
    use crate::model::request::RoutingRequest;
    use geo::line_string;
    use uom::si::f64::Velocity;
    use uom::si::velocity::meter_per_second;

    fn edge_with_heading(edge_id: usize, dx: f64, dy: f64) -> StreetEdge {
        StreetEdge::new(
            edge_id,
            0,
            1,
            Some(line_string![(x: 0.0, y: 0.0), (x: dx, y: dy)]),
            "e",
            100.0,
            TraversalPermission::ALL,
            false,
        )
    }

    fn intersection(traffic_light: bool) -> Vertex {
        Vertex::new(
            1,
            0.0,
            0.0,
            VertexKind::Intersection {
                traffic_light,
                free_flowing: false,
            },
        )
    }

    fn speed(value: f64) -> Velocity {
        Velocity::new::<meter_per_second>(value)
    }

    #[test]
    fn test_straight_walk_costs_nothing() {
        let model = SimpleTraversalCostModel;
        let from = edge_with_heading(0, 0.0, 1.0);
        let to = edge_with_heading(1, 0.0, 1.0);
        let cost = model.compute_traversal_cost(
            &intersection(false),
            &from,
            &to,
            TraverseMode::Walk,
            &RoutingRequest::default(),
            speed(1.33),
            speed(1.33),
        );
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_walk_turn_cost_scales_with_deflection() {
        let model = SimpleTraversalCostModel;
        let from = edge_with_heading(0, 0.0, 1.0);
        let to = edge_with_heading(1, 1.0, 0.0);
        let cost = model.compute_traversal_cost(
            &intersection(false),
            &from,
            &to,
            TraverseMode::Walk,
            &RoutingRequest::default(),
            speed(1.0),
            speed(1.0),
        );
        // 90 degrees of deflection at 1 m/s
        assert_eq!(cost, 90.0 / 20.0);
    }

    #[test]
    fn test_walk_turn_cost_uses_the_shared_vertex_angles() {
        let model = SimpleTraversalCostModel;
        // the incoming edge bends: it starts east but arrives at the
        // intersection heading north
        let from = StreetEdge::new(
            0,
            0,
            1,
            Some(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]),
            "e",
            100.0,
            TraversalPermission::ALL,
            false,
        );
        // the outgoing edge continues straight north
        let to = StreetEdge::new(
            1,
            1,
            2,
            Some(line_string![(x: 1.0, y: 1.0), (x: 1.0, y: 2.0)]),
            "f",
            100.0,
            TraversalPermission::ALL,
            false,
        );
        let cost = model.compute_traversal_cost(
            &intersection(false),
            &from,
            &to,
            TraverseMode::Walk,
            &RoutingRequest::default(),
            speed(1.0),
            speed(1.0),
        );
        // at the shared vertex both headings are north: no deflection,
        // whatever the far end of the incoming geometry does
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_driving_turns_at_a_light() {
        let model = SimpleTraversalCostModel;
        // heading north into the intersection, exiting east: a right turn
        let from = edge_with_heading(0, 0.0, 1.0);
        let right = edge_with_heading(1, 1.0, 0.0);
        let left = edge_with_heading(2, -1.0, 0.0);
        let request = RoutingRequest::default();
        let at_light = intersection(true);
        let right_cost = model.compute_traversal_cost(
            &at_light,
            &from,
            &right,
            TraverseMode::Car,
            &request,
            speed(10.0),
            speed(10.0),
        );
        let left_cost = model.compute_traversal_cost(
            &at_light,
            &from,
            &left,
            TraverseMode::Car,
            &request,
            speed(10.0),
            speed(10.0),
        );
        assert_eq!(right_cost, 15.0);
        assert_eq!(left_cost, 45.0);
    }

    #[test]
    fn test_highway_junction_is_free() {
        let model = SimpleTraversalCostModel;
        let mut from = edge_with_heading(0, 0.0, 1.0);
        let mut to = edge_with_heading(1, 1.0, 0.0);
        from.set_car_speed(30.0);
        to.set_car_speed(30.0);
        let cost = model.compute_traversal_cost(
            &intersection(false),
            &from,
            &to,
            TraverseMode::Car,
            &RoutingRequest::default(),
            speed(30.0),
            speed(30.0),
        );
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_free_flowing_vertex_is_free() {
        let model = SimpleTraversalCostModel;
        let from = edge_with_heading(0, 0.0, 1.0);
        let to = edge_with_heading(1, 1.0, 0.0);
        let vertex = Vertex::new(
            1,
            0.0,
            0.0,
            VertexKind::Intersection {
                traffic_light: false,
                free_flowing: true,
            },
        );
        let cost = model.compute_traversal_cost(
            &vertex,
            &from,
            &to,
            TraverseMode::Car,
            &RoutingRequest::default(),
            speed(10.0),
            speed(10.0),
        );
        assert_eq!(cost, 0.0);
    }
}
