pub type VertexId = usize;

/// the role a vertex plays in turn cost computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    /// a street intersection. `free_flowing` intersections (single in and
    /// out edge, no signal) incur no turn cost.
    Intersection {
        traffic_light: bool,
        free_flowing: bool,
    },
    TransitStop,
    /// a vertex introduced by splitting an edge for request endpoints.
    Temporary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub lon: f64,
    pub lat: f64,
    pub kind: VertexKind,
}

impl Vertex {
    pub fn new(id: VertexId, lon: f64, lat: f64, kind: VertexKind) -> Vertex {
        Vertex { id, lon, lat, kind }
    }

    pub fn intersection(id: VertexId, lon: f64, lat: f64) -> Vertex {
        Vertex::new(
            id,
            lon,
            lat,
            VertexKind::Intersection {
                traffic_light: false,
                free_flowing: false,
            },
        )
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self.kind, VertexKind::Intersection { .. })
    }

    pub fn has_traffic_light(&self) -> bool {
        matches!(
            self.kind,
            VertexKind::Intersection {
                traffic_light: true,
                ..
            }
        )
    }

    pub fn is_free_flowing(&self) -> bool {
        matches!(
            self.kind,
            VertexKind::Intersection {
                free_flowing: true,
                ..
            }
        )
    }
}
