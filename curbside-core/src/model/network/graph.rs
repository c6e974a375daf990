use crate::model::network::{StreetEdge, TurnRestriction, Vertex, VertexId};
use chrono_tz::Tz;
use std::collections::HashMap;

pub type EdgeId = usize;

/// the street network consumed by edge traversal: vertex and edge
/// arenas, per-edge turn restriction lists, and the home timezone.
/// built once by the loader, then shared read-only across searches.
#[derive(Debug, Clone)]
pub struct StreetGraph {
    vertices: Vec<Vertex>,
    edges: Vec<StreetEdge>,
    turn_restrictions: HashMap<EdgeId, Vec<TurnRestriction>>,
    time_zone: Tz,
}

impl StreetGraph {
    pub fn new(time_zone: Tz) -> StreetGraph {
        StreetGraph {
            vertices: vec![],
            edges: vec![],
            turn_restrictions: HashMap::new(),
            time_zone,
        }
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        let id = self.vertices.len();
        let mut vertex = vertex;
        vertex.id = id;
        self.vertices.push(vertex);
        id
    }

    /// assigns the next edge id; the caller builds the edge via the
    /// returned id so the edge can carry it.
    pub fn next_edge_id(&self) -> EdgeId {
        self.edges.len()
    }

    pub fn add_edge(&mut self, edge: StreetEdge) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(edge);
        id
    }

    pub fn add_turn_restriction(&mut self, restriction: TurnRestriction) {
        self.turn_restrictions
            .entry(restriction.from)
            .or_default()
            .push(restriction);
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&StreetEdge> {
        self.edges.get(id)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut StreetEdge> {
        self.edges.get_mut(id)
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// restrictions attached to the given incoming edge.
    pub fn turn_restrictions(&self, edge_id: EdgeId) -> &[TurnRestriction] {
        self.turn_restrictions
            .get(&edge_id)
            .map(|r| r.as_slice())
            .unwrap_or(&[])
    }
}
