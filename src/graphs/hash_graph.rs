use ahash::{HashMap, HashMapExt};

use super::{
    edge::{Arc, EdgeData},
    merge_arc,
    spatial::Coordinate,
    validate_weight, DynamicGraph, VertexId,
};
use crate::error::GraphError;

/// In-memory fixture graph keyed by vertex id. Unlike [`super::adjacency_vec_graph::AdjacencyVecGraph`]
/// a vertex can lose its adjacency entry, which lets tests model corrupted
/// input.
#[derive(Clone, Default)]
pub struct HashGraph {
    number_of_vertices: u32,
    arcs: HashMap<VertexId, Vec<Arc>>,
    coordinates: HashMap<VertexId, Coordinate>,
}

impl HashGraph {
    pub fn new() -> HashGraph {
        HashGraph {
            number_of_vertices: 0,
            arcs: HashMap::new(),
            coordinates: HashMap::new(),
        }
    }

    pub fn with_vertices(number_of_vertices: u32) -> HashGraph {
        let mut graph = HashGraph::new();
        for _ in 0..number_of_vertices {
            graph.add_vertex(None);
        }
        graph
    }

    /// Drops the adjacency entry of `vertex` while records of other vertices
    /// may still point at it.
    pub fn detach_entry(&mut self, vertex: VertexId) -> Option<Vec<Arc>> {
        self.coordinates.remove(&vertex);
        self.arcs.remove(&vertex)
    }

    fn entry(&mut self, vertex: VertexId) -> Result<&mut Vec<Arc>, GraphError> {
        self.arcs
            .get_mut(&vertex)
            .ok_or(GraphError::StructuralInconsistency { vertex })
    }
}

impl DynamicGraph for HashGraph {
    fn number_of_vertices(&self) -> u32 {
        self.number_of_vertices
    }

    fn add_vertex(&mut self, coordinate: Option<Coordinate>) -> VertexId {
        let vertex = self.number_of_vertices;
        self.number_of_vertices += 1;
        self.arcs.insert(vertex, Vec::new());
        if let Some(coordinate) = coordinate {
            self.coordinates.insert(vertex, coordinate);
        }
        vertex
    }

    fn coordinate(&self, vertex: VertexId) -> Option<Coordinate> {
        self.coordinates.get(&vertex).copied()
    }

    fn arcs(&self, vertex: VertexId) -> Option<&[Arc]> {
        self.arcs.get(&vertex).map(Vec::as_slice)
    }

    fn add_arc(
        &mut self,
        tail: VertexId,
        head: VertexId,
        data: EdgeData,
    ) -> Result<bool, GraphError> {
        if !self.arcs.contains_key(&head) {
            return Err(GraphError::StructuralInconsistency { vertex: head });
        }
        validate_weight(tail, head, &data)?;
        let arcs = self.entry(tail)?;

        if tail == head || data.is_empty() {
            return Ok(false);
        }

        Ok(merge_arc(arcs, head, data))
    }

    fn remove_arcs(&mut self, tail: VertexId, head: VertexId) -> Result<usize, GraphError> {
        let arcs = self.entry(tail)?;
        let before = arcs.len();
        arcs.retain(|arc| arc.head != head);
        Ok(before - arcs.len())
    }
}
