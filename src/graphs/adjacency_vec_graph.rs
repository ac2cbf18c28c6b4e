use serde_derive::{Deserialize, Serialize};

use super::{
    edge::{Arc, EdgeData},
    merge_arc,
    spatial::Coordinate,
    validate_weight, DynamicGraph, VertexId,
};
use crate::error::GraphError;

/// Adjacency list backed graph. Vertex ids are dense, every vertex owns one
/// vector of records.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AdjacencyVecGraph {
    arcs: Vec<Vec<Arc>>,
    coordinates: Vec<Option<Coordinate>>,
}

impl AdjacencyVecGraph {
    pub fn new() -> AdjacencyVecGraph {
        AdjacencyVecGraph::default()
    }

    pub fn with_vertices(number_of_vertices: u32) -> AdjacencyVecGraph {
        AdjacencyVecGraph {
            arcs: vec![Vec::new(); number_of_vertices as usize],
            coordinates: vec![None; number_of_vertices as usize],
        }
    }

    /// Builds a graph from `(tail, head, data)` triples, inserting each as a
    /// symmetric pair of records.
    pub fn from_edges(
        number_of_vertices: u32,
        edges: &[(VertexId, VertexId, EdgeData)],
    ) -> Result<AdjacencyVecGraph, GraphError> {
        let mut graph = AdjacencyVecGraph::with_vertices(number_of_vertices);
        for &(tail, head, data) in edges {
            graph.add_edge(tail, head, data)?;
        }
        Ok(graph)
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if (vertex as usize) < self.arcs.len() {
            Ok(())
        } else {
            Err(GraphError::StructuralInconsistency { vertex })
        }
    }
}

impl DynamicGraph for AdjacencyVecGraph {
    fn number_of_vertices(&self) -> u32 {
        self.arcs.len() as u32
    }

    fn number_of_arcs(&self) -> usize {
        self.arcs.iter().map(Vec::len).sum()
    }

    fn add_vertex(&mut self, coordinate: Option<Coordinate>) -> VertexId {
        self.arcs.push(Vec::new());
        self.coordinates.push(coordinate);
        (self.arcs.len() - 1) as VertexId
    }

    fn coordinate(&self, vertex: VertexId) -> Option<Coordinate> {
        *self.coordinates.get(vertex as usize)?
    }

    fn arcs(&self, vertex: VertexId) -> Option<&[Arc]> {
        self.arcs.get(vertex as usize).map(Vec::as_slice)
    }

    fn add_arc(
        &mut self,
        tail: VertexId,
        head: VertexId,
        data: EdgeData,
    ) -> Result<bool, GraphError> {
        self.check_vertex(tail)?;
        self.check_vertex(head)?;
        validate_weight(tail, head, &data)?;

        if tail == head || data.is_empty() {
            return Ok(false);
        }

        Ok(merge_arc(&mut self.arcs[tail as usize], head, data))
    }

    fn remove_arcs(&mut self, tail: VertexId, head: VertexId) -> Result<usize, GraphError> {
        self.check_vertex(tail)?;

        let arcs = &mut self.arcs[tail as usize];
        let before = arcs.len();
        arcs.retain(|arc| arc.head != head);
        Ok(before - arcs.len())
    }
}
