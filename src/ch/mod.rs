use serde_derive::{Deserialize, Serialize};

use crate::{
    config::ContractionConfig,
    error::GraphError,
    graphs::{
        edge::{Arc, DirectedWeightedEdge},
        DynamicGraph, VertexId,
    },
};
use contractor::{witness_search::DijkstraWitnessSearch, Contractor};

pub mod contractor;
pub mod priority_function;
pub mod priority_queue;

pub type Level = u32;

/// A record inserted while contracting `vertex`, replacing the path
/// `edge.tail() -> vertex -> edge.head()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub edge: DirectedWeightedEdge,
    pub vertex: VertexId,
}

/// Result of a full contraction: the mutated graph where every vertex only
/// keeps records towards vertices of higher level, plus the level of every
/// vertex.
pub struct ContractionHierarchy<G: DynamicGraph> {
    graph: G,
    levels: Vec<Level>,
    level_to_vertex: Vec<VertexId>,
    shortcuts: Vec<Shortcut>,
}

impl<G: DynamicGraph> ContractionHierarchy<G> {
    pub(crate) fn new(
        graph: G,
        levels: Vec<Level>,
        level_to_vertex: Vec<VertexId>,
        shortcuts: Vec<Shortcut>,
    ) -> Self {
        ContractionHierarchy {
            graph,
            levels,
            level_to_vertex,
            shortcuts,
        }
    }

    /// Contracts `graph` with the bounded Dijkstra witness search.
    pub fn by_contraction(
        graph: G,
        config: ContractionConfig,
    ) -> Result<ContractionHierarchy<G>, GraphError> {
        let witness = DijkstraWitnessSearch::new(config.witness_search.clone());
        Contractor::new(graph, witness, config)?.contract()
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn into_graph(self) -> G {
        self.graph
    }

    pub fn level(&self, vertex: VertexId) -> Option<Level> {
        self.levels.get(vertex as usize).copied()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level_to_vertex(&self) -> &[VertexId] {
        &self.level_to_vertex
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// Records of `vertex` pointing upwards in the hierarchy.
    pub fn upward_arcs(&self, vertex: VertexId) -> impl Iterator<Item = &Arc> + '_ {
        let level = self.level(vertex);
        self.graph
            .arcs(vertex)
            .unwrap_or_default()
            .iter()
            .filter(move |arc| level < self.level(arc.head))
    }
}
