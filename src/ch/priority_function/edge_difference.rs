use itertools::Itertools;

use super::{Priority, PriorityTerms};
use crate::{
    ch::contractor::{
        contraction_helper::{simulate_contraction, Simulation},
        witness_search::WitnessCalculator,
    },
    error::GraphError,
    graphs::{DynamicGraph, VertexId},
};

/// Per vertex bookkeeping. `None` means "no entry": the vertex has no
/// contracted neighbour yet, or no depth was recorded for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct VertexRecord {
    contracted_neighbors: Option<u32>,
    depth: Option<u32>,
}

/// Priority from the simulated edge difference, biased by contraction depth
/// and the number of already contracted neighbours.
#[derive(Clone, Debug)]
pub struct EdgeDifferenceCalculator {
    terms: PriorityTerms,
    records: Vec<VertexRecord>,
}

impl EdgeDifferenceCalculator {
    pub fn new(number_of_vertices: u32, terms: PriorityTerms) -> EdgeDifferenceCalculator {
        EdgeDifferenceCalculator {
            terms,
            records: vec![VertexRecord::default(); number_of_vertices as usize],
        }
    }

    pub fn terms(&self) -> PriorityTerms {
        self.terms
    }

    pub fn depth(&self, vertex: VertexId) -> u32 {
        self.record(vertex).depth.unwrap_or(0)
    }

    pub fn contracted_neighbors(&self, vertex: VertexId) -> u32 {
        self.record(vertex).contracted_neighbors.unwrap_or(0)
    }

    /// Priority of `vertex` in the current graph. Does not mutate any
    /// bookkeeping, the witness calculator only uses its own workspace.
    pub fn calculate<G, W>(
        &self,
        graph: &G,
        witness: &mut W,
        vertex: VertexId,
    ) -> Result<Priority, GraphError>
    where
        G: DynamicGraph + ?Sized,
        W: WitnessCalculator,
    {
        let simulation = simulate_contraction(graph, witness, vertex)?;
        Ok(self.priority(vertex, &simulation))
    }

    /// Saturates instead of overflowing, the coefficients come from user
    /// configuration.
    pub fn priority(&self, vertex: VertexId, simulation: &Simulation) -> Priority {
        let depth = Priority::try_from(self.depth(vertex)).unwrap_or(Priority::MAX);
        let contracted_neighbors =
            Priority::try_from(self.contracted_neighbors(vertex)).unwrap_or(Priority::MAX);

        self.terms
            .edge_difference
            .saturating_mul(simulation.edge_difference())
            .saturating_add(self.terms.depth.saturating_mul(depth))
            .saturating_add(
                self.terms
                    .contracted_neighbors
                    .saturating_mul(contracted_neighbors),
            )
    }

    /// Updates the bookkeeping once `vertex` gets contracted. Has to be called
    /// while the records of `vertex` are still in the graph.
    pub fn notify_contracted<G>(&mut self, graph: &G, vertex: VertexId) -> Result<(), GraphError>
    where
        G: DynamicGraph + ?Sized,
    {
        let neighbors = graph
            .neighbors(vertex)?
            .iter()
            .map(|arc| arc.head)
            .unique()
            .collect_vec();
        let number_of_vertices = self.records.len();
        if let Some(&neighbor) = neighbors
            .iter()
            .chain(std::iter::once(&vertex))
            .find(|&&neighbor| neighbor as usize >= number_of_vertices)
        {
            return Err(GraphError::StructuralInconsistency { vertex: neighbor });
        }

        self.records[vertex as usize].contracted_neighbors = None;

        // Neighbours without any contracted neighbour before this contraction.
        let untracked = neighbors
            .iter()
            .copied()
            .filter(|&neighbor| self.records[neighbor as usize].contracted_neighbors.is_none())
            .collect_vec();

        for &neighbor in neighbors.iter() {
            *self.records[neighbor as usize]
                .contracted_neighbors
                .get_or_insert(0) += 1;
        }

        let vertex_depth = self.records[vertex as usize].depth.take().unwrap_or(0) + 1;

        for neighbor in untracked {
            let depth = &mut self.records[neighbor as usize].depth;
            *depth = Some(depth.map_or(vertex_depth, |depth| depth.min(vertex_depth)));
        }

        Ok(())
    }

    fn record(&self, vertex: VertexId) -> VertexRecord {
        self.records
            .get(vertex as usize)
            .copied()
            .unwrap_or_default()
    }
}
