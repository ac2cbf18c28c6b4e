use super::witness_search::WitnessCalculator;
use crate::{
    ch::Shortcut,
    error::GraphError,
    graphs::{edge::DirectedWeightedEdge, DynamicGraph, VertexId, INFINITY},
};

/// Outcome of contracting a vertex without touching the graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Simulation {
    pub shortcuts: Vec<Shortcut>,
    /// Directional capabilities lost by contracting the vertex.
    pub removed_edges: u32,
}

impl Simulation {
    pub fn edge_difference(&self) -> i32 {
        self.shortcuts.len() as i32 - self.removed_edges as i32
    }
}

/// Simulates a contraction of `vertex`: every pair (tail -> vertex -> head)
/// without witness yields a shortcut.
pub fn simulate_contraction<G, W>(
    graph: &G,
    witness: &mut W,
    vertex: VertexId,
) -> Result<Simulation, GraphError>
where
    G: DynamicGraph + ?Sized,
    W: WitnessCalculator,
{
    let neighbors = graph.neighbors(vertex)?;
    if let Some(arc) = neighbors.iter().find(|arc| graph.arcs(arc.head).is_none()) {
        return Err(GraphError::StructuralInconsistency { vertex: arc.head });
    }

    let mut simulation = Simulation::default();

    // tail -> vertex -> head
    for in_arc in neighbors.iter().filter(|arc| arc.data.backward()) {
        let tail = in_arc.head;

        for out_arc in neighbors.iter().filter(|arc| arc.data.forward()) {
            let head = out_arc.head;
            let weight = in_arc.data.weight().saturating_add(out_arc.data.weight());
            if weight == INFINITY {
                return Err(GraphError::NegativeOrInvalidWeight {
                    tail,
                    head,
                    weight: in_arc.data.weight() as f64 + out_arc.data.weight() as f64,
                });
            }

            let Some(edge) = DirectedWeightedEdge::new(tail, head, weight) else {
                continue;
            };
            if !witness.exists(graph, tail, head, vertex, weight) {
                simulation.shortcuts.push(Shortcut { edge, vertex });
            }
        }

        if in_arc.data.forward() {
            simulation.removed_edges += 1;
        }
        simulation.removed_edges += 1;
    }

    Ok(simulation)
}
