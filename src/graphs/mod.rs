use std::ops::Range;

use edge::{Arc, EdgeData};
use spatial::Coordinate;

use crate::error::GraphError;

pub mod adjacency_vec_graph;
pub mod edge;
pub mod hash_graph;
pub mod spatial;

pub type VertexId = u32;
pub type Weight = u32;

/// Reserved weight meaning "not reachable". Never stored on a record.
pub const INFINITY: Weight = Weight::MAX;

/// Mutable directed multigraph the contraction operates on. Every vertex owns
/// a list of records (`Arc`) pointing at a neighbour, each carrying a weight
/// and the directions in which it may be traversed.
pub trait DynamicGraph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    fn vertices(&self) -> Range<VertexId> {
        0..self.number_of_vertices()
    }

    fn number_of_arcs(&self) -> usize {
        self.vertices()
            .filter_map(|vertex| self.arcs(vertex))
            .map(<[Arc]>::len)
            .sum()
    }

    fn add_vertex(&mut self, coordinate: Option<Coordinate>) -> VertexId;

    fn coordinate(&self, vertex: VertexId) -> Option<Coordinate>;

    /// Records owned by `vertex`, or `None` if the vertex has no adjacency
    /// entry.
    fn arcs(&self, vertex: VertexId) -> Option<&[Arc]>;

    /// Inserts a single directed record, merging by minimum weight per
    /// direction. Returns whether the stored records changed.
    fn add_arc(&mut self, tail: VertexId, head: VertexId, data: EdgeData)
        -> Result<bool, GraphError>;

    /// Removes every record `tail -> head` and returns how many were removed.
    fn remove_arcs(&mut self, tail: VertexId, head: VertexId) -> Result<usize, GraphError>;

    fn neighbors(&self, vertex: VertexId) -> Result<&[Arc], GraphError> {
        self.arcs(vertex)
            .ok_or(GraphError::StructuralInconsistency { vertex })
    }

    /// Inserts `data` at `tail` and its reversed twin at `head`.
    fn add_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        data: EdgeData,
    ) -> Result<bool, GraphError> {
        let forward_changed = self.add_arc(tail, head, data)?;
        let backward_changed = self.add_arc(head, tail, data.reversed())?;
        Ok(forward_changed || backward_changed)
    }

    fn remove_edge(&mut self, tail: VertexId, head: VertexId) -> Result<usize, GraphError> {
        Ok(self.remove_arcs(tail, head)? + self.remove_arcs(head, tail)?)
    }
}

/// Converts a real valued road cost into a stored weight.
pub fn weight_from_cost(tail: VertexId, head: VertexId, cost: f64) -> Result<Weight, GraphError> {
    let rounded = cost.round();
    if !cost.is_finite() || cost < 0.0 || rounded >= INFINITY as f64 {
        return Err(GraphError::NegativeOrInvalidWeight {
            tail,
            head,
            weight: cost,
        });
    }
    Ok(rounded as Weight)
}

pub(crate) fn validate_weight(
    tail: VertexId,
    head: VertexId,
    data: &EdgeData,
) -> Result<(), GraphError> {
    if data.weight() == INFINITY {
        return Err(GraphError::NegativeOrInvalidWeight {
            tail,
            head,
            weight: data.weight() as f64,
        });
    }
    Ok(())
}

/// Folds `data` into the records of one tail so that for every direction at
/// most one record towards `head` remains, the cheapest one.
pub(crate) fn merge_arc(arcs: &mut Vec<Arc>, head: VertexId, data: EdgeData) -> bool {
    let mut data = data;
    let mut changed = false;

    for arc in arcs.iter_mut().filter(|arc| arc.head == head) {
        if data.forward() && arc.data.forward() {
            if arc.data.weight() <= data.weight() {
                data.set_forward(false);
            } else {
                arc.data.set_forward(false);
                changed = true;
            }
        }
        if data.backward() && arc.data.backward() {
            if arc.data.weight() <= data.weight() {
                data.set_backward(false);
            } else {
                arc.data.set_backward(false);
                changed = true;
            }
        }
    }
    arcs.retain(|arc| !arc.data.is_empty());

    if data.is_empty() {
        return changed;
    }

    // Records of equal weight and origin collapse into one bidirectional record.
    if let Some(arc) = arcs.iter_mut().find(|arc| {
        arc.head == head
            && arc.data.weight() == data.weight()
            && arc.data.contracted_vertex() == data.contracted_vertex()
    }) {
        arc.data.set_forward(arc.data.forward() || data.forward());
        arc.data.set_backward(arc.data.backward() || data.backward());
    } else {
        arcs.push(Arc { head, data });
    }

    true
}
