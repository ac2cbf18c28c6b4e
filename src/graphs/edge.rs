use serde_derive::{Deserialize, Serialize};

use super::{VertexId, Weight};

/// Payload of a stored record. `forward` allows travelling from the owning
/// vertex to the neighbour, `backward` from the neighbour to the owning vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    weight: Weight,
    forward: bool,
    backward: bool,
    contracted: Option<VertexId>,
}

impl EdgeData {
    pub fn new(weight: Weight, forward: bool, backward: bool) -> EdgeData {
        EdgeData {
            weight,
            forward,
            backward,
            contracted: None,
        }
    }

    pub fn bidirectional(weight: Weight) -> EdgeData {
        EdgeData::new(weight, true, true)
    }

    /// A record standing for the path `neighbour - vertex - owner` through the
    /// contracted `vertex`.
    pub fn shortcut(weight: Weight, forward: bool, backward: bool, vertex: VertexId) -> EdgeData {
        EdgeData {
            weight,
            forward,
            backward,
            contracted: Some(vertex),
        }
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn forward(&self) -> bool {
        self.forward
    }

    pub fn backward(&self) -> bool {
        self.backward
    }

    pub fn contracted_vertex(&self) -> Option<VertexId> {
        self.contracted
    }

    pub fn is_shortcut(&self) -> bool {
        self.contracted.is_some()
    }

    /// A record usable in neither direction is logically absent.
    pub fn is_empty(&self) -> bool {
        !self.forward && !self.backward
    }

    pub fn reversed(&self) -> EdgeData {
        EdgeData {
            forward: self.backward,
            backward: self.forward,
            ..*self
        }
    }

    pub(crate) fn set_forward(&mut self, forward: bool) {
        self.forward = forward;
    }

    pub(crate) fn set_backward(&mut self, backward: bool) {
        self.backward = backward;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arc {
    pub head: VertexId,
    pub data: EdgeData,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, Debug)]
pub struct DirectedWeightedEdge {
    tail: VertexId,
    head: VertexId,
    weight: Weight,
}

impl DirectedWeightedEdge {
    /// Returns `None` for self loops.
    pub fn new(tail: VertexId, head: VertexId, weight: Weight) -> Option<DirectedWeightedEdge> {
        if tail == head {
            return None;
        }

        Some(DirectedWeightedEdge { tail, head, weight })
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}
