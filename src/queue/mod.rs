use crate::graphs::{VertexId, Weight};

pub mod radix_queue;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DijkstraQueueElement {
    pub weight: Weight,
    pub vertex: VertexId,
}

impl DijkstraQueueElement {
    pub fn new(weight: Weight, vertex: VertexId) -> DijkstraQueueElement {
        DijkstraQueueElement { weight, vertex }
    }
}

/// Monotone queue for Dijkstra style searches: pushed weights are never
/// smaller than the last popped one.
pub trait DijkstraQueue {
    fn push(&mut self, element: DijkstraQueueElement);
    fn pop(&mut self) -> Option<DijkstraQueueElement>;
    fn is_empty(&self) -> bool;
    fn clear(&mut self);
}
