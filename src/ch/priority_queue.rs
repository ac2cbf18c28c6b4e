use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::priority_function::Priority;
use crate::graphs::VertexId;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChPriorityElement {
    pub vertex: VertexId,
    pub priority: Priority,
}

impl ChPriorityElement {
    pub fn new(priority: Priority, vertex: VertexId) -> Self {
        Self { vertex, priority }
    }
}

// `KeyedPriorityQueue` pops the greatest element, so both the priority and
// the tie breaking vertex id are flipped: the smallest priority wins and
// among equal priorities the smallest id.
impl Ord for ChPriorityElement {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for ChPriorityElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Indexed min-queue of vertices awaiting contraction. Pushing a queued
/// vertex again replaces its priority.
#[derive(Clone)]
pub struct ContractionQueue {
    queue: KeyedPriorityQueue<VertexId, ChPriorityElement>,
}

impl Default for ContractionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractionQueue {
    pub fn new() -> ContractionQueue {
        ContractionQueue {
            queue: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, vertex: VertexId, priority: Priority) {
        self.queue
            .push(vertex, ChPriorityElement::new(priority, vertex));
    }

    pub fn pop(&mut self) -> Option<ChPriorityElement> {
        self.queue.pop().map(|(_, element)| element)
    }

    pub fn remove(&mut self, vertex: VertexId) -> Option<Priority> {
        self.queue.remove(&vertex).map(|element| element.priority)
    }

    pub fn priority(&self, vertex: VertexId) -> Option<Priority> {
        self.queue
            .get_priority(&vertex)
            .map(|element| element.priority)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
