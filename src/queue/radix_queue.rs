use radix_heap::RadixHeapMap;

use super::{DijkstraQueue, DijkstraQueueElement};
use crate::graphs::{VertexId, Weight};

/// Radix heap keyed by the negated weight, since `RadixHeapMap` pops the
/// largest key first.
#[derive(Clone)]
pub struct RadixQueue {
    heap: RadixHeapMap<i64, VertexId>,
}

impl Default for RadixQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RadixQueue {
    pub fn new() -> RadixQueue {
        RadixQueue {
            heap: RadixHeapMap::new(),
        }
    }
}

impl DijkstraQueue for RadixQueue {
    fn push(&mut self, element: DijkstraQueueElement) {
        self.heap.push(-(element.weight as i64), element.vertex);
    }

    fn pop(&mut self) -> Option<DijkstraQueueElement> {
        let (negative_weight, vertex) = self.heap.pop()?;
        Some(DijkstraQueueElement {
            weight: (-negative_weight) as Weight,
            vertex,
        })
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_increasing_weight() {
        let mut queue = RadixQueue::new();
        queue.push(DijkstraQueueElement::new(5, 1));
        queue.push(DijkstraQueueElement::new(2, 2));
        queue.push(DijkstraQueueElement::new(9, 3));

        assert_eq!(queue.pop(), Some(DijkstraQueueElement::new(2, 2)));
        queue.push(DijkstraQueueElement::new(3, 4));
        assert_eq!(queue.pop(), Some(DijkstraQueueElement::new(3, 4)));
        assert_eq!(queue.pop(), Some(DijkstraQueueElement::new(5, 1)));
        assert_eq!(queue.pop(), Some(DijkstraQueueElement::new(9, 3)));
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_allows_restarting_at_zero() {
        let mut queue = RadixQueue::new();
        queue.push(DijkstraQueueElement::new(7, 1));
        queue.pop();
        queue.clear();
        queue.push(DijkstraQueueElement::new(0, 2));
        assert_eq!(queue.pop(), Some(DijkstraQueueElement::new(0, 2)));
    }
}
