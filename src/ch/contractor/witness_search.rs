use log::trace;

use crate::{
    config::WitnessSearchConfig,
    graphs::{DynamicGraph, VertexId, Weight, INFINITY},
    queue::{radix_queue::RadixQueue, DijkstraQueue, DijkstraQueueElement},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WitnessStatistics {
    pub searches: u64,
    pub witnesses_found: u64,
    pub budget_exceeded: u64,
}

impl WitnessStatistics {
    pub fn merge(&mut self, other: WitnessStatistics) {
        self.searches += other.searches;
        self.witnesses_found += other.witnesses_found;
        self.budget_exceeded += other.budget_exceeded;
    }

    /// Counts gathered after `earlier` was taken.
    pub fn since(&self, earlier: &WitnessStatistics) -> WitnessStatistics {
        WitnessStatistics {
            searches: self.searches - earlier.searches,
            witnesses_found: self.witnesses_found - earlier.witnesses_found,
            budget_exceeded: self.budget_exceeded - earlier.budget_exceeded,
        }
    }
}

/// Decides whether a path `from -> to` of weight at most `max_weight` exists
/// that does not pass `via`.
pub trait WitnessCalculator: Clone + Send + Sync {
    fn exists<G: DynamicGraph + ?Sized>(
        &mut self,
        graph: &G,
        from: VertexId,
        to: VertexId,
        via: VertexId,
        max_weight: Weight,
    ) -> bool;

    fn statistics(&self) -> WitnessStatistics {
        WitnessStatistics::default()
    }

    /// Adds counts collected by copies of this calculator, e.g. rayon workers.
    fn record_statistics(&mut self, _statistics: WitnessStatistics) {}
}

/// Never finds a witness, every candidate shortcut is inserted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoWitness;

impl WitnessCalculator for NoWitness {
    fn exists<G: DynamicGraph + ?Sized>(
        &mut self,
        _graph: &G,
        _from: VertexId,
        _to: VertexId,
        _via: VertexId,
        _max_weight: Weight,
    ) -> bool {
        false
    }
}

/// Weight and hop bounded Dijkstra. The workspace is kept between searches
/// and only the entries touched by the previous search are reset.
#[derive(Clone, Default)]
pub struct DijkstraWitnessSearch {
    config: WitnessSearchConfig,
    weights: Vec<Weight>,
    hops: Vec<u32>,
    touched: Vec<VertexId>,
    queue: RadixQueue,
    statistics: WitnessStatistics,
}

impl DijkstraWitnessSearch {
    pub fn new(config: WitnessSearchConfig) -> DijkstraWitnessSearch {
        DijkstraWitnessSearch {
            config,
            ..Default::default()
        }
    }

    fn reset(&mut self, number_of_vertices: usize) {
        for vertex in self.touched.drain(..) {
            self.weights[vertex as usize] = INFINITY;
        }
        if self.weights.len() < number_of_vertices {
            self.weights.resize(number_of_vertices, INFINITY);
            self.hops.resize(number_of_vertices, 0);
        }
        self.queue.clear();
    }

    fn visit(&mut self, vertex: VertexId, weight: Weight, hops: u32) {
        if self.weights[vertex as usize] == INFINITY {
            self.touched.push(vertex);
        }
        self.weights[vertex as usize] = weight;
        self.hops[vertex as usize] = hops;
        self.queue.push(DijkstraQueueElement::new(weight, vertex));
    }

    fn search<G: DynamicGraph + ?Sized>(
        &mut self,
        graph: &G,
        from: VertexId,
        to: VertexId,
        via: VertexId,
        max_weight: Weight,
    ) -> bool {
        self.reset(graph.number_of_vertices() as usize);
        if from as usize >= self.weights.len() || to as usize >= self.weights.len() {
            return false;
        }

        self.visit(from, 0, 0);
        let mut settled = 0usize;
        let mut pruned_by_hops = false;

        while let Some(DijkstraQueueElement { weight, vertex }) = self.queue.pop() {
            if weight > self.weights[vertex as usize] {
                // stale entry
                continue;
            }
            if weight > max_weight {
                return false;
            }
            if vertex == to {
                return true;
            }

            settled += 1;
            if settled > self.config.max_settled_vertices {
                self.statistics.budget_exceeded += 1;
                trace!("witness search {from} -> {to} stopped after {settled} settled vertices");
                return false;
            }

            let Some(arcs) = graph.arcs(vertex) else {
                continue;
            };
            let next_hops = self.hops[vertex as usize].saturating_add(1);

            for arc in arcs.iter().filter(|arc| arc.data.forward()) {
                if arc.head == via {
                    continue;
                }
                let alternative_weight = weight.saturating_add(arc.data.weight());
                if alternative_weight > max_weight
                    || alternative_weight >= self.weights[arc.head as usize]
                {
                    continue;
                }
                if next_hops > self.config.max_hops {
                    pruned_by_hops = true;
                    continue;
                }
                self.visit(arc.head, alternative_weight, next_hops);
            }
        }

        if pruned_by_hops {
            self.statistics.budget_exceeded += 1;
        }
        false
    }
}

impl WitnessCalculator for DijkstraWitnessSearch {
    fn exists<G: DynamicGraph + ?Sized>(
        &mut self,
        graph: &G,
        from: VertexId,
        to: VertexId,
        via: VertexId,
        max_weight: Weight,
    ) -> bool {
        self.statistics.searches += 1;
        let found = self.search(graph, from, to, via, max_weight);
        if found {
            self.statistics.witnesses_found += 1;
        }
        found
    }

    fn statistics(&self) -> WitnessStatistics {
        self.statistics
    }

    fn record_statistics(&mut self, statistics: WitnessStatistics) {
        self.statistics.merge(statistics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{adjacency_vec_graph::AdjacencyVecGraph, edge::EdgeData};

    // 0 - 1 - 2 with a detour 0 - 3 - 4 - 2
    fn detour_graph(detour_weight: u32) -> AdjacencyVecGraph {
        AdjacencyVecGraph::from_edges(
            5,
            &[
                (0, 1, EdgeData::bidirectional(2)),
                (1, 2, EdgeData::bidirectional(2)),
                (0, 3, EdgeData::bidirectional(detour_weight)),
                (3, 4, EdgeData::bidirectional(detour_weight)),
                (4, 2, EdgeData::bidirectional(detour_weight)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn finds_witness_of_equal_weight() {
        let graph = detour_graph(1);
        let mut search = DijkstraWitnessSearch::new(WitnessSearchConfig::default());

        assert!(search.exists(&graph, 0, 2, 1, 3));
        assert!(!search.exists(&graph, 0, 2, 1, 2));
        // reused workspace must not leak the previous search
        assert!(!search.exists(&graph, 0, 2, 3, 3));
        assert_eq!(search.statistics().searches, 3);
        assert_eq!(search.statistics().witnesses_found, 1);
    }

    #[test]
    fn respects_one_way_records() {
        let graph = AdjacencyVecGraph::from_edges(
            3,
            &[
                (0, 1, EdgeData::bidirectional(1)),
                (1, 2, EdgeData::bidirectional(1)),
                (2, 0, EdgeData::new(1, true, false)),
            ],
        )
        .unwrap();
        let mut search = DijkstraWitnessSearch::new(WitnessSearchConfig::default());

        assert!(search.exists(&graph, 2, 0, 1, 1));
        assert!(!search.exists(&graph, 0, 2, 1, 10));
    }

    #[test]
    fn exhausted_hop_budget_means_no_witness() {
        let graph = detour_graph(1);
        let mut search = DijkstraWitnessSearch::new(WitnessSearchConfig {
            max_hops: 2,
            max_settled_vertices: 1_000,
        });

        assert!(!search.exists(&graph, 0, 2, 1, 10));
        assert_eq!(search.statistics().budget_exceeded, 1);
    }

    #[test]
    fn exhausted_settle_budget_means_no_witness() {
        let graph = detour_graph(1);
        let mut search = DijkstraWitnessSearch::new(WitnessSearchConfig {
            max_hops: 16,
            max_settled_vertices: 1,
        });

        assert!(!search.exists(&graph, 0, 2, 1, 10));
        assert_eq!(search.statistics().budget_exceeded, 1);
    }
}
