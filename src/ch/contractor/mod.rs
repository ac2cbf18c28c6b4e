use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use itertools::Itertools;
use log::{debug, info, trace};
use rayon::prelude::*;

use self::{
    contraction_helper::{simulate_contraction, Simulation},
    witness_search::{WitnessCalculator, WitnessStatistics},
};
use super::{
    priority_function::{edge_difference::EdgeDifferenceCalculator, Priority},
    priority_queue::ContractionQueue,
    ContractionHierarchy, Level, Shortcut,
};
use crate::{
    config::ContractionConfig,
    error::GraphError,
    graphs::{edge::EdgeData, DynamicGraph, VertexId},
    utility::get_progressbar,
};

pub mod contraction_helper;
pub mod witness_search;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexState {
    /// Only while `Contractor::new` computes the initial priorities, every
    /// vertex is `Queued` once it returns.
    Uncontracted,
    Queued,
    Contracted(Level),
}

/// Contracts one vertex at a time, always the one with minimum priority.
/// The loop can be stopped between two contractions and resumed later.
pub struct Contractor<G: DynamicGraph, W: WitnessCalculator> {
    graph: G,
    witness: W,
    config: ContractionConfig,
    calculator: EdgeDifferenceCalculator,
    queue: ContractionQueue,
    states: Vec<VertexState>,
    level_to_vertex: Vec<VertexId>,
    shortcuts: Vec<Shortcut>,
}

impl<G: DynamicGraph, W: WitnessCalculator> Contractor<G, W> {
    /// Validates the graph and queues every vertex with its initial priority.
    pub fn new(graph: G, witness: W, config: ContractionConfig) -> Result<Self, GraphError> {
        validate_structure(&graph)?;

        let number_of_vertices = graph.number_of_vertices();
        let calculator = EdgeDifferenceCalculator::new(number_of_vertices, config.priority_terms);

        let mut contractor = Contractor {
            graph,
            witness,
            config,
            calculator,
            queue: ContractionQueue::new(),
            states: vec![VertexState::Uncontracted; number_of_vertices as usize],
            level_to_vertex: Vec::new(),
            shortcuts: Vec::new(),
        };
        contractor.initialize()?;

        Ok(contractor)
    }

    fn initialize(&mut self) -> Result<(), GraphError> {
        info!(
            "Initializing queue for {} vertices with priority terms {}",
            self.graph.number_of_vertices(),
            self.config.priority_terms
        );

        let vertices = self.graph.vertices().collect_vec();
        let bar = get_progressbar(
            "Initializing queue",
            vertices.len() as u64,
            self.config.show_progress,
        );
        let priorities = if self.config.parallel && vertices.len() > 1 {
            self.parallel_priorities(&vertices, bar)?
        } else {
            self.priorities(&vertices, bar)?
        };
        for (vertex, priority) in priorities {
            self.queue.push(vertex, priority);
            self.states[vertex as usize] = VertexState::Queued;
        }

        Ok(())
    }

    /// Every rayon worker gets its own copy of the witness workspace, their
    /// search counts are merged back afterwards.
    fn parallel_priorities(
        &mut self,
        vertices: &[VertexId],
        bar: ProgressBar,
    ) -> Result<Vec<(VertexId, Priority)>, GraphError> {
        let graph = &self.graph;
        let calculator = &self.calculator;
        let witness = &self.witness;

        let results = vertices
            .par_iter()
            .progress_with(bar)
            .map_init(
                || witness.clone(),
                |witness, &vertex| {
                    let before = witness.statistics();
                    calculator
                        .calculate(graph, witness, vertex)
                        .map(|priority| (vertex, priority, witness.statistics().since(&before)))
                },
            )
            .collect::<Result<Vec<_>, GraphError>>()?;

        let mut statistics = WitnessStatistics::default();
        let priorities = results
            .into_iter()
            .map(|(vertex, priority, searched)| {
                statistics.merge(searched);
                (vertex, priority)
            })
            .collect_vec();
        self.witness.record_statistics(statistics);

        Ok(priorities)
    }

    /// Priorities of `vertices` in the current graph, computed on the shared
    /// witness workspace.
    fn priorities(
        &mut self,
        vertices: &[VertexId],
        bar: ProgressBar,
    ) -> Result<Vec<(VertexId, Priority)>, GraphError> {
        let graph = &self.graph;
        let calculator = &self.calculator;
        let witness = &mut self.witness;
        vertices
            .iter()
            .progress_with(bar)
            .map(|&vertex| {
                calculator
                    .calculate(graph, witness, vertex)
                    .map(|priority| (vertex, priority))
            })
            .collect()
    }

    /// Pops and contracts the vertex of minimum priority. Returns `None` once
    /// every vertex is contracted.
    pub fn contract_next(&mut self) -> Result<Option<VertexId>, GraphError> {
        while let Some(element) = self.queue.pop() {
            let vertex = element.vertex;
            let simulation = simulate_contraction(&self.graph, &mut self.witness, vertex);
            let simulation = self.requeue_on_error(vertex, element.priority, simulation)?;
            let priority = self.calculator.priority(vertex, &simulation);

            if self.config.lazy_updates && priority > element.priority {
                trace!(
                    "re-queueing {} with priority {} instead of {}",
                    vertex,
                    priority,
                    element.priority
                );
                self.queue.push(vertex, priority);
                continue;
            }

            let committed = self.commit(vertex, simulation);
            self.requeue_on_error(vertex, priority, committed)?;
            return Ok(Some(vertex));
        }

        Ok(None)
    }

    /// Contracts `vertex` regardless of its priority. Returns `false` if the
    /// vertex is not waiting in the queue.
    pub fn contract_vertex(&mut self, vertex: VertexId) -> Result<bool, GraphError> {
        match self.states.get(vertex as usize) {
            None => return Err(GraphError::StructuralInconsistency { vertex }),
            Some(VertexState::Queued) => {}
            Some(_) => return Ok(false),
        }

        let Some(priority) = self.queue.remove(vertex) else {
            return Err(GraphError::StructuralInconsistency { vertex });
        };
        let simulation = simulate_contraction(&self.graph, &mut self.witness, vertex);
        let simulation = self.requeue_on_error(vertex, priority, simulation)?;
        let committed = self.commit(vertex, simulation);
        self.requeue_on_error(vertex, priority, committed)?;
        Ok(true)
    }

    /// A vertex that failed before its level was assigned goes back into the
    /// queue, so a resumed loop does not skip it.
    fn requeue_on_error<T>(
        &mut self,
        vertex: VertexId,
        priority: Priority,
        result: Result<T, GraphError>,
    ) -> Result<T, GraphError> {
        if result.is_err() && self.state(vertex) == Some(VertexState::Queued) {
            self.queue.push(vertex, priority);
        }
        result
    }

    /// Runs the loop until every vertex is contracted.
    pub fn contract_all(&mut self) -> Result<(), GraphError> {
        let bar = get_progressbar(
            "Contracting",
            self.queue.len() as u64,
            self.config.show_progress,
        );

        info!("Start contracting {} vertices", self.queue.len());
        while self.contract_next()?.is_some() {
            bar.inc(1);
        }
        bar.finish_and_clear();

        let statistics = self.witness.statistics();
        info!(
            "Finished contracting: {} shortcuts, {} witness searches ({} witnesses, {} over budget)",
            self.shortcuts.len(),
            statistics.searches,
            statistics.witnesses_found,
            statistics.budget_exceeded
        );

        Ok(())
    }

    /// Contracts the remaining vertices and hands out the hierarchy.
    pub fn contract(mut self) -> Result<ContractionHierarchy<G>, GraphError> {
        self.contract_all()?;

        let levels = self
            .states
            .iter()
            .enumerate()
            .map(|(vertex, state)| match state {
                VertexState::Contracted(level) => Ok(*level),
                _ => Err(GraphError::StructuralInconsistency {
                    vertex: vertex as VertexId,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ContractionHierarchy::new(
            self.graph,
            levels,
            self.level_to_vertex,
            self.shortcuts,
        ))
    }

    fn commit(&mut self, vertex: VertexId, simulation: Simulation) -> Result<(), GraphError> {
        let number_of_shortcuts = self.shortcuts.len();
        for shortcut in simulation.shortcuts {
            let edge = &shortcut.edge;
            let data = EdgeData::shortcut(edge.weight(), true, false, vertex);
            if self.graph.add_edge(edge.tail(), edge.head(), data)? {
                self.shortcuts.push(shortcut);
            }
        }

        let neighbors = self
            .graph
            .neighbors(vertex)?
            .iter()
            .map(|arc| arc.head)
            .unique()
            .collect_vec();

        self.calculator.notify_contracted(&self.graph, vertex)?;

        // The contracted vertex keeps its own records, they all point upwards.
        for &neighbor in neighbors.iter() {
            self.graph.remove_arcs(neighbor, vertex)?;
        }

        let level = self.level_to_vertex.len() as Level;
        self.states[vertex as usize] = VertexState::Contracted(level);
        self.level_to_vertex.push(vertex);
        debug!(
            "contracted {} at level {} adding {} shortcuts",
            vertex,
            level,
            self.shortcuts.len() - number_of_shortcuts
        );

        let queued_neighbors = neighbors
            .into_iter()
            .filter(|&neighbor| self.state(neighbor) == Some(VertexState::Queued))
            .collect_vec();
        let priorities = self.priorities(&queued_neighbors, ProgressBar::hidden())?;
        for (neighbor, priority) in priorities {
            self.queue.push(neighbor, priority);
        }

        Ok(())
    }

    pub fn state(&self, vertex: VertexId) -> Option<VertexState> {
        self.states.get(vertex as usize).copied()
    }

    pub fn level(&self, vertex: VertexId) -> Option<Level> {
        match self.state(vertex)? {
            VertexState::Contracted(level) => Some(level),
            _ => None,
        }
    }

    pub fn queued_priority(&self, vertex: VertexId) -> Option<Priority> {
        self.queue.priority(vertex)
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn calculator(&self) -> &EdgeDifferenceCalculator {
        &self.calculator
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    pub fn witness_calculator(&self) -> &W {
        &self.witness
    }
}

/// Every vertex needs an adjacency entry and every record has to point at
/// an existing vertex.
fn validate_structure<G: DynamicGraph>(graph: &G) -> Result<(), GraphError> {
    for vertex in graph.vertices() {
        for arc in graph.neighbors(vertex)? {
            if graph.arcs(arc.head).is_none() {
                return Err(GraphError::StructuralInconsistency { vertex: arc.head });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{witness_search::NoWitness, *};
    use crate::graphs::{edge::EdgeData, hash_graph::HashGraph};

    // 0 - 1 - 2 - 3 - 0, weight 1 everywhere
    fn cycle_contractor() -> Contractor<HashGraph, NoWitness> {
        let mut graph = HashGraph::with_vertices(4);
        for (tail, head) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            graph
                .add_edge(tail, head, EdgeData::bidirectional(1))
                .unwrap();
        }
        let config = ContractionConfig {
            show_progress: false,
            ..ContractionConfig::default()
        };
        Contractor::new(graph, NoWitness, config).unwrap()
    }

    #[test]
    fn failed_pop_keeps_vertex_queued() {
        let mut contractor = cycle_contractor();
        let priority = contractor.queued_priority(0);
        contractor.graph.detach_entry(1);

        assert_eq!(
            contractor.contract_next(),
            Err(GraphError::StructuralInconsistency { vertex: 1 })
        );
        assert_eq!(contractor.state(0), Some(VertexState::Queued));
        assert_eq!(contractor.queued_priority(0), priority);
        assert_eq!(contractor.remaining(), 4);
    }

    #[test]
    fn failed_forced_contraction_keeps_vertex_queued() {
        let mut contractor = cycle_contractor();
        let priority = contractor.queued_priority(3);
        contractor.graph.detach_entry(2);

        assert_eq!(
            contractor.contract_vertex(3),
            Err(GraphError::StructuralInconsistency { vertex: 2 })
        );
        assert_eq!(contractor.state(3), Some(VertexState::Queued));
        assert_eq!(contractor.queued_priority(3), priority);
        assert_eq!(contractor.remaining(), 4);
    }
}
