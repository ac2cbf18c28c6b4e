#![allow(dead_code)]

use std::{cmp::Reverse, collections::BinaryHeap};

use rand::{rngs::StdRng, Rng, SeedableRng};
use road_ch::{
    graphs::{
        adjacency_vec_graph::AdjacencyVecGraph, edge::EdgeData, spatial::Coordinate,
        DynamicGraph, VertexId, Weight,
    },
    ContractionConfig, ContractionHierarchy,
};

/// Directed `(tail, head, weight)` triples in travel direction.
pub type EdgeList = Vec<(VertexId, VertexId, Weight)>;

pub fn test_config() -> ContractionConfig {
    ContractionConfig {
        show_progress: false,
        ..ContractionConfig::default()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// https://jlazarsfeld.github.io/ch.150.project/img/contraction/contract-full-1.png
pub fn small_graph() -> (AdjacencyVecGraph, EdgeList) {
    let undirected = [
        (0, 1, 3),
        (0, 2, 5),
        (0, 10, 3),
        (1, 2, 3),
        (1, 3, 5),
        (2, 3, 2),
        (2, 9, 2),
        (3, 4, 7),
        (3, 9, 4),
        (4, 5, 6),
        (4, 9, 3),
        (5, 6, 4),
        (5, 7, 2),
        (6, 7, 3),
        (6, 8, 5),
        (7, 8, 3),
        (7, 9, 2),
        (8, 9, 4),
        (8, 10, 6),
        (9, 10, 3),
    ];

    let mut graph = AdjacencyVecGraph::with_vertices(11);
    let mut edges = Vec::new();
    for (tail, head, weight) in undirected {
        graph
            .add_edge(tail, head, EdgeData::bidirectional(weight))
            .unwrap();
        edges.push((tail, head, weight));
        edges.push((head, tail, weight));
    }
    (graph, edges)
}

/// Random road-like graph on a jittered grid with some one-way streets.
pub fn random_graph(seed: u64, number_of_vertices: u32, number_of_edges: usize) -> (AdjacencyVecGraph, EdgeList) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = AdjacencyVecGraph::new();
    for _ in 0..number_of_vertices {
        let coordinate = Coordinate::new(rng.gen_range(48.0..49.0), rng.gen_range(9.0..10.0));
        graph.add_vertex(Some(coordinate));
    }

    let mut edges = Vec::new();
    for _ in 0..number_of_edges {
        let tail = rng.gen_range(0..number_of_vertices);
        let head = rng.gen_range(0..number_of_vertices);
        if tail == head {
            continue;
        }
        let weight = rng.gen_range(1..100);
        let one_way = rng.gen_bool(0.2);

        graph
            .add_edge(tail, head, EdgeData::new(weight, true, !one_way))
            .unwrap();
        edges.push((tail, head, weight));
        if !one_way {
            edges.push((head, tail, weight));
        }
    }
    (graph, edges)
}

/// Plain Dijkstra on the original edges, the reference for every distance.
pub fn dijkstra(
    number_of_vertices: u32,
    edges: &EdgeList,
    source: VertexId,
    target: VertexId,
) -> Option<Weight> {
    let mut adjacency = vec![Vec::new(); number_of_vertices as usize];
    for &(tail, head, weight) in edges {
        adjacency[tail as usize].push((head, weight));
    }

    let mut distances = vec![Weight::MAX; number_of_vertices as usize];
    let mut queue = BinaryHeap::new();
    distances[source as usize] = 0;
    queue.push(Reverse((0, source)));

    while let Some(Reverse((distance, vertex))) = queue.pop() {
        if vertex == target {
            return Some(distance);
        }
        if distance > distances[vertex as usize] {
            continue;
        }
        for &(head, weight) in &adjacency[vertex as usize] {
            let alternative = distance + weight;
            if alternative < distances[head as usize] {
                distances[head as usize] = alternative;
                queue.push(Reverse((alternative, head)));
            }
        }
    }

    None
}

fn upward_search<G: DynamicGraph>(
    hierarchy: &ContractionHierarchy<G>,
    source: VertexId,
    forward: bool,
) -> Vec<Weight> {
    let number_of_vertices = hierarchy.graph().number_of_vertices() as usize;
    let mut distances = vec![Weight::MAX; number_of_vertices];
    let mut queue = BinaryHeap::new();
    distances[source as usize] = 0;
    queue.push(Reverse((0, source)));

    while let Some(Reverse((distance, vertex))) = queue.pop() {
        if distance > distances[vertex as usize] {
            continue;
        }
        for arc in hierarchy.upward_arcs(vertex) {
            let usable = if forward {
                arc.data.forward()
            } else {
                arc.data.backward()
            };
            if !usable {
                continue;
            }
            let alternative = distance + arc.data.weight();
            if alternative < distances[arc.head as usize] {
                distances[arc.head as usize] = alternative;
                queue.push(Reverse((alternative, arc.head)));
            }
        }
    }

    distances
}

/// Bidirectional upward search on the contracted graph.
pub fn ch_distance<G: DynamicGraph>(
    hierarchy: &ContractionHierarchy<G>,
    source: VertexId,
    target: VertexId,
) -> Option<Weight> {
    let forward = upward_search(hierarchy, source, true);
    let backward = upward_search(hierarchy, target, false);

    forward
        .iter()
        .zip(backward.iter())
        .filter(|&(&f, &b)| f != Weight::MAX && b != Weight::MAX)
        .map(|(&f, &b)| f + b)
        .min()
}

pub fn assert_distances_preserved<G: DynamicGraph>(
    hierarchy: &ContractionHierarchy<G>,
    edges: &EdgeList,
) {
    let number_of_vertices = hierarchy.graph().number_of_vertices();
    for source in 0..number_of_vertices {
        for target in 0..number_of_vertices {
            assert_eq!(
                ch_distance(hierarchy, source, target),
                dijkstra(number_of_vertices, edges, source, target),
                "distance {} -> {}",
                source,
                target
            );
        }
    }
}
