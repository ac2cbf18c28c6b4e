use thiserror::Error;

use crate::graphs::VertexId;

/// Failures surfaced by the graph store and the contraction loop. Witness
/// searches running out of budget are not errors, they are answered with
/// "no witness".
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("vertex {vertex} is referenced but has no adjacency entry")]
    StructuralInconsistency { vertex: VertexId },

    #[error("edge {tail} -> {head} has invalid weight {weight}")]
    NegativeOrInvalidWeight {
        tail: VertexId,
        head: VertexId,
        weight: f64,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid priority terms `{0}`, expected e.g. `E:1_D:1_C:0`")]
    InvalidPriorityTerms(String),

    #[error("unable to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
