//! Contraction hierarchy preprocessing for weighted road networks: vertex
//! ordering by edge difference, witness searches deciding which shortcuts are
//! needed, and the contraction loop mutating a [`graphs::DynamicGraph`] into
//! its hierarchical form.

pub mod ch;
pub mod config;
pub mod error;
pub mod graphs;
pub mod queue;
pub mod utility;

pub use ch::{contractor::Contractor, ContractionHierarchy};
pub use config::{ContractionConfig, WitnessSearchConfig};
pub use error::{ConfigError, GraphError};
