use std::{fs::File, io::BufReader, path::Path};

use serde_derive::{Deserialize, Serialize};

use crate::{ch::priority_function::PriorityTerms, error::ConfigError};

/// Budget of a single witness search. Running out of budget means "no
/// witness", so tighter budgets trade more shortcuts for faster
/// preprocessing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WitnessSearchConfig {
    pub max_hops: u32,
    pub max_settled_vertices: usize,
}

impl Default for WitnessSearchConfig {
    fn default() -> Self {
        WitnessSearchConfig {
            max_hops: 16,
            max_settled_vertices: 1_000,
        }
    }
}

impl WitnessSearchConfig {
    pub fn unbounded() -> Self {
        WitnessSearchConfig {
            max_hops: u32::MAX,
            max_settled_vertices: usize::MAX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractionConfig {
    pub witness_search: WitnessSearchConfig,
    pub priority_terms: PriorityTerms,
    /// Re-simulate a vertex when it is popped and re-queue it if its priority
    /// got worse in the meantime.
    pub lazy_updates: bool,
    /// Compute priorities with rayon. Contractions themselves stay serial.
    pub parallel: bool,
    pub show_progress: bool,
}

impl Default for ContractionConfig {
    fn default() -> Self {
        ContractionConfig {
            witness_search: WitnessSearchConfig::default(),
            priority_terms: PriorityTerms::default(),
            lazy_updates: true,
            parallel: true,
            show_progress: true,
        }
    }
}

impl ContractionConfig {
    pub fn from_json_str(json: &str) -> Result<ContractionConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<ContractionConfig, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
