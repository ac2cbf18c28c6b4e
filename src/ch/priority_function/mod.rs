use std::{fmt, str::FromStr};

use serde_derive::{Deserialize, Serialize};

use crate::error::ConfigError;

pub mod edge_difference;

pub type Priority = i32;

/// Coefficients of the terms summed into a vertex priority:
/// `E` edge difference, `D` depth, `C` number of contracted neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PriorityTerms {
    pub edge_difference: i32,
    pub depth: i32,
    pub contracted_neighbors: i32,
}

impl Default for PriorityTerms {
    fn default() -> Self {
        PriorityTerms::new(1, 1, 0)
    }
}

impl PriorityTerms {
    pub fn new(edge_difference: i32, depth: i32, contracted_neighbors: i32) -> PriorityTerms {
        PriorityTerms {
            edge_difference,
            depth,
            contracted_neighbors,
        }
    }

    /// Decodes strings like `E:1_D:1_C:0`. Letters left out get coefficient 0.
    pub fn decode(priority_terms: &str) -> Result<PriorityTerms, ConfigError> {
        let invalid = || ConfigError::InvalidPriorityTerms(priority_terms.to_string());

        let mut terms = PriorityTerms::new(0, 0, 0);
        let mut seen = Vec::new();

        for term in priority_terms.trim().split('_') {
            let (letter, coefficient) = term.split_once(':').ok_or_else(invalid)?;
            let coefficient = coefficient.trim().parse::<i32>().map_err(|_| invalid())?;
            let letter = letter.trim();
            if seen.contains(&letter) {
                return Err(invalid());
            }
            seen.push(letter);

            match letter {
                "E" => terms.edge_difference = coefficient,
                "D" => terms.depth = coefficient,
                "C" => terms.contracted_neighbors = coefficient,
                _ => return Err(invalid()),
            }
        }

        Ok(terms)
    }
}

impl FromStr for PriorityTerms {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriorityTerms::decode(s)
    }
}

impl TryFrom<String> for PriorityTerms {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PriorityTerms::decode(&value)
    }
}

impl From<PriorityTerms> for String {
    fn from(terms: PriorityTerms) -> Self {
        terms.to_string()
    }
}

impl fmt::Display for PriorityTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "E:{}_D:{}_C:{}",
            self.edge_difference, self.depth, self.contracted_neighbors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_terms() {
        assert_eq!(
            PriorityTerms::decode("E:1_D:1_C:0").unwrap(),
            PriorityTerms::default()
        );
        assert_eq!(
            PriorityTerms::decode("C:3_E:-2").unwrap(),
            PriorityTerms::new(-2, 0, 3)
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(PriorityTerms::decode("").is_err());
        assert!(PriorityTerms::decode("E1").is_err());
        assert!(PriorityTerms::decode("E:x").is_err());
        assert!(PriorityTerms::decode("Q:1").is_err());
        assert!(PriorityTerms::decode("E:1_E:2").is_err());
    }

    #[test]
    fn display_round_trips_through_decode() {
        let terms = PriorityTerms::new(3, 0, 2);
        assert_eq!(terms.to_string().parse::<PriorityTerms>().unwrap(), terms);
    }
}
