//! Feature orientation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// Whether larger values of a feature mean a more complex or a simpler
/// candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Complexity,
    Simplicity,
}

impl FromStr for Orientation {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "complexity" => Ok(Orientation::Complexity),
            "simplicity" => Ok(Orientation::Simplicity),
            _ => Err(FeatureError::configuration(format!(
                "orientation must be Complexity or Simplicity, got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Complexity => write!(f, "Complexity"),
            Orientation::Simplicity => write!(f, "Simplicity"),
        }
    }
}
