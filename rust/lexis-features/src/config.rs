//! Feature plans: an estimator described as a JSON document.
//!
//! ```json
//! {
//!   "normalize": true,
//!   "features": [
//!     { "orientation": "Complexity", "feature": { "kind": "length" } },
//!     { "orientation": "Simplicity",
//!       "feature": { "kind": "collocational", "language_model": "lm.arpa",
//!                    "left": 1, "right": 1 } }
//!   ]
//! }
//! ```
//!
//! Every orientation is checked before any resource is loaded.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FeatureError;
use crate::estimator::FeatureEstimator;
use crate::feature::FeatureSpec;
use crate::orientation::Orientation;
use crate::resource::ResourceFactory;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default)]
    pub normalize: bool,
    #[serde(default)]
    pub features: Vec<FeatureEntry>,
}

/// One feature of a plan. The orientation stays a string until the plan is
/// built so a bad value is reported as a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureEntry {
    pub orientation: String,
    pub feature: FeatureSpec,
}

impl EstimatorConfig {
    pub fn from_json(text: &str) -> Result<Self, FeatureError> {
        serde_json::from_str(text)
            .map_err(|e| FeatureError::configuration(format!("invalid feature plan: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FeatureError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            FeatureError::configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = EstimatorConfig::from_json(&text)?;
        debug!(path = %path.display(), features = config.features.len(), "read feature plan");
        Ok(config)
    }

    /// Parsed orientation of every entry, in order.
    pub fn orientations(&self) -> Result<Vec<Orientation>, FeatureError> {
        self.features
            .iter()
            .map(|entry| entry.orientation.parse())
            .collect()
    }
}

impl FeatureEstimator {
    /// Build an estimator from a plan, validating every orientation first.
    pub fn from_config(
        config: &EstimatorConfig,
        factory: impl ResourceFactory + 'static,
    ) -> Result<Self, FeatureError> {
        let orientations = config.orientations()?;
        let mut estimator = FeatureEstimator::new(factory).with_normalization(config.normalize);
        for (entry, orientation) in config.features.iter().zip(orientations) {
            estimator.add_feature(&entry.feature, orientation)?;
        }
        Ok(estimator)
    }
}
