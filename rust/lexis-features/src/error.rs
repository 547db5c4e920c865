//! Error types for feature estimation.

use lexis_corpus::CorpusError;
use thiserror::Error;

use crate::resource::ResourceKey;

#[derive(Debug, Error)]
pub enum FeatureError {
    /// Invalid orientation, unknown feature parameters or a malformed
    /// feature plan. Always reported before any computation starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An external model or table could not be loaded or queried.
    #[error("failed to load {resource}: {reason}")]
    ResourceLoad { resource: String, reason: String },

    /// A feature emitted a different number of rows or columns than it
    /// declared.
    #[error("feature '{feature}' produced {found} values where {expected} were expected")]
    OutputWidth {
        feature: String,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

impl FeatureError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        FeatureError::Configuration(reason.into())
    }

    pub(crate) fn resource(key: &ResourceKey, reason: impl ToString) -> Self {
        FeatureError::ResourceLoad {
            resource: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A word (or n-gram, or vector key) that a resource does not know.
///
/// Lookups return this instead of failing the batch; every feature that
/// consults a resource degrades it to a documented default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{word}' is not known to the resource")]
pub struct LookupMiss {
    pub word: String,
}

impl LookupMiss {
    pub fn new(word: impl Into<String>) -> Self {
        LookupMiss { word: word.into() }
    }
}
