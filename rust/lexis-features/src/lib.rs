//! # Lexis Features: feature vectors for substitution candidates
//!
//! Turns a corpus of (sentence, target, candidates) instances into a numeric
//! matrix with one row per candidate, for ranking and selection models of
//! lexical simplification.
//!
//! ## Core Ideas
//!
//! - **Features are strategies**: each feature kind is a [`FeatureSpec`]
//!   that builds a [`Feature`] over shared resources. The estimator never
//!   looks inside one.
//! - **Resources are loaded once**: language models, word vectors, taggers
//!   and lexical databases are cached by kind and identifier for the life of
//!   the estimator.
//! - **Batches amortize tagging**: a feature needing tags asks the
//!   [`Batch`]; the first request tags every sentence, later ones reuse it,
//!   and the cache dies with the batch.
//! - **Windows are explicit**: collocational features are built on the
//!   [`window`] engine, which fixes n-gram text, boundary flags and sweep
//!   order in one place.
//!
//! ## Architecture
//!
//! ```text
//! corpus lines → Instances → Batch
//!   → FeatureDescriptor::compute (per feature, whole batch)
//!     → FeatureMatrix::assemble (registration order)
//!       → optional column normalization
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod estimator;
pub mod feature;
pub mod loader;
pub mod matrix;
pub mod model;
pub mod orientation;
pub mod resource;
pub mod tags;
pub mod value;
pub mod window;

pub use batch::{Batch, EphemeralCache};
pub use config::{EstimatorConfig, FeatureEntry};
pub use error::{FeatureError, LookupMiss};
pub use estimator::FeatureEstimator;
pub use feature::{Feature, FeatureDescriptor, FeatureSpec};
pub use loader::FileResourceFactory;
pub use matrix::{Column, FeatureMatrix};
pub use orientation::Orientation;
pub use resource::{Preloaded, Resource, ResourceCache, ResourceFactory, ResourceKey, ResourceKind};
pub use tags::TagSet;
pub use value::FeatureValue;
