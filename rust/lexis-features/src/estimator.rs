//! The feature registry and vector assembler.
//!
//! ```rust,ignore
//! let mut estimator = FeatureEstimator::new(FileResourceFactory::new()).with_normalization(true);
//! estimator.add_feature(&FeatureSpec::Length, Orientation::Complexity)?;
//! estimator.add_feature(
//!     &FeatureSpec::Lexicon { lexicon: "simple-words.txt".into() },
//!     Orientation::Simplicity,
//! )?;
//!
//! let matrix = estimator.compute_corpus("lexmturk.txt", CorpusFormat::Victor)?;
//! assert_eq!(matrix.width(), 2);
//! ```

use std::path::Path;

use lexis_corpus::{Candidate, CorpusFormat, Instance, read_corpus};
use tracing::{debug, info};

use crate::batch::Batch;
use crate::error::FeatureError;
use crate::feature::{FeatureDescriptor, FeatureSpec};
use crate::matrix::{Column, FeatureMatrix};
use crate::orientation::Orientation;
use crate::resource::{Resource, ResourceCache, ResourceFactory};

/// An ordered set of features and the resources they share.
pub struct FeatureEstimator {
    descriptors: Vec<FeatureDescriptor>,
    resources: ResourceCache,
    factory: Box<dyn ResourceFactory>,
    normalize: bool,
}

impl FeatureEstimator {
    /// An estimator loading resources it has not seen through `factory`.
    pub fn new(factory: impl ResourceFactory + 'static) -> Self {
        FeatureEstimator {
            descriptors: Vec::new(),
            resources: ResourceCache::new(),
            factory: Box::new(factory),
            normalize: false,
        }
    }

    /// Divide every column of computed matrices by its Euclidean norm.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Register an already-loaded resource, e.g. a language model.
    pub fn register(&mut self, id: impl Into<String>, resource: Resource) -> &mut Self {
        self.resources.insert(id, resource);
        self
    }

    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    /// Append a feature, loading any resource it references that is not
    /// cached yet.
    pub fn add_feature(
        &mut self,
        spec: &FeatureSpec,
        orientation: Orientation,
    ) -> Result<&mut Self, FeatureError> {
        let strategy = spec.build(&mut self.resources, self.factory.as_ref())?;
        let descriptor = FeatureDescriptor::new(strategy, orientation);
        debug!(
            first_column = descriptor.columns.first().map(String::as_str).unwrap_or_default(),
            width = descriptor.width(),
            %orientation,
            "registered feature"
        );
        self.descriptors.push(descriptor);
        Ok(self)
    }

    pub fn descriptors(&self) -> &[FeatureDescriptor] {
        &self.descriptors
    }

    /// Every column the estimator emits, in order.
    pub fn columns(&self) -> Vec<Column> {
        self.descriptors
            .iter()
            .flat_map(|descriptor| {
                descriptor.columns.iter().map(|identifier| Column {
                    identifier: identifier.clone(),
                    orientation: descriptor.orientation,
                })
            })
            .collect()
    }

    /// Identifier of every column, in order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.descriptors
            .iter()
            .flat_map(|descriptor| descriptor.columns.iter().map(String::as_str))
            .collect()
    }

    pub fn width(&self) -> usize {
        self.descriptors.iter().map(FeatureDescriptor::width).sum()
    }

    /// Compute every feature over a batch of instances: one row per
    /// candidate, normalized if the estimator was configured to.
    pub fn compute_batch(&self, instances: &[Instance]) -> Result<FeatureMatrix, FeatureError> {
        let mut matrix = self.assemble(instances)?;
        if self.normalize {
            matrix.normalize_columns();
        }
        info!(
            instances = instances.len(),
            rows = matrix.len(),
            columns = matrix.width(),
            normalized = self.normalize,
            "computed feature matrix"
        );
        Ok(matrix)
    }

    /// Read a corpus file and compute its feature matrix.
    pub fn compute_corpus(
        &self,
        path: impl AsRef<Path>,
        format: CorpusFormat,
    ) -> Result<FeatureMatrix, FeatureError> {
        let instances = read_corpus(path, format)?;
        self.compute_batch(&instances)
    }

    /// Feature vector of a single unranked candidate, never normalized.
    pub fn compute_single(
        &self,
        sentence: &str,
        target: &str,
        head: usize,
        candidate: &str,
    ) -> Result<Vec<f64>, FeatureError> {
        let instance = Instance::new(
            Instance::tokenize(sentence),
            target.trim(),
            head,
            vec![Candidate::unranked(candidate.trim())],
        )?;
        let matrix = self.assemble(std::slice::from_ref(&instance))?;
        Ok(matrix.into_rows().into_iter().next().unwrap_or_default())
    }

    fn assemble(&self, instances: &[Instance]) -> Result<FeatureMatrix, FeatureError> {
        let mut batch = Batch::new(instances)?;
        let rows = batch.candidate_count();
        let outputs = self
            .descriptors
            .iter()
            .map(|descriptor| descriptor.compute(&mut batch))
            .collect::<Result<Vec<_>, _>>()?;
        batch.clear_cache();
        FeatureMatrix::assemble(&self.descriptors, outputs, rows)
    }
}

impl std::fmt::Debug for FeatureEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureEstimator")
            .field("descriptors", &self.descriptors)
            .field("resources", &self.resources)
            .field("normalize", &self.normalize)
            .finish_non_exhaustive()
    }
}
