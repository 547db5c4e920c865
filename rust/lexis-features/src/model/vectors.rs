//! Word embeddings.

use std::collections::HashMap;

use crate::error::{FeatureError, LookupMiss};

/// A word-vector model.
pub trait WordVectors: Send + Sync {
    /// Dimensionality of every vector in the model.
    fn dimensions(&self) -> usize;

    /// The vector stored under `key`, if any.
    fn vector(&self, key: &str) -> Option<&[f64]>;

    /// Cosine similarity between two keys. Fails if either key is unknown.
    fn similarity(&self, a: &str, b: &str) -> Result<f64, LookupMiss> {
        let left = self.vector(a).ok_or_else(|| LookupMiss::new(a))?;
        let right = self.vector(b).ok_or_else(|| LookupMiss::new(b))?;
        Ok(cosine(left, right))
    }
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Word vectors held in memory.
#[derive(Debug, Clone, Default)]
pub struct VectorTable {
    dimensions: usize,
    vectors: HashMap<String, Vec<f64>>,
}

impl VectorTable {
    pub fn new(dimensions: usize) -> Self {
        VectorTable {
            dimensions,
            vectors: HashMap::new(),
        }
    }

    /// Store a vector, rejecting ones of the wrong dimensionality.
    pub fn insert(&mut self, key: impl Into<String>, vector: Vec<f64>) -> Result<(), FeatureError> {
        let key = key.into();
        if vector.len() != self.dimensions {
            return Err(FeatureError::configuration(format!(
                "vector for '{key}' has {} dimensions, model has {}",
                vector.len(),
                self.dimensions
            )));
        }
        self.vectors.insert(key, vector);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl WordVectors for VectorTable {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn vector(&self, key: &str) -> Option<&[f64]> {
        self.vectors.get(key).map(Vec::as_slice)
    }
}
