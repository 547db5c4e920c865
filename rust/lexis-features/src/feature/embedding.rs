//! Word-embedding features: similarity to the target and raw vector sums.

use std::sync::Arc;

use tracing::trace;

use crate::batch::Batch;
use crate::error::{FeatureError, LookupMiss};
use crate::model::{PosTagger, WordVectors};
use crate::resource::ResourceKey;
use crate::tags::TagSet;
use crate::value::FeatureValue;

use super::Feature;

/// Similarity between `target` and `word`, retrying with the word
/// lower-cased.
fn similarity_with_retry(
    model: &dyn WordVectors,
    target: &str,
    word: &str,
    key: impl Fn(&str) -> String,
) -> Result<f64, LookupMiss> {
    let target = key(target);
    model
        .similarity(&target, &key(word))
        .or_else(|_| model.similarity(&target, &key(&word.to_lowercase())))
}

/// Mean similarity over the candidate's words. Unknown words count 0 but
/// still count towards the divisor.
fn mean_similarity<'w>(
    model: &dyn WordVectors,
    target: &str,
    words: impl Iterator<Item = &'w str>,
    key: impl Fn(&str) -> String,
) -> f64 {
    let (total, count) = words.fold((0.0, 0usize), |(total, count), word| {
        let similarity = similarity_with_retry(model, target, word, &key).unwrap_or_else(|miss| {
            trace!(word = %miss.word, "no vector, similarity counts as 0");
            0.0
        });
        (total + similarity, count + 1)
    });
    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Mean similarity between the lower-cased target and each candidate word.
pub struct WordVectorSimilarity {
    id: String,
    model: Arc<dyn WordVectors>,
}

impl WordVectorSimilarity {
    pub fn new(id: impl Into<String>, model: Arc<dyn WordVectors>) -> Self {
        WordVectorSimilarity { id: id.into(), model }
    }
}

impl Feature for WordVectorSimilarity {
    fn columns(&self) -> Vec<String> {
        vec![format!("Word Vector Similarity (Model: {})", self.id)]
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        Ok(batch
            .candidates()
            .map(|(instance, candidate)| {
                let target = instance.target.trim().to_lowercase();
                let similarity = mean_similarity(
                    self.model.as_ref(),
                    &target,
                    candidate.words(),
                    str::to_string,
                );
                FeatureValue::Scalar(similarity)
            })
            .collect())
    }
}

/// Word-vector similarity over POS-annotated keys, `word|||TAG`, where TAG
/// is the tag of the sentence's head token.
pub struct TaggedWordVectorSimilarity {
    id: String,
    model: Arc<dyn WordVectors>,
    tagger_key: ResourceKey,
    tagger: Arc<dyn PosTagger>,
    tag_set: TagSet,
}

impl TaggedWordVectorSimilarity {
    pub fn new(
        id: impl Into<String>,
        model: Arc<dyn WordVectors>,
        tagger_key: ResourceKey,
        tagger: Arc<dyn PosTagger>,
        tag_set: TagSet,
    ) -> Self {
        TaggedWordVectorSimilarity {
            id: id.into(),
            model,
            tagger_key,
            tagger,
            tag_set,
        }
    }
}

impl Feature for TaggedWordVectorSimilarity {
    fn columns(&self) -> Vec<String> {
        vec![format!(
            "Word Vector Similarity (Model: {}) (POS Model: {}) (POS Type: {})",
            self.id, self.tagger_key.id, self.tag_set
        )]
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        let tags = batch.tags(&self.tagger_key, self.tagger.as_ref(), self.tag_set)?;

        let mut values = Vec::with_capacity(batch.candidate_count());
        for (index, instance) in batch.instances().iter().enumerate() {
            let target = instance.target.trim().to_lowercase();
            let tag = &tags[index][instance.head];
            let annotate = |word: &str| format!("{word}|||{tag}");
            for candidate in &instance.candidates {
                values.push(FeatureValue::Scalar(mean_similarity(
                    self.model.as_ref(),
                    &target,
                    candidate.words(),
                    annotate,
                )));
            }
        }
        Ok(values)
    }
}

/// The per-dimension sum of the candidate words' vectors. Words the model
/// does not know, even lower-cased, contribute nothing.
pub struct WordVectorValues {
    id: String,
    model: Arc<dyn WordVectors>,
    size: usize,
}

impl WordVectorValues {
    /// Fails unless `size` is the model's dimensionality.
    pub fn new(
        id: impl Into<String>,
        model: Arc<dyn WordVectors>,
        size: usize,
    ) -> Result<Self, FeatureError> {
        let id = id.into();
        if model.dimensions() != size {
            return Err(FeatureError::configuration(format!(
                "word vector values of '{id}' declared {size} dimensions, model has {}",
                model.dimensions()
            )));
        }
        Ok(WordVectorValues { id, model, size })
    }
}

impl Feature for WordVectorValues {
    fn columns(&self) -> Vec<String> {
        (0..self.size)
            .map(|i| format!("Word Vector Value {i} (Model: {})", self.id))
            .collect()
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        Ok(batch
            .candidates()
            .map(|(_, candidate)| {
                let mut sum = vec![0.0; self.size];
                for word in candidate.words() {
                    let vector = self
                        .model
                        .vector(word)
                        .or_else(|| self.model.vector(&word.to_lowercase()));
                    match vector {
                        Some(vector) => {
                            sum.iter_mut().zip(vector).for_each(|(total, v)| *total += v)
                        }
                        None => trace!(word, "no vector, contributes nothing"),
                    }
                }
                FeatureValue::Vector(sum)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LexiconTagger, VectorTable};
    use crate::resource::ResourceKind;
    use lexis_corpus::{CorpusFormat, Instance, parse_corpus};

    fn instances() -> Vec<Instance> {
        parse_corpus(
            "They Ran fast\tFast\t2\t1:Quick\t2:very rapid",
            CorpusFormat::Victor,
        )
        .unwrap()
    }

    fn vectors() -> Arc<VectorTable> {
        let mut table = VectorTable::new(2);
        table.insert("fast", vec![1.0, 0.0]).unwrap();
        table.insert("quick", vec![1.0, 0.0]).unwrap();
        table.insert("rapid", vec![0.0, 1.0]).unwrap();
        table.insert("fast|||J", vec![1.0, 1.0]).unwrap();
        table.insert("quick|||J", vec![1.0, 1.0]).unwrap();
        Arc::new(table)
    }

    #[test]
    fn similarity_retries_lowercase_and_averages_over_all_words() {
        let instances = instances();
        let feature = WordVectorSimilarity::new("w2v", vectors());
        let values = feature.compute(&mut Batch::new(&instances).unwrap()).unwrap();

        assert_eq!(values[0], FeatureValue::Scalar(1.0));
        // "very" is unknown: 0 similarity, still in the divisor.
        assert_eq!(values[1], FeatureValue::Scalar(0.0));
    }

    #[test]
    fn tagged_similarity_uses_the_head_tag() {
        let instances = instances();
        let feature = TaggedWordVectorSimilarity::new(
            "w2v",
            vectors(),
            ResourceKey::new(ResourceKind::Tagger, "lexicon"),
            Arc::new(LexiconTagger::new("NN").with_tag("fast", "JJ")),
            TagSet::Paetzold,
        );
        let values = feature.compute(&mut Batch::new(&instances).unwrap()).unwrap();
        let FeatureValue::Scalar(similarity) = values[0] else {
            panic!("expected a scalar, got {:?}", values[0]);
        };
        assert!((similarity - 1.0).abs() < 1e-12);
        assert!(feature.columns()[0].ends_with("(POS Type: paetzold)"));
    }

    #[test]
    fn vector_values_sum_known_words() {
        let instances = instances();
        let feature = WordVectorValues::new("w2v", vectors(), 2).unwrap();
        let values = feature.compute(&mut Batch::new(&instances).unwrap()).unwrap();

        assert_eq!(feature.columns().len(), 2);
        assert_eq!(values[0], FeatureValue::Vector(vec![1.0, 0.0]));
        assert_eq!(values[1], FeatureValue::Vector(vec![0.0, 1.0]));
    }

    #[test]
    fn vector_values_size_must_match_model() {
        assert!(matches!(
            WordVectorValues::new("w2v", vectors(), 300),
            Err(FeatureError::Configuration(_))
        ));
    }
}
