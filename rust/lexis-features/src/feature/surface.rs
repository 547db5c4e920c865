//! Features read off the candidate surface and the tables keyed by it.

use std::sync::Arc;

use crate::batch::Batch;
use crate::error::FeatureError;
use crate::model::{Lexicon, Syllabifier, TranslationTable, syllable_count};
use crate::resource::ResourceKey;
use crate::value::FeatureValue;

use super::Feature;

/// Characters in the candidate surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthFeature;

impl Feature for LengthFeature {
    fn columns(&self) -> Vec<String> {
        vec!["Word Length".to_string()]
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        Ok(batch
            .candidates()
            .map(|(_, candidate)| FeatureValue::Scalar(candidate.surface.chars().count() as f64))
            .collect())
    }
}

/// 1 when every word of the candidate is in the lexicon, else 0.
pub struct LexiconFeature {
    id: String,
    lexicon: Arc<Lexicon>,
}

impl LexiconFeature {
    pub fn new(id: impl Into<String>, lexicon: Arc<Lexicon>) -> Self {
        LexiconFeature {
            id: id.into(),
            lexicon,
        }
    }
}

impl Feature for LexiconFeature {
    fn columns(&self) -> Vec<String> {
        vec![format!("Lexicon Occurrence (Lexicon: {})", self.id)]
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        Ok(batch
            .candidates()
            .map(|(_, candidate)| {
                let known = candidate.words().all(|word| self.lexicon.contains(word));
                FeatureValue::Scalar(if known { 1.0 } else { 0.0 })
            })
            .collect())
    }
}

/// Product over the candidate's words of P(word | target). A word the
/// table has no entry for makes the product 0.
pub struct TranslationProbability {
    id: String,
    table: Arc<TranslationTable>,
}

impl TranslationProbability {
    pub fn new(id: impl Into<String>, table: Arc<TranslationTable>) -> Self {
        TranslationProbability { id: id.into(), table }
    }
}

impl Feature for TranslationProbability {
    fn columns(&self) -> Vec<String> {
        vec![format!("Translation Probability (File: {})", self.id)]
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        Ok(batch
            .candidates()
            .map(|(instance, candidate)| {
                let target = instance.target.trim();
                let probability: Option<f64> = candidate
                    .words()
                    .map(|word| self.table.probability(target, word))
                    .product();
                FeatureValue::Scalar(probability.unwrap_or(0.0))
            })
            .collect())
    }
}

/// Syllables in the candidate surface. Every surface of the batch is sent
/// to the syllabifier in a single call.
pub struct SyllableFeature {
    key: ResourceKey,
    syllabifier: Arc<dyn Syllabifier>,
}

impl SyllableFeature {
    pub fn new(key: ResourceKey, syllabifier: Arc<dyn Syllabifier>) -> Self {
        SyllableFeature { key, syllabifier }
    }
}

impl Feature for SyllableFeature {
    fn columns(&self) -> Vec<String> {
        vec!["Syllable Count".to_string()]
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        let surfaces: Vec<&str> = batch
            .candidates()
            .map(|(_, candidate)| candidate.surface.as_str())
            .collect();
        let splits = self.syllabifier.split_syllables(&surfaces)?;
        if splits.len() != surfaces.len() {
            return Err(FeatureError::resource(
                &self.key,
                format!("split {} surfaces out of {}", splits.len(), surfaces.len()),
            ));
        }
        Ok(splits
            .iter()
            .map(|split| FeatureValue::Scalar(syllable_count(split) as f64))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SyllableDictionary;
    use crate::resource::ResourceKind;
    use lexis_corpus::{CorpusFormat, Instance, parse_corpus};
    use pretty_assertions::assert_eq;

    fn instances() -> Vec<Instance> {
        parse_corpus(
            "the naïve plan\tnaïve\t1\t1:simple\t2:not clever\t3:green",
            CorpusFormat::Victor,
        )
        .unwrap()
    }

    fn scalars(batch_values: Vec<FeatureValue>) -> Vec<f64> {
        batch_values
            .into_iter()
            .map(|value| match value {
                FeatureValue::Scalar(value) => value,
                FeatureValue::Vector(values) => panic!("expected a scalar, got {values:?}"),
            })
            .collect()
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let instances =
            parse_corpus("a naïve plan\tplan\t2\t1:naïve", CorpusFormat::Victor).unwrap();
        let values = LengthFeature.compute(&mut Batch::new(&instances).unwrap()).unwrap();
        assert_eq!(scalars(values), vec![5.0]);
    }

    #[test]
    fn lexicon_requires_every_word() {
        let instances = instances();
        let lexicon: Lexicon = ["simple", "not", "green"].into_iter().collect();
        let feature = LexiconFeature::new("basic.txt", Arc::new(lexicon));
        let values = feature.compute(&mut Batch::new(&instances).unwrap()).unwrap();
        assert_eq!(scalars(values), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn translation_probability_is_a_product_and_zero_on_miss() {
        let instances = instances();
        let mut table = TranslationTable::new();
        table.insert("naïve", "simple", 0.5);
        table.insert("naïve", "not", 0.5);
        table.insert("naïve", "clever", 0.25);
        let feature = TranslationProbability::new("probs.txt", Arc::new(table));

        let values = feature.compute(&mut Batch::new(&instances).unwrap()).unwrap();
        assert_eq!(scalars(values), vec![0.5, 0.125, 0.0]);
    }

    #[test]
    fn syllables_are_counted_per_surface() {
        let instances = instances();
        let dictionary = SyllableDictionary::new()
            .with_word("simple", "sim-ple")
            .with_word("not", "not")
            .with_word("clever", "clev-er");
        let feature = SyllableFeature::new(
            ResourceKey::new(ResourceKind::Syllabifier, "syllables.txt"),
            Arc::new(dictionary),
        );

        let values = feature.compute(&mut Batch::new(&instances).unwrap()).unwrap();
        assert_eq!(scalars(values), vec![2.0, 3.0, 0.0]);
    }

    #[test]
    fn short_syllabifier_output_is_rejected() {
        struct Lossy;
        impl Syllabifier for Lossy {
            fn split_syllables(&self, _: &[&str]) -> Result<Vec<String>, FeatureError> {
                Ok(vec!["one".to_string()])
            }
        }

        let instances = instances();
        let key = ResourceKey::new(ResourceKind::Syllabifier, "lossy");
        let feature = SyllableFeature::new(key, Arc::new(Lossy));
        let result = feature.compute(&mut Batch::new(&instances).unwrap());
        assert!(matches!(result, Err(FeatureError::ResourceLoad { .. })));
    }
}
