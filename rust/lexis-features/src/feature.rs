//! Feature kinds and the strategies that compute them.
//!
//! A [`FeatureSpec`] names a feature kind and its parameters. Building it
//! resolves every resource it needs through the [`ResourceCache`] and
//! yields a strategy implementing [`Feature`]; the registry only ever sees
//! the trait object.
//!
//! Strategies compute over a whole [`Batch`] at once and emit one
//! [`FeatureValue`] per (instance, candidate) pair, in row order:
//!
//! ```rust,ignore
//! let spec = FeatureSpec::Collocational {
//!     language_model: "lm.arpa".into(),
//!     left: 1,
//!     right: 1,
//! };
//! let strategy = spec.build(&mut resources, &factory)?;
//! assert_eq!(strategy.columns().len(), 4);
//! ```

mod collocational;
mod embedding;
mod lexical;
mod surface;
mod tagging;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::batch::Batch;
use crate::error::FeatureError;
use crate::orientation::Orientation;
use crate::resource::{ResourceCache, ResourceFactory, ResourceKey, ResourceKind};
use crate::tags::TagSet;
use crate::value::FeatureValue;

pub use collocational::{Collocational, NgramSource, SentenceProbability, WindowContext};
pub use embedding::{TaggedWordVectorSimilarity, WordVectorSimilarity, WordVectorValues};
pub use lexical::{
    SenseFeature, SenseMeasure, SenseProfile, UNDEFINED_MAX_DEPTH, UNDEFINED_MIN_DEPTH,
};
pub use surface::{LengthFeature, LexiconFeature, SyllableFeature, TranslationProbability};
pub use tagging::TargetPosTagProbability;

/// A strategy computing one feature over a batch.
pub trait Feature {
    /// Identifier of every column the feature emits, in order.
    fn columns(&self) -> Vec<String>;

    /// One value per (instance, candidate) pair of `batch`, in row order.
    /// Vector values must be exactly as wide as [`Feature::columns`].
    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError>;
}

/// A registered feature: its columns, orientation and strategy.
pub struct FeatureDescriptor {
    pub columns: Vec<String>,
    pub orientation: Orientation,
    strategy: Box<dyn Feature>,
}

impl FeatureDescriptor {
    pub fn new(strategy: Box<dyn Feature>, orientation: Orientation) -> Self {
        FeatureDescriptor {
            columns: strategy.columns(),
            orientation,
            strategy,
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Run the strategy over `batch`, checking it produced one value per
    /// candidate, each as wide as the declared columns.
    pub fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        let values = self.strategy.compute(batch)?;
        let rows = batch.candidate_count();
        if values.len() != rows {
            return Err(self.width_error(rows, values.len()));
        }
        if let Some(value) = values.iter().find(|v| v.width() != self.width()) {
            return Err(self.width_error(self.width(), value.width()));
        }
        Ok(values)
    }

    fn width_error(&self, expected: usize, found: usize) -> FeatureError {
        FeatureError::OutputWidth {
            feature: self.columns.first().cloned().unwrap_or_default(),
            expected,
            found,
        }
    }
}

impl fmt::Debug for FeatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureDescriptor")
            .field("columns", &self.columns)
            .field("orientation", &self.orientation)
            .finish_non_exhaustive()
    }
}

/// A feature kind and its parameters. Resource fields are identifiers
/// resolved through the estimator's resource cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSpec {
    /// Mean similarity between the target and the candidate's words.
    WordVectorSimilarity { model: String },
    /// Like [`FeatureSpec::WordVectorSimilarity`] over `word|||TAG` keys,
    /// TAG being the tag of the head token.
    TaggedWordVectorSimilarity {
        model: String,
        tagger: String,
        #[serde(default)]
        tags: TagSet,
    },
    /// Per-dimension sum of the candidate words' vectors.
    WordVectorValues { model: String, size: usize },
    /// Product of P(word | target) over the candidate's words.
    TranslationProbability { table: String },
    /// P(tag of head | candidate).
    TargetPosTagProbability { table: String, tagger: String },
    /// 1 when every word of the candidate is in the lexicon.
    Lexicon { lexicon: String },
    /// Characters in the candidate.
    Length,
    /// Syllables in the candidate, as split by a syllabifier.
    SyllableCount { syllabifier: String },
    Collocational {
        language_model: String,
        left: usize,
        right: usize,
    },
    FrequencyCollocational {
        ngrams: String,
        left: usize,
        right: usize,
    },
    BinaryFrequencyCollocational {
        ngrams: String,
        left: usize,
        right: usize,
    },
    TaggedFrequencyCollocational {
        ngrams: String,
        left: usize,
        right: usize,
        tagger: String,
        #[serde(default)]
        tags: TagSet,
    },
    BinaryTaggedFrequencyCollocational {
        ngrams: String,
        left: usize,
        right: usize,
        tagger: String,
        #[serde(default)]
        tags: TagSet,
    },
    PopCollocational {
        language_model: String,
        left: usize,
        right: usize,
    },
    NgramProbability {
        language_model: String,
        left: usize,
        right: usize,
    },
    NgramFrequency {
        ngrams: String,
        left: usize,
        right: usize,
    },
    BinaryNgramFrequency {
        ngrams: String,
        left: usize,
        right: usize,
    },
    PopNgramProbability {
        language_model: String,
        left: usize,
        right: usize,
    },
    /// Negated log-probability of the whole sentence with the candidate in
    /// place of the target.
    SentenceProbability { language_model: String },
    SenseCount { database: String },
    SynonymCount { database: String },
    IsSynonym { database: String },
    HypernymCount { database: String },
    HyponymCount { database: String },
    MinDepth { database: String },
    MaxDepth { database: String },
}

impl FeatureSpec {
    /// Resolve the resources this feature needs and build its strategy.
    pub fn build(
        &self,
        resources: &mut ResourceCache,
        factory: &dyn ResourceFactory,
    ) -> Result<Box<dyn Feature>, FeatureError> {
        let strategy: Box<dyn Feature> = match self {
            FeatureSpec::WordVectorSimilarity { model } => Box::new(WordVectorSimilarity::new(
                model,
                resources.word_vectors(model, factory)?,
            )),
            FeatureSpec::TaggedWordVectorSimilarity { model, tagger, tags } => {
                Box::new(TaggedWordVectorSimilarity::new(
                    model,
                    resources.word_vectors(model, factory)?,
                    ResourceKey::new(ResourceKind::Tagger, tagger.as_str()),
                    resources.tagger(tagger, factory)?,
                    *tags,
                ))
            }
            FeatureSpec::WordVectorValues { model, size } => Box::new(WordVectorValues::new(
                model,
                resources.word_vectors(model, factory)?,
                *size,
            )?),
            FeatureSpec::TranslationProbability { table } => Box::new(TranslationProbability::new(
                table,
                resources.translation_table(table, factory)?,
            )),
            FeatureSpec::TargetPosTagProbability { table, tagger } => {
                Box::new(TargetPosTagProbability::new(
                    table,
                    resources.tag_conditional(table, factory)?,
                    ResourceKey::new(ResourceKind::Tagger, tagger.as_str()),
                    resources.tagger(tagger, factory)?,
                ))
            }
            FeatureSpec::Lexicon { lexicon } => Box::new(LexiconFeature::new(
                lexicon,
                resources.lexicon(lexicon, factory)?,
            )),
            FeatureSpec::Length => Box::new(LengthFeature),
            FeatureSpec::SyllableCount { syllabifier } => Box::new(SyllableFeature::new(
                ResourceKey::new(ResourceKind::Syllabifier, syllabifier.as_str()),
                resources.syllabifier(syllabifier, factory)?,
            )),
            FeatureSpec::Collocational {
                language_model,
                left,
                right,
            } => Box::new(Collocational::sweep(
                "Collocational Feature",
                format!("(LM: {language_model})"),
                NgramSource::Language(resources.language_model(language_model, factory)?),
                *left,
                *right,
            )),
            FeatureSpec::FrequencyCollocational { ngrams, left, right } => {
                Box::new(Collocational::sweep(
                    "Frequency Collocational Feature",
                    format!("(N-Grams File: {ngrams})"),
                    NgramSource::Counts(resources.ngram_counts(ngrams, factory)?),
                    *left,
                    *right,
                ))
            }
            FeatureSpec::BinaryFrequencyCollocational { ngrams, left, right } => {
                Box::new(Collocational::sweep(
                    "Binary Frequency Collocational Feature",
                    format!("(N-Grams File: {ngrams})"),
                    NgramSource::Presence(resources.ngram_counts(ngrams, factory)?),
                    *left,
                    *right,
                ))
            }
            FeatureSpec::TaggedFrequencyCollocational {
                ngrams,
                left,
                right,
                tagger,
                tags,
            } => Box::new(
                Collocational::sweep(
                    "Tagged Frequency Collocational Feature",
                    format!("(N-Grams File: {ngrams}) (POS type: {tags})"),
                    NgramSource::Counts(resources.ngram_counts(ngrams, factory)?),
                    *left,
                    *right,
                )
                .over(tagged_context(resources, factory, tagger, *tags)?),
            ),
            FeatureSpec::BinaryTaggedFrequencyCollocational {
                ngrams,
                left,
                right,
                tagger,
                tags,
            } => Box::new(
                Collocational::sweep(
                    "Binary Tagged Frequency Collocational Feature",
                    format!("(N-Grams File: {ngrams}) (POS type: {tags})"),
                    NgramSource::Presence(resources.ngram_counts(ngrams, factory)?),
                    *left,
                    *right,
                )
                .over(tagged_context(resources, factory, tagger, *tags)?),
            ),
            FeatureSpec::PopCollocational {
                language_model,
                left,
                right,
            } => Box::new(
                Collocational::sweep(
                    "Pop Collocational Feature",
                    format!("(LM: {language_model})"),
                    NgramSource::Language(resources.language_model(language_model, factory)?),
                    *left,
                    *right,
                )
                .popped(),
            ),
            FeatureSpec::NgramProbability {
                language_model,
                left,
                right,
            } => Box::new(Collocational::single(
                "N-Gram Probability Feature",
                format!("(LM: {language_model})"),
                NgramSource::Language(resources.language_model(language_model, factory)?),
                *left,
                *right,
            )),
            FeatureSpec::NgramFrequency { ngrams, left, right } => Box::new(Collocational::single(
                "N-Gram Frequency Feature",
                format!("(N-Grams File: {ngrams})"),
                NgramSource::Counts(resources.ngram_counts(ngrams, factory)?),
                *left,
                *right,
            )),
            FeatureSpec::BinaryNgramFrequency { ngrams, left, right } => {
                Box::new(Collocational::single(
                    "Binary N-Gram Frequency Feature",
                    format!("(N-Grams File: {ngrams})"),
                    NgramSource::Presence(resources.ngram_counts(ngrams, factory)?),
                    *left,
                    *right,
                ))
            }
            FeatureSpec::PopNgramProbability {
                language_model,
                left,
                right,
            } => Box::new(
                Collocational::single(
                    "Pop N-Gram Probability Feature",
                    format!("(LM: {language_model})"),
                    NgramSource::Language(resources.language_model(language_model, factory)?),
                    *left,
                    *right,
                )
                .popped(),
            ),
            FeatureSpec::SentenceProbability { language_model } => {
                Box::new(SentenceProbability::new(
                    language_model,
                    resources.language_model(language_model, factory)?,
                ))
            }
            FeatureSpec::SenseCount { database } => {
                sense(resources, factory, database, SenseMeasure::SenseCount)?
            }
            FeatureSpec::SynonymCount { database } => {
                sense(resources, factory, database, SenseMeasure::SynonymCount)?
            }
            FeatureSpec::IsSynonym { database } => {
                sense(resources, factory, database, SenseMeasure::IsSynonym)?
            }
            FeatureSpec::HypernymCount { database } => {
                sense(resources, factory, database, SenseMeasure::HypernymCount)?
            }
            FeatureSpec::HyponymCount { database } => {
                sense(resources, factory, database, SenseMeasure::HyponymCount)?
            }
            FeatureSpec::MinDepth { database } => {
                sense(resources, factory, database, SenseMeasure::MinDepth)?
            }
            FeatureSpec::MaxDepth { database } => {
                sense(resources, factory, database, SenseMeasure::MaxDepth)?
            }
        };
        Ok(strategy)
    }
}

fn tagged_context(
    resources: &mut ResourceCache,
    factory: &dyn ResourceFactory,
    tagger: &str,
    tag_set: TagSet,
) -> Result<WindowContext, FeatureError> {
    Ok(WindowContext::Tags {
        key: ResourceKey::new(ResourceKind::Tagger, tagger),
        tagger: resources.tagger(tagger, factory)?,
        tag_set,
    })
}

fn sense(
    resources: &mut ResourceCache,
    factory: &dyn ResourceFactory,
    database: &str,
    measure: SenseMeasure,
) -> Result<Box<dyn Feature>, FeatureError> {
    Ok(Box::new(SenseFeature::new(
        resources.lexical_database(database, factory)?,
        measure,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Preloaded;
    use lexis_corpus::{CorpusFormat, parse_corpus};
    use pretty_assertions::assert_eq;

    struct Ragged;

    impl Feature for Ragged {
        fn columns(&self) -> Vec<String> {
            vec!["a".into(), "b".into()]
        }

        fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
            Ok(batch.candidates().map(|_| FeatureValue::Scalar(1.0)).collect())
        }
    }

    #[test]
    fn specs_are_tagged_by_kind() {
        let spec: FeatureSpec = serde_json::from_str(
            r#"{"kind": "tagged_frequency_collocational", "ngrams": "pos.ngrams",
                "left": 1, "right": 0, "tagger": "english.tagger"}"#,
        )
        .unwrap();
        assert_eq!(
            spec,
            FeatureSpec::TaggedFrequencyCollocational {
                ngrams: "pos.ngrams".into(),
                left: 1,
                right: 0,
                tagger: "english.tagger".into(),
                tags: TagSet::Treebank,
            }
        );

        let length: FeatureSpec = serde_json::from_str(r#"{"kind": "length"}"#).unwrap();
        assert_eq!(length, FeatureSpec::Length);
    }

    #[test]
    fn descriptor_rejects_values_of_the_wrong_width() {
        let instances = parse_corpus("a b\tb\t1\t1:c\t2:d", CorpusFormat::Victor).unwrap();
        let descriptor = FeatureDescriptor::new(Box::new(Ragged), Orientation::Simplicity);
        let result = descriptor.compute(&mut Batch::new(&instances).unwrap());
        assert!(matches!(
            result,
            Err(FeatureError::OutputWidth {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn missing_resource_fails_the_build() {
        let spec = FeatureSpec::SenseCount {
            database: "wordnet.json".into(),
        };
        let result = spec.build(&mut ResourceCache::new(), &Preloaded);
        assert!(matches!(result, Err(FeatureError::ResourceLoad { .. })));
    }
}
