//! Collocational features: windowed n-grams scored against a language
//! model or looked up in a frequency table.
//!
//! A sweep emits one column per `(i, j)` span in [`spans`] order; a single
//! window emits one column for exactly `(left, right)`. Popped features take
//! the best score over the deletion contexts of [`pop_windows`]. Tagged
//! features window over the sentence's tags, wrapped in boundary markers,
//! with the literal candidate at the head:
//!
//! ```text
//! tokens:  the  cat  perched  on      head = 2
//! tags:    <s>  DT   NN       sat  IN  </s>    head = 3
//! ```

use std::sync::Arc;

use crate::batch::{Batch, BatchTags};
use crate::error::FeatureError;
use crate::model::{LanguageModel, NgramCounts, PosTagger};
use crate::resource::ResourceKey;
use crate::tags::TagSet;
use crate::value::FeatureValue;
use crate::window::{Ngram, pop_windows, spans, window};

use super::Feature;

const SENTENCE_START: &str = "<s>";
const SENTENCE_END: &str = "</s>";

/// What a windowed n-gram is scored against.
#[derive(Clone)]
pub enum NgramSource {
    /// Log-probability under a language model.
    Language(Arc<dyn LanguageModel>),
    /// Frequency in a table; unseen n-grams count 0.
    Counts(Arc<NgramCounts>),
    /// 1 if the table has seen the n-gram, 0 otherwise.
    Presence(Arc<NgramCounts>),
}

impl NgramSource {
    pub fn score(&self, ngram: &Ngram) -> f64 {
        match self {
            NgramSource::Language(model) => {
                model.score(&ngram.text, ngram.begins_sentence, ngram.ends_sentence)
            }
            NgramSource::Counts(counts) => counts.get(&ngram.text).unwrap_or(0.0),
            NgramSource::Presence(counts) => {
                if counts.contains(&ngram.text) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// The tokens a window is cut from.
#[derive(Clone)]
pub enum WindowContext {
    /// The sentence's words.
    Words,
    /// The sentence's tags from `tagger`, mapped into `tag_set`.
    Tags {
        key: ResourceKey,
        tagger: Arc<dyn PosTagger>,
        tag_set: TagSet,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Sweep,
    Single,
}

/// A collocational feature in any of its plain, tagged or popped forms.
pub struct Collocational {
    name: &'static str,
    suffix: String,
    source: NgramSource,
    context: WindowContext,
    left: usize,
    right: usize,
    shape: Shape,
    pop: bool,
}

impl Collocational {
    /// One column per span up to `(left, right)`.
    pub fn sweep(
        name: &'static str,
        suffix: String,
        source: NgramSource,
        left: usize,
        right: usize,
    ) -> Self {
        Collocational {
            name,
            suffix,
            source,
            context: WindowContext::Words,
            left,
            right,
            shape: Shape::Sweep,
            pop: false,
        }
    }

    /// A single column for exactly `(left, right)`.
    pub fn single(
        name: &'static str,
        suffix: String,
        source: NgramSource,
        left: usize,
        right: usize,
    ) -> Self {
        Collocational {
            shape: Shape::Single,
            ..Collocational::sweep(name, suffix, source, left, right)
        }
    }

    /// Window over `context` instead of the sentence's words.
    pub fn over(mut self, context: WindowContext) -> Self {
        self.context = context;
        self
    }

    /// Score the best of the deletion contexts instead of the sentence.
    pub fn popped(mut self) -> Self {
        self.pop = true;
        self
    }

    fn value(
        &self,
        candidate: &str,
        tokens: &[&str],
        head: usize,
        left: usize,
        right: usize,
    ) -> f64 {
        if self.pop {
            pop_windows(candidate, tokens, head, left, right)
                .iter()
                .map(|ngram| self.source.score(ngram))
                .fold(f64::NEG_INFINITY, f64::max)
        } else {
            self.source.score(&window(candidate, tokens, head, left, right))
        }
    }

    fn batch_tags(&self, batch: &mut Batch<'_>) -> Result<Option<BatchTags>, FeatureError> {
        match &self.context {
            WindowContext::Words => Ok(None),
            WindowContext::Tags { key, tagger, tag_set } => {
                batch.tags(key, tagger.as_ref(), *tag_set).map(Some)
            }
        }
    }
}

impl Feature for Collocational {
    fn columns(&self) -> Vec<String> {
        match self.shape {
            Shape::Sweep => spans(self.left, self.right)
                .map(|(i, j)| format!("{} [{i}, {j}] {}", self.name, self.suffix))
                .collect(),
            Shape::Single => vec![format!(
                "{} [{}, {}] {}",
                self.name, self.left, self.right, self.suffix
            )],
        }
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        let tags = self.batch_tags(batch)?;
        let mut values = Vec::with_capacity(batch.candidate_count());

        for (index, instance) in batch.instances().iter().enumerate() {
            let (tokens, head): (Vec<&str>, usize) = match &tags {
                None => (
                    instance.sentence.iter().map(String::as_str).collect(),
                    instance.head,
                ),
                Some(tags) => (
                    std::iter::once(SENTENCE_START)
                        .chain(tags[index].iter().map(String::as_str))
                        .chain(std::iter::once(SENTENCE_END))
                        .collect(),
                    instance.head + 1,
                ),
            };

            for candidate in &instance.candidates {
                let surface = candidate.surface.as_str();
                values.push(match self.shape {
                    Shape::Sweep => FeatureValue::Vector(
                        spans(self.left, self.right)
                            .map(|(i, j)| self.value(surface, &tokens, head, i, j))
                            .collect(),
                    ),
                    Shape::Single => FeatureValue::Scalar(
                        self.value(surface, &tokens, head, self.left, self.right),
                    ),
                });
            }
        }
        Ok(values)
    }
}

/// Negated log-probability of the sentence with the candidate substituted,
/// so larger means less probable.
pub struct SentenceProbability {
    id: String,
    model: Arc<dyn LanguageModel>,
}

impl SentenceProbability {
    pub fn new(id: impl Into<String>, model: Arc<dyn LanguageModel>) -> Self {
        SentenceProbability { id: id.into(), model }
    }
}

impl Feature for SentenceProbability {
    fn columns(&self) -> Vec<String> {
        vec![format!("Sentence Probability (LM: {})", self.id)]
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        Ok(batch
            .candidates()
            .map(|(instance, candidate)| {
                let ngram = window(
                    &candidate.surface,
                    &instance.sentence,
                    instance.head,
                    usize::MAX,
                    usize::MAX,
                );
                let score =
                    self.model.score(&ngram.text, ngram.begins_sentence, ngram.ends_sentence);
                FeatureValue::Scalar(-score)
            })
            .collect())
    }
}
