//! The batch a feature computation runs over, and its ephemeral cache.
//!
//! Tagging every sentence of a corpus is the most expensive external call a
//! feature can make, and several features need the same tags. The first
//! feature to ask tags the whole batch; later ones reuse the result. The
//! cache lives inside the [`Batch`], so it is gone as soon as the batch call
//! returns and nothing leaks into the next call.

use std::collections::HashMap;
use std::rc::Rc;

use lexis_corpus::{Candidate, Instance};
use tracing::debug;

use crate::error::FeatureError;
use crate::model::PosTagger;
use crate::resource::ResourceKey;
use crate::tags::TagSet;

/// Tags for every sentence of a batch, one sequence per instance.
pub type BatchTags = Rc<Vec<Vec<String>>>;

/// Derived data valid for one batch call only.
#[derive(Debug, Default)]
pub struct EphemeralCache {
    tags: HashMap<(ResourceKey, TagSet), BatchTags>,
}

impl EphemeralCache {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

/// A batch of instances plus the ephemeral cache shared by the features
/// computed over it.
#[derive(Debug)]
pub struct Batch<'a> {
    instances: &'a [Instance],
    cache: EphemeralCache,
}

impl<'a> Batch<'a> {
    /// Fails if any instance's head does not index into its sentence.
    pub fn new(instances: &'a [Instance]) -> Result<Self, FeatureError> {
        instances.iter().try_for_each(Instance::validate)?;
        Ok(Batch {
            instances,
            cache: EphemeralCache::default(),
        })
    }

    pub fn instances(&self) -> &'a [Instance] {
        self.instances
    }

    /// Every (instance, candidate) pair in row order.
    pub fn candidates(&self) -> impl Iterator<Item = (&'a Instance, &'a Candidate)> + 'a {
        self.instances
            .iter()
            .flat_map(|instance| instance.candidates.iter().map(move |c| (instance, c)))
    }

    pub fn candidate_count(&self) -> usize {
        lexis_corpus::candidate_count(self.instances)
    }

    pub fn cache(&self) -> &EphemeralCache {
        &self.cache
    }

    /// Drop everything derived during this batch.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Tags of every sentence in the batch from `tagger`, mapped into
    /// `tag_set`. The tagger runs at most once per batch.
    pub fn tags(
        &mut self,
        key: &ResourceKey,
        tagger: &dyn PosTagger,
        tag_set: TagSet,
    ) -> Result<BatchTags, FeatureError> {
        if let Some(tags) = self.cache.tags.get(&(key.clone(), tag_set)) {
            return Ok(tags.clone());
        }

        let cached = self.cache.tags.get(&(key.clone(), TagSet::Treebank)).cloned();
        let raw = match cached {
            Some(raw) => raw,
            None => {
                let raw = Rc::new(self.run_tagger(key, tagger)?);
                self.cache
                    .tags
                    .insert((key.clone(), TagSet::Treebank), raw.clone());
                raw
            }
        };
        if tag_set == TagSet::Treebank {
            return Ok(raw);
        }

        let mapped: BatchTags = Rc::new(
            raw.iter()
                .map(|sentence| sentence.iter().map(|tag| tag_set.apply(tag).to_string()).collect())
                .collect(),
        );
        self.cache.tags.insert((key.clone(), tag_set), mapped.clone());
        Ok(mapped)
    }

    fn run_tagger(
        &self,
        key: &ResourceKey,
        tagger: &dyn PosTagger,
    ) -> Result<Vec<Vec<String>>, FeatureError> {
        let sentences: Vec<Vec<String>> =
            self.instances.iter().map(|i| i.sentence.clone()).collect();
        let tagged = tagger.tag_sentences(&sentences)?;
        if tagged.len() != sentences.len() {
            return Err(FeatureError::resource(
                key,
                format!("tagged {} sentences out of {}", tagged.len(), sentences.len()),
            ));
        }
        for (index, (tokens, sentence)) in tagged.iter().zip(&sentences).enumerate() {
            if tokens.len() != sentence.len() {
                return Err(FeatureError::resource(
                    key,
                    format!(
                        "sentence {index} has {} tokens but {} tags",
                        sentence.len(),
                        tokens.len()
                    ),
                ));
            }
        }
        debug!(tagger = %key, sentences = sentences.len(), "tagged batch");
        Ok(tagged
            .into_iter()
            .map(|tokens| tokens.into_iter().map(|t| t.tag).collect())
            .collect())
    }
}
