//! The resource cache: long-lived model handles, loaded once.
//!
//! Resources are keyed by a [`ResourceKey`]: the kind of resource plus a
//! canonical identifier (usually a path). Keying by kind keeps an n-gram
//! table and a lexicon that happen to share a path from colliding.
//!
//! A [`ResourceFactory`] loads a key on first reference; later references
//! are served from the cache for the lifetime of the estimator that owns it.
//! Handles are `Arc`s, so any number of features can share one model.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FeatureError;
use crate::model::{
    LanguageModel, LexicalDatabase, Lexicon, NgramCounts, PosTagger, Syllabifier, TagConditional,
    TranslationTable, WordVectors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    LanguageModel,
    WordVectors,
    Tagger,
    LexicalDatabase,
    NgramCounts,
    Lexicon,
    TranslationTable,
    TagConditional,
    Syllabifier,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::LanguageModel => "language-model",
            ResourceKind::WordVectors => "word-vectors",
            ResourceKind::Tagger => "tagger",
            ResourceKind::LexicalDatabase => "lexical-database",
            ResourceKind::NgramCounts => "ngram-counts",
            ResourceKind::Lexicon => "lexicon",
            ResourceKind::TranslationTable => "translation-table",
            ResourceKind::TagConditional => "tag-conditional",
            ResourceKind::Syllabifier => "syllabifier",
        };
        write!(f, "{name}")
    }
}

/// Identifies one resource: its kind and canonical identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub kind: ResourceKind,
    pub id: String,
}

impl ResourceKey {
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        ResourceKey { kind, id: id.into() }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A loaded resource handle.
#[derive(Clone)]
pub enum Resource {
    LanguageModel(Arc<dyn LanguageModel>),
    WordVectors(Arc<dyn WordVectors>),
    Tagger(Arc<dyn PosTagger>),
    LexicalDatabase(Arc<dyn LexicalDatabase>),
    NgramCounts(Arc<NgramCounts>),
    Lexicon(Arc<Lexicon>),
    TranslationTable(Arc<TranslationTable>),
    TagConditional(Arc<TagConditional>),
    Syllabifier(Arc<dyn Syllabifier>),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::LanguageModel(_) => ResourceKind::LanguageModel,
            Resource::WordVectors(_) => ResourceKind::WordVectors,
            Resource::Tagger(_) => ResourceKind::Tagger,
            Resource::LexicalDatabase(_) => ResourceKind::LexicalDatabase,
            Resource::NgramCounts(_) => ResourceKind::NgramCounts,
            Resource::Lexicon(_) => ResourceKind::Lexicon,
            Resource::TranslationTable(_) => ResourceKind::TranslationTable,
            Resource::TagConditional(_) => ResourceKind::TagConditional,
            Resource::Syllabifier(_) => ResourceKind::Syllabifier,
        }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({})", self.kind())
    }
}

/// Loads resources on a cache miss.
pub trait ResourceFactory {
    fn load(&self, key: &ResourceKey) -> Result<Resource, FeatureError>;
}

/// A factory that loads nothing. Every resource must be inserted into the
/// cache up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preloaded;

impl ResourceFactory for Preloaded {
    fn load(&self, key: &ResourceKey) -> Result<Resource, FeatureError> {
        Err(FeatureError::resource(key, "resource was not preloaded"))
    }
}

/// Process-scoped resource handles, keyed by [`ResourceKey`].
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: HashMap<ResourceKey, Resource>,
}

impl ResourceCache {
    pub fn new() -> Self {
        ResourceCache::default()
    }

    /// Register an already-loaded resource under `id`.
    pub fn insert(&mut self, id: impl Into<String>, resource: Resource) {
        let key = ResourceKey::new(resource.kind(), id);
        debug!(resource = %key, "registered resource");
        self.entries.insert(key, resource);
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&Resource> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached resource for `key`, loading it through `factory`
    /// on first reference.
    pub fn resolve(
        &mut self,
        key: &ResourceKey,
        factory: &dyn ResourceFactory,
    ) -> Result<Resource, FeatureError> {
        if let Some(resource) = self.entries.get(key) {
            debug!(resource = %key, "resource served from cache");
            return Ok(resource.clone());
        }
        let resource = factory.load(key)?;
        if resource.kind() != key.kind {
            return Err(FeatureError::resource(
                key,
                format!("factory produced a {} instead", resource.kind()),
            ));
        }
        debug!(resource = %key, "loaded resource");
        self.entries.insert(key.clone(), resource.clone());
        Ok(resource)
    }
}

macro_rules! typed_resolver {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $handle:ty) => {
        $(#[$doc])*
        pub fn $name(
            &mut self,
            id: &str,
            factory: &dyn ResourceFactory,
        ) -> Result<$handle, FeatureError> {
            let key = ResourceKey::new(ResourceKind::$variant, id);
            match self.resolve(&key, factory)? {
                Resource::$variant(handle) => Ok(handle),
                other => Err(FeatureError::resource(
                    &key,
                    format!("cached entry is a {}", other.kind()),
                )),
            }
        }
    };
}

impl ResourceCache {
    typed_resolver!(language_model, LanguageModel, Arc<dyn LanguageModel>);
    typed_resolver!(word_vectors, WordVectors, Arc<dyn WordVectors>);
    typed_resolver!(tagger, Tagger, Arc<dyn PosTagger>);
    typed_resolver!(lexical_database, LexicalDatabase, Arc<dyn LexicalDatabase>);
    typed_resolver!(ngram_counts, NgramCounts, Arc<NgramCounts>);
    typed_resolver!(lexicon, Lexicon, Arc<Lexicon>);
    typed_resolver!(translation_table, TranslationTable, Arc<TranslationTable>);
    typed_resolver!(tag_conditional, TagConditional, Arc<TagConditional>);
    typed_resolver!(syllabifier, Syllabifier, Arc<dyn Syllabifier>);
}
