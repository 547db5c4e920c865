//! Lexical databases: senses per word, with their lemmas, hypernyms,
//! hyponyms and depths in the hierarchy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LookupMiss;

/// One sense of a word in a lexical database.
///
/// Senses are identified by `id`; two senses with the same id are the same
/// sense no matter which word they were reached from. Hypernyms and hyponyms
/// are sense ids as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub id: String,
    #[serde(default)]
    pub lemmas: Vec<String>,
    #[serde(default)]
    pub hypernyms: Vec<String>,
    #[serde(default)]
    pub hyponyms: Vec<String>,
    /// Length of the shortest path from this sense to a taxonomy root.
    #[serde(default)]
    pub min_depth: u32,
    /// Length of the longest path from this sense to a taxonomy root.
    #[serde(default)]
    pub max_depth: u32,
}

impl Sense {
    pub fn new(id: impl Into<String>) -> Self {
        Sense {
            id: id.into(),
            lemmas: Vec::new(),
            hypernyms: Vec::new(),
            hyponyms: Vec::new(),
            min_depth: 0,
            max_depth: 0,
        }
    }

    pub fn with_lemmas<I, S>(mut self, lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lemmas = lemmas.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hypernyms<I, S>(mut self, hypernyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hypernyms = hypernyms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hyponyms<I, S>(mut self, hyponyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hyponyms = hyponyms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_depths(mut self, min_depth: u32, max_depth: u32) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }
}

/// A lexical database such as WordNet.
pub trait LexicalDatabase: Send + Sync {
    /// All senses of `word`. A word the database cannot look up at all
    /// (as opposed to one with no senses) is a [`LookupMiss`].
    fn senses(&self, word: &str) -> Result<Vec<Sense>, LookupMiss>;
}

/// A lexical database held in memory, keyed by word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SenseInventory {
    words: HashMap<String, Vec<Sense>>,
}

impl SenseInventory {
    pub fn new() -> Self {
        SenseInventory::default()
    }

    pub fn with_word<I>(mut self, word: impl Into<String>, senses: I) -> Self
    where
        I: IntoIterator<Item = Sense>,
    {
        self.words
            .entry(word.into())
            .or_default()
            .extend(senses);
        self
    }
}

impl LexicalDatabase for SenseInventory {
    fn senses(&self, word: &str) -> Result<Vec<Sense>, LookupMiss> {
        Ok(self.words.get(word).cloned().unwrap_or_default())
    }
}
