//! Lookup tables keyed by words or n-grams.

use std::collections::{HashMap, HashSet};

/// Exact-match n-gram frequencies.
#[derive(Debug, Clone, Default)]
pub struct NgramCounts {
    counts: HashMap<String, f64>,
}

impl NgramCounts {
    pub fn new() -> Self {
        NgramCounts::default()
    }

    pub fn insert(&mut self, ngram: impl Into<String>, count: f64) {
        self.counts.insert(ngram.into(), count);
    }

    /// Frequency of `ngram`, if it was ever seen.
    pub fn get(&self, ngram: &str) -> Option<f64> {
        self.counts.get(ngram).copied()
    }

    pub fn contains(&self, ngram: &str) -> bool {
        self.counts.contains_key(ngram)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for NgramCounts {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        NgramCounts {
            counts: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A set of words, e.g. a list of simple vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Lexicon {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Lexicon {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Word-to-word translation probabilities, P(target | source).
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    probabilities: HashMap<String, HashMap<String, f64>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        TranslationTable::default()
    }

    pub fn insert(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        probability: f64,
    ) {
        self.probabilities
            .entry(source.into())
            .or_default()
            .insert(target.into(), probability);
    }

    pub fn probability(&self, source: &str, target: &str) -> Option<f64> {
        self.probabilities
            .get(source)
            .and_then(|targets| targets.get(target))
            .copied()
    }
}

/// Conditional probabilities of a POS tag given a word, P(tag | word).
#[derive(Debug, Clone, Default)]
pub struct TagConditional {
    probabilities: HashMap<String, HashMap<String, f64>>,
}

impl TagConditional {
    pub fn new() -> Self {
        TagConditional::default()
    }

    pub fn insert(&mut self, word: impl Into<String>, tag: impl Into<String>, probability: f64) {
        self.probabilities
            .entry(word.into())
            .or_default()
            .insert(tag.into(), probability);
    }

    /// P(tag | word); zero for unseen pairs.
    pub fn probability(&self, word: &str, tag: &str) -> f64 {
        self.probabilities
            .get(word)
            .and_then(|tags| tags.get(tag))
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ngram_counts_distinguish_unseen_from_zero() {
        let counts: NgramCounts = [("the cat", 12.0), ("a cat", 0.0)].into_iter().collect();
        assert_eq!(counts.get("the cat"), Some(12.0));
        assert_eq!(counts.get("a cat"), Some(0.0));
        assert_eq!(counts.get("my cat"), None);
    }

    #[test]
    fn translation_probability_is_per_source() {
        let mut table = TranslationTable::new();
        table.insert("perched", "sat", 0.4);
        assert_eq!(table.probability("perched", "sat"), Some(0.4));
        assert_eq!(table.probability("sat", "perched"), None);
    }

    #[test]
    fn unseen_tag_pairs_are_zero() {
        let mut table = TagConditional::new();
        table.insert("fast", "JJ", 0.7);
        assert_eq!(table.probability("fast", "JJ"), 0.7);
        assert_eq!(table.probability("fast", "NN"), 0.0);
        assert_eq!(table.probability("slow", "JJ"), 0.0);
    }
}
