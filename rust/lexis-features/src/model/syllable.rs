//! Syllable splitting.
//!
//! A syllabifier hyphenates whole candidate surfaces in one call, the way
//! an external morphology toolkit is driven:
//!
//! ```text
//! ["simple", "settled down"]  ->  ["sim-ple", "set-tled-down"]
//! ```

use std::collections::HashMap;

use tracing::trace;

use crate::error::FeatureError;

/// Splits words into syllables.
pub trait Syllabifier: Send + Sync {
    /// Hyphenate every surface. The result holds one entry per input, in
    /// order; syllables are separated by `-` or whitespace.
    fn split_syllables(&self, surfaces: &[&str]) -> Result<Vec<String>, FeatureError>;
}

/// Number of syllables in a hyphenated form.
pub fn syllable_count(hyphenated: &str) -> usize {
    hyphenated
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|piece| !piece.is_empty())
        .count()
}

/// A syllabifier backed by a table of known hyphenations.
///
/// Words are matched exactly, then lower-cased. Words the table does not
/// know are left out of the split, so they add no syllables.
#[derive(Debug, Clone, Default)]
pub struct SyllableDictionary {
    splits: HashMap<String, String>,
}

impl SyllableDictionary {
    pub fn new() -> Self {
        SyllableDictionary::default()
    }

    pub fn with_word(mut self, word: impl Into<String>, hyphenated: impl Into<String>) -> Self {
        self.insert(word, hyphenated);
        self
    }

    pub fn insert(&mut self, word: impl Into<String>, hyphenated: impl Into<String>) {
        self.splits.insert(word.into(), hyphenated.into());
    }

    pub fn len(&self) -> usize {
        self.splits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    fn split_word(&self, word: &str) -> Option<&str> {
        self.splits
            .get(word)
            .or_else(|| self.splits.get(&word.to_lowercase()))
            .map(String::as_str)
    }
}

impl Syllabifier for SyllableDictionary {
    fn split_syllables(&self, surfaces: &[&str]) -> Result<Vec<String>, FeatureError> {
        Ok(surfaces
            .iter()
            .map(|surface| {
                surface
                    .split_whitespace()
                    .filter_map(|word| {
                        let split = self.split_word(word);
                        if split.is_none() {
                            trace!(word, "no syllable split");
                        }
                        split
                    })
                    .collect::<Vec<_>>()
                    .join("-")
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_pieces_between_separators() {
        assert_eq!(syllable_count("sim-ple"), 2);
        assert_eq!(syllable_count("set-tled down"), 3);
        assert_eq!(syllable_count(""), 0);
    }

    #[test]
    fn dictionary_joins_the_words_of_a_surface() {
        let dictionary = SyllableDictionary::new()
            .with_word("settled", "set-tled")
            .with_word("down", "down");

        let splits = dictionary
            .split_syllables(&["settled down", "Settled", "unknown"])
            .unwrap();
        assert_eq!(splits, vec!["set-tled-down", "set-tled", ""]);
    }
}
