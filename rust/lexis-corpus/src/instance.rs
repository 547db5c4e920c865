//! Instances and candidates, the unit of work for features and evaluation.
//!
//! An instance is read-only once parsed. Feature computations walk its
//! candidates in order, and evaluators compare system output against the
//! gold ranks carried by those candidates.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// One proposed substitution for the target word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Gold simplicity rank, 1 being the simplest. `None` for unranked or
    /// synthesized candidates.
    pub gold_rank: Option<u32>,
    /// The substitution itself; multi-word candidates are space-delimited.
    pub surface: String,
}

impl Candidate {
    /// Build a candidate from a raw rank, where 0 means "unranked".
    pub fn new(rank: u32, surface: impl Into<String>) -> Self {
        Candidate {
            gold_rank: (rank > 0).then_some(rank),
            surface: surface.into(),
        }
    }

    /// An unranked candidate, as used for on-the-fly scoring.
    pub fn unranked(surface: impl Into<String>) -> Self {
        Candidate::new(0, surface)
    }

    /// The individual words of the candidate.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.surface.split_whitespace()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.gold_rank.unwrap_or(0), self.surface)
    }
}

/// A sentence, a complex target word inside it, and its candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Sentence tokens.
    pub sentence: Vec<String>,
    /// The complex word to be simplified.
    pub target: String,
    /// Zero-based position of the target in `sentence`.
    pub head: usize,
    pub candidates: Vec<Candidate>,
}

impl Instance {
    /// Build an instance, checking that `head` points into the sentence.
    pub fn new(
        sentence: Vec<String>,
        target: impl Into<String>,
        head: usize,
        candidates: Vec<Candidate>,
    ) -> Result<Self, CorpusError> {
        let instance = Instance {
            sentence,
            target: target.into(),
            head,
            candidates,
        };
        instance.validate()?;
        Ok(instance)
    }

    /// Check that `head` points into the sentence. Instances built field by
    /// field skip the check in [`Instance::new`]; consumers that index by
    /// `head` call this first.
    pub fn validate(&self) -> Result<(), CorpusError> {
        if self.head < self.sentence.len() {
            Ok(())
        } else {
            Err(CorpusError::HeadOutOfRange {
                head: self.head,
                tokens: self.sentence.len(),
            })
        }
    }

    /// Split a sentence on single spaces, the way corpus lines are tokenized.
    pub fn tokenize(sentence: &str) -> Vec<String> {
        sentence.trim().split(' ').map(str::to_string).collect()
    }

    /// The sentence token at the head position.
    pub fn head_word(&self) -> &str {
        &self.sentence[self.head]
    }

    /// Gold rank of each ranked candidate, keyed by surface.
    pub fn gold_ranking(&self) -> HashMap<&str, u32> {
        self.candidates
            .iter()
            .filter_map(|c| c.gold_rank.map(|rank| (c.surface.as_str(), rank)))
            .collect()
    }

    /// Every candidate surface, ranked or not.
    pub fn gold_surfaces(&self) -> HashSet<&str> {
        self.candidates.iter().map(|c| c.surface.as_str()).collect()
    }

    /// Surfaces whose gold rank is at most `k`. Cumulative in `k`.
    pub fn recall_set(&self, k: u32) -> HashSet<&str> {
        self.candidates
            .iter()
            .filter(|c| c.gold_rank.is_some_and(|rank| rank <= k))
            .map(|c| c.surface.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance {
        Instance::new(
            Instance::tokenize("the cat perched on the mat"),
            "perched",
            2,
            vec![
                Candidate::new(1, "sat"),
                Candidate::new(2, "roosted"),
                Candidate::new(2, "rested"),
                Candidate::new(3, "settled down"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn rank_zero_is_unranked() {
        assert_eq!(Candidate::new(0, "fast").gold_rank, None);
        assert_eq!(Candidate::new(4, "fast").gold_rank, Some(4));
    }

    #[test]
    fn multi_word_candidates_split_into_words() {
        let candidate = Candidate::new(1, "settled down");
        let words: Vec<_> = candidate.words().collect();
        assert_eq!(words, vec!["settled", "down"]);
    }

    #[test]
    fn recall_sets_are_cumulative() {
        let instance = instance();
        assert_eq!(instance.recall_set(1), HashSet::from(["sat"]));
        assert_eq!(
            instance.recall_set(2),
            HashSet::from(["sat", "roosted", "rested"])
        );
        assert_eq!(instance.recall_set(3).len(), 4);
    }

    #[test]
    fn head_must_point_into_sentence() {
        let result = Instance::new(Instance::tokenize("a b"), "b", 2, vec![]);
        assert!(matches!(result, Err(CorpusError::HeadOutOfRange { head: 2, tokens: 2 })));
    }

    #[test]
    fn validate_catches_instances_built_by_hand() {
        let mut instance = instance();
        assert!(instance.validate().is_ok());
        instance.head = 6;
        assert!(matches!(
            instance.validate(),
            Err(CorpusError::HeadOutOfRange { head: 6, tokens: 6 })
        ));
    }

    #[test]
    fn head_word_is_the_token_at_head() {
        assert_eq!(instance().head_word(), "perched");
    }
}
