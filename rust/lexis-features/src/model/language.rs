//! Language models that score n-grams, optionally anchored at a sentence
//! boundary.

use std::collections::HashMap;

/// A statistical language model.
pub trait LanguageModel: Send + Sync {
    /// Log-probability of `text`, a space-delimited n-gram, optionally
    /// anchored at the start and/or end of a sentence.
    fn score(&self, text: &str, begins_sentence: bool, ends_sentence: bool) -> f64;
}

/// A language model backed by a fixed score table.
///
/// Scores are looked up by `(text, begins, ends)` first, then by `text`
/// alone, and fall back to a default log-probability for unseen n-grams.
#[derive(Debug, Clone)]
pub struct MemoryLanguageModel {
    anchored: HashMap<(String, bool, bool), f64>,
    unanchored: HashMap<String, f64>,
    unseen: f64,
}

impl MemoryLanguageModel {
    pub fn new(unseen: f64) -> Self {
        MemoryLanguageModel {
            anchored: HashMap::new(),
            unanchored: HashMap::new(),
            unseen,
        }
    }

    /// Score `text` regardless of its boundary flags.
    pub fn with_score(mut self, text: impl Into<String>, score: f64) -> Self {
        self.unanchored.insert(text.into(), score);
        self
    }

    /// Score `text` only when it carries exactly these boundary flags.
    pub fn with_anchored_score(
        mut self,
        text: impl Into<String>,
        begins_sentence: bool,
        ends_sentence: bool,
        score: f64,
    ) -> Self {
        self.anchored
            .insert((text.into(), begins_sentence, ends_sentence), score);
        self
    }
}

impl LanguageModel for MemoryLanguageModel {
    fn score(&self, text: &str, begins_sentence: bool, ends_sentence: bool) -> f64 {
        self.anchored
            .get(&(text.to_string(), begins_sentence, ends_sentence))
            .or_else(|| self.unanchored.get(text))
            .copied()
            .unwrap_or(self.unseen)
    }
}
