//! Tag sets for tagged features.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which tags tagged features see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSet {
    /// Tags exactly as the tagger produced them.
    #[default]
    Treebank,
    /// Treebank tags coarsened with [`generalize`].
    Paetzold,
}

impl TagSet {
    /// Map a tagger tag into this tag set.
    pub fn apply<'a>(&self, tag: &'a str) -> &'a str {
        match self {
            TagSet::Treebank => tag,
            TagSet::Paetzold => generalize(tag),
        }
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagSet::Treebank => write!(f, "treebank"),
            TagSet::Paetzold => write!(f, "paetzold"),
        }
    }
}

/// Coarsen a Penn Treebank tag: nouns, verbs, adverbs, adjectives,
/// wh-words and personal pronouns collapse to one letter each.
pub fn generalize(tag: &str) -> &str {
    if tag.starts_with('N') {
        "N"
    } else if tag.starts_with('V') {
        "V"
    } else if tag.starts_with("RB") {
        "A"
    } else if tag.starts_with('J') {
        "J"
    } else if tag.starts_with('W') {
        "W"
    } else if tag.starts_with("PRP") {
        "P"
    } else {
        tag.trim()
    }
}
