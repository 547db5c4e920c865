//! Corpus line formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// The layout of a corpus line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusFormat {
    /// `sentence \t target \t head \t rank:surface \t rank:surface ...`
    Victor,
    /// `sentence \t target \t head \t label`; the target is synthesized as a
    /// single unranked candidate.
    Cwictor,
}

impl CorpusFormat {
    /// Minimum number of tab-separated fields a line must carry. Gold lines
    /// may list no candidates; label lines need the label.
    pub fn required_fields(&self) -> usize {
        match self {
            CorpusFormat::Victor => 3,
            CorpusFormat::Cwictor => 4,
        }
    }
}

impl FromStr for CorpusFormat {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "victor" => Ok(CorpusFormat::Victor),
            "cwictor" => Ok(CorpusFormat::Cwictor),
            _ => Err(CorpusError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for CorpusFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusFormat::Victor => write!(f, "victor"),
            CorpusFormat::Cwictor => write!(f, "cwictor"),
        }
    }
}
