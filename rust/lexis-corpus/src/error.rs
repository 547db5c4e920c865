//! Error types for corpus reading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    /// The requested line format is not one this crate understands.
    #[error("unknown corpus format '{0}', expected 'victor' or 'cwictor'")]
    UnknownFormat(String),

    /// A corpus line could not be turned into an instance. Lines are 1-based.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// An instance whose head does not index into its sentence.
    #[error("head index {head} is outside a sentence of {tokens} tokens")]
    HeadOutOfRange { head: usize, tokens: usize },

    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
}

impl CorpusError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        CorpusError::Parse {
            line,
            reason: reason.into(),
        }
    }
}
