//! Error types for evaluation.

use lexis_corpus::CorpusError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    /// System output does not line up with the gold corpus.
    #[error("system output has {found} entries for {expected} gold instances")]
    OutputMismatch { expected: usize, found: usize },

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

impl EvalError {
    pub(crate) fn check_len(expected: usize, found: usize) -> Result<(), EvalError> {
        if expected == found {
            Ok(())
        } else {
            Err(EvalError::OutputMismatch { expected, found })
        }
    }
}
