//! # lexis-eval
//!
//! Scores each stage of a lexical simplification system against a
//! gold-standard corpus.
//!
//! Every evaluator is a pure function of the gold instances and the system
//! output for them; none of them shares state with another or with the
//! feature estimator.
//!
//! | Stage      | System output                          | Scores                          |
//! |------------|----------------------------------------|---------------------------------|
//! | generation | target word → proposed substitutions   | potential, precision, F-mean    |
//! | selection  | one proposed set per instance          | potential, precision, F-mean    |
//! | ranking    | one best-first ranking per instance    | TopRank@1..3, Recall@1..3       |
//! | pipeline   | one best-first ranking per instance    | precision, accuracy, changed    |
//!
//! Metrics with an empty denominator are `None`.
//!
//! ## Example
//!
//! ```
//! use lexis_eval::{evaluate_pipeline, parse_gold};
//!
//! let gold = parse_gold("a quick fox\tquick\t1\t1:rapid\t2:fast").unwrap();
//! let scores = evaluate_pipeline(&gold, &[vec!["fast".to_string()]]).unwrap();
//!
//! assert_eq!(scores.precision, Some(1.0));
//! assert_eq!(scores.changed_proportion, Some(1.0));
//! ```

use std::path::Path;

use lexis_corpus::{CorpusFormat, Instance, parse_corpus, read_corpus};

pub mod error;
pub mod generator;
pub mod metric;
pub mod pipeline;
pub mod ranker;

pub use error::EvalError;
pub use generator::{GeneratorScores, evaluate_generator, evaluate_selector};
pub use metric::{Tally, harmonic_mean, ratio};
pub use pipeline::{PipelineScores, evaluate_pipeline};
pub use ranker::{LEVELS, RankerScores, evaluate_ranker};

/// Parse gold-standard corpus text.
pub fn parse_gold(text: &str) -> Result<Vec<Instance>, EvalError> {
    Ok(parse_corpus(text, CorpusFormat::Victor)?)
}

/// Read a gold-standard corpus file.
pub fn read_gold(path: impl AsRef<Path>) -> Result<Vec<Instance>, EvalError> {
    Ok(read_corpus(path, CorpusFormat::Victor)?)
}
