//! # lexis-corpus
//!
//! Gold-annotated corpora for lexical simplification.
//!
//! Each corpus line describes one [`Instance`]: a tokenized sentence, the
//! complex target word, the position of that word in the sentence, and the
//! candidate substitutions proposed for it. Two line formats are understood:
//!
//! **Gold-standard** (`victor`), one field per candidate, ranked by simplicity:
//! ```text
//! the cat perched on the mat<TAB>perched<TAB>2<TAB>1:sat<TAB>2:roosted
//! ```
//!
//! **Complexity-label** (`cwictor`), where the target itself becomes the single
//! unranked pseudo-candidate:
//! ```text
//! the cat perched on the mat<TAB>perched<TAB>2<TAB>1
//! ```
//!
//! ## Example
//!
//! ```
//! use lexis_corpus::{parse_corpus, CorpusFormat};
//!
//! let corpus = parse_corpus(
//!     "the cat perched on the mat\tperched\t2\t1:sat\t2:roosted",
//!     CorpusFormat::Victor,
//! )
//! .unwrap();
//!
//! assert_eq!(corpus.len(), 1);
//! assert_eq!(corpus[0].head_word(), "perched");
//! assert_eq!(corpus[0].candidates[1].surface, "roosted");
//! ```

pub mod error;
pub mod format;
pub mod instance;
pub mod reader;

pub use error::CorpusError;
pub use format::CorpusFormat;
pub use instance::{Candidate, Instance};
pub use reader::{candidate_count, parse_corpus, parse_line, read_corpus};
