//! External collaborators: the models and tables features consult.
//!
//! Training and loading the statistical models is out of scope here; this
//! module only fixes the narrow interfaces features need, plus simple
//! in-memory implementations that file loaders and tests build on:
//!
//! - [`LanguageModel`]: log-probability of an n-gram with sentence-boundary
//!   flags.
//! - [`WordVectors`]: vector lookup and similarity, failing on unknown keys.
//! - [`PosTagger`]: batch part-of-speech tagging of token sequences.
//! - [`LexicalDatabase`]: word senses with their lemmas, hypernyms, hyponyms
//!   and taxonomy depths.
//! - [`Syllabifier`]: syllable splitting of candidate surfaces.
//! - [`NgramCounts`], [`Lexicon`], [`TranslationTable`], [`TagConditional`]:
//!   exact-match tables.
//!
//! All of them are read-only after loading and are shared between features
//! through `Arc` handles.

mod language;
mod lexical;
mod syllable;
mod table;
mod tagger;
mod vectors;

pub use language::{LanguageModel, MemoryLanguageModel};
pub use lexical::{LexicalDatabase, Sense, SenseInventory};
pub use syllable::{Syllabifier, SyllableDictionary, syllable_count};
pub use table::{Lexicon, NgramCounts, TagConditional, TranslationTable};
pub use tagger::{CommandTagger, LexiconTagger, PosTagger, TaggedToken, TaggerConfig};
pub use vectors::{VectorTable, WordVectors};
