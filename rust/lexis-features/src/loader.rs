//! Loading resources from plain files.
//!
//! [`FileResourceFactory`] treats a resource identifier as a path and
//! parses it according to the resource kind:
//!
//! ```text
//! ngram-counts        the cat sat<TAB>42
//! lexicon             simple
//! translation-table   perched<TAB>sat<TAB>-0.69       log-probabilities
//! tag-conditional     quickly<TAB>RB<TAB>0.9
//! word-vectors        word2vec text, optional "<count> <dims>" header
//! lexical-database    JSON object, word -> list of senses
//! syllabifier         settled<TAB>set-tled
//! tagger              Stanford tagger model, run through the configured jar
//! ```
//!
//! Language models have no file format here and must be registered in the
//! cache before they are referenced.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::FeatureError;
use crate::model::{
    CommandTagger, Lexicon, NgramCounts, SenseInventory, SyllableDictionary, TagConditional,
    TaggerConfig, TranslationTable, VectorTable,
};
use crate::resource::{Resource, ResourceFactory, ResourceKey, ResourceKind};

/// Loads resources from the file named by their identifier.
#[derive(Debug, Clone, Default)]
pub struct FileResourceFactory {
    tagger_jar: Option<PathBuf>,
    java_home: Option<PathBuf>,
}

impl FileResourceFactory {
    pub fn new() -> Self {
        FileResourceFactory::default()
    }

    /// The Stanford tagger jar and Java installation used to run taggers.
    pub fn with_tagger_runtime(
        mut self,
        jar: impl Into<PathBuf>,
        java_home: Option<PathBuf>,
    ) -> Self {
        self.tagger_jar = Some(jar.into());
        self.java_home = java_home;
        self
    }

    fn tagger(&self, key: &ResourceKey) -> Result<Resource, FeatureError> {
        let jar = self.tagger_jar.clone().ok_or_else(|| {
            FeatureError::configuration(format!("no tagger runtime configured for {key}"))
        })?;
        let model = PathBuf::from(&key.id);
        if !model.is_file() {
            return Err(FeatureError::resource(key, "tagger model not found"));
        }
        Ok(Resource::Tagger(Arc::new(CommandTagger::new(TaggerConfig {
            model,
            jar,
            java_home: self.java_home.clone(),
        }))))
    }
}

impl ResourceFactory for FileResourceFactory {
    fn load(&self, key: &ResourceKey) -> Result<Resource, FeatureError> {
        match key.kind {
            ResourceKind::LanguageModel => Err(FeatureError::resource(
                key,
                "language models must be registered before use",
            )),
            ResourceKind::Tagger => self.tagger(key),
            kind => {
                let text = read(key)?;
                let resource =
                    parse(kind, &text).map_err(|reason| FeatureError::resource(key, reason))?;
                debug!(resource = %key, bytes = text.len(), "parsed resource file");
                Ok(resource)
            }
        }
    }
}

fn read(key: &ResourceKey) -> Result<String, FeatureError> {
    fs::read_to_string(Path::new(&key.id)).map_err(|e| FeatureError::resource(key, e))
}

fn parse(kind: ResourceKind, text: &str) -> Result<Resource, String> {
    Ok(match kind {
        ResourceKind::NgramCounts => Resource::NgramCounts(Arc::new(parse_ngram_counts(text)?)),
        ResourceKind::Lexicon => Resource::Lexicon(Arc::new(parse_lexicon(text))),
        ResourceKind::TranslationTable => {
            Resource::TranslationTable(Arc::new(parse_translation_table(text)?))
        }
        ResourceKind::TagConditional => {
            Resource::TagConditional(Arc::new(parse_tag_conditional(text)?))
        }
        ResourceKind::WordVectors => Resource::WordVectors(Arc::new(parse_word_vectors(text)?)),
        ResourceKind::LexicalDatabase => Resource::LexicalDatabase(Arc::new(
            serde_json::from_str::<SenseInventory>(text).map_err(|e| e.to_string())?,
        )),
        ResourceKind::Syllabifier => {
            Resource::Syllabifier(Arc::new(parse_syllable_dictionary(text)?))
        }
        ResourceKind::LanguageModel | ResourceKind::Tagger => {
            return Err(format!("{kind} resources have no text format"));
        }
    })
}

/// Non-blank lines with their 1-based line numbers.
fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn tab_fields<const N: usize>(number: usize, line: &str) -> Result<[&str; N], String> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    fields.try_into().map_err(|fields: Vec<&str>| {
        format!(
            "line {number}: expected {N} tab-separated fields, found {}",
            fields.len()
        )
    })
}

fn number(line: usize, field: &str) -> Result<f64, String> {
    field
        .parse()
        .map_err(|_| format!("line {line}: '{field}' is not a number"))
}

/// `ngram<TAB>count` per line.
pub fn parse_ngram_counts(text: &str) -> Result<NgramCounts, String> {
    let mut counts = NgramCounts::new();
    for (line, content) in lines(text) {
        let [ngram, count] = tab_fields::<2>(line, content)?;
        counts.insert(ngram, number(line, count)?);
    }
    Ok(counts)
}

/// One word per line.
pub fn parse_lexicon(text: &str) -> Lexicon {
    lines(text).map(|(_, word)| word).collect()
}

/// `source<TAB>target<TAB>log-probability` per line.
pub fn parse_translation_table(text: &str) -> Result<TranslationTable, String> {
    let mut table = TranslationTable::new();
    for (line, content) in lines(text) {
        let [source, target, log_probability] = tab_fields::<3>(line, content)?;
        table.insert(source, target, number(line, log_probability)?.exp());
    }
    Ok(table)
}

/// `word<TAB>tag<TAB>probability` per line.
pub fn parse_tag_conditional(text: &str) -> Result<TagConditional, String> {
    let mut table = TagConditional::new();
    for (line, content) in lines(text) {
        let [word, tag, probability] = tab_fields::<3>(line, content)?;
        table.insert(word, tag, number(line, probability)?);
    }
    Ok(table)
}

/// `word<TAB>hyphenated` per line.
pub fn parse_syllable_dictionary(text: &str) -> Result<SyllableDictionary, String> {
    let mut dictionary = SyllableDictionary::new();
    for (line, content) in lines(text) {
        let [word, hyphenated] = tab_fields::<2>(line, content)?;
        dictionary.insert(word, hyphenated);
    }
    Ok(dictionary)
}

/// word2vec text format. The optional header line holds the vocabulary
/// size and the dimensionality; without it, the first vector fixes the
/// dimensionality.
pub fn parse_word_vectors(text: &str) -> Result<VectorTable, String> {
    let mut lines = lines(text).peekable();
    let header = lines.peek().and_then(|(_, first)| {
        let fields: Vec<&str> = first.split_whitespace().collect();
        match fields.as_slice() {
            [count, dims] => Some((count.parse::<usize>().ok()?, dims.parse::<usize>().ok()?)),
            _ => None,
        }
    });

    let dimensions = match header {
        Some((_, dims)) => {
            lines.next();
            dims
        }
        None => match lines.peek() {
            Some((_, first)) => first.split_whitespace().count().saturating_sub(1),
            None => 0,
        },
    };

    let mut table = VectorTable::new(dimensions);
    for (line, content) in lines {
        let mut fields = content.split_whitespace();
        let Some(word) = fields.next() else { continue };
        let vector = fields
            .map(|field| number(line, field))
            .collect::<Result<Vec<f64>, _>>()?;
        table
            .insert(word, vector)
            .map_err(|e| format!("line {line}: {e}"))?;
    }
    Ok(table)
}
