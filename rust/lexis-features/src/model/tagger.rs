//! Part-of-speech taggers.
//!
//! [`CommandTagger`] drives an external tagger over stdin, one sentence per
//! line; [`LexiconTagger`] tags from an in-memory word list.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FeatureError;

/// A word and its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        TaggedToken {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// A part-of-speech tagger.
pub trait PosTagger: Send + Sync {
    /// Tag every sentence in one call. The result holds one tagged sequence
    /// per input sentence, in order.
    fn tag_sentences(
        &self,
        sentences: &[Vec<String>],
    ) -> Result<Vec<Vec<TaggedToken>>, FeatureError>;
}

/// A tagger that assigns each word a fixed tag from a table.
///
/// Words are matched exactly, then lower-cased; anything else gets the
/// fallback tag.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    tags: HashMap<String, String>,
    fallback: String,
}

impl LexiconTagger {
    pub fn new(fallback: impl Into<String>) -> Self {
        LexiconTagger {
            tags: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    pub fn with_tag(mut self, word: impl Into<String>, tag: impl Into<String>) -> Self {
        self.tags.insert(word.into(), tag.into());
        self
    }

    fn tag_of(&self, word: &str) -> &str {
        self.tags
            .get(word)
            .or_else(|| self.tags.get(&word.to_lowercase()))
            .unwrap_or(&self.fallback)
    }
}

impl PosTagger for LexiconTagger {
    fn tag_sentences(
        &self,
        sentences: &[Vec<String>],
    ) -> Result<Vec<Vec<TaggedToken>>, FeatureError> {
        Ok(sentences
            .iter()
            .map(|sentence| {
                sentence
                    .iter()
                    .map(|word| TaggedToken::new(word.as_str(), self.tag_of(word)))
                    .collect()
            })
            .collect())
    }
}

/// How to run the Stanford tagger as a subprocess.
///
/// The Java runtime is passed explicitly and only ever set on the child
/// process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// Tagging model file.
    pub model: PathBuf,
    /// The tagger's jar.
    pub jar: PathBuf,
    /// Java installation to run the tagger with; `java` from `PATH` if unset.
    #[serde(default)]
    pub java_home: Option<PathBuf>,
}

const TAG_SEPARATOR: char = '_';

/// A tagger backed by the Stanford POS tagger command line.
#[derive(Debug, Clone)]
pub struct CommandTagger {
    config: TaggerConfig,
}

impl CommandTagger {
    pub fn new(config: TaggerConfig) -> Self {
        CommandTagger { config }
    }

    fn command(&self) -> Command {
        let java = match &self.config.java_home {
            Some(home) => home.join("bin").join("java"),
            None => PathBuf::from("java"),
        };
        let mut command = Command::new(java);
        if let Some(home) = &self.config.java_home {
            command.env("JAVAHOME", home);
        }
        command
            .arg("-cp")
            .arg(&self.config.jar)
            .arg("edu.stanford.nlp.tagger.maxent.MaxentTagger")
            .arg("-model")
            .arg(&self.config.model)
            .args(["-sentenceDelimiter", "newline", "-tokenize", "false"])
            .args(["-outputFormat", "slashTags", "-tagSeparator"])
            .arg(TAG_SEPARATOR.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    fn failure(&self, reason: impl ToString) -> FeatureError {
        FeatureError::ResourceLoad {
            resource: format!("tagger:{}", self.config.model.display()),
            reason: reason.to_string(),
        }
    }
}

impl PosTagger for CommandTagger {
    fn tag_sentences(
        &self,
        sentences: &[Vec<String>],
    ) -> Result<Vec<Vec<TaggedToken>>, FeatureError> {
        let mut child = self.command().spawn().map_err(|e| self.failure(e))?;

        let input: String = sentences
            .iter()
            .map(|sentence| format!("{}\n", sentence.join(" ")))
            .collect();
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.failure("tagger stdin was not captured"))?;
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(|e| self.failure(e))?;
        writer
            .join()
            .map_err(|_| self.failure("tagger input writer panicked"))?
            .map_err(|e| self.failure(e))?;
        if !output.status.success() {
            return Err(self.failure(format!(
                "tagger exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let tagged: Vec<Vec<TaggedToken>> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_tagged_line)
            .collect();
        if tagged.len() != sentences.len() {
            return Err(self.failure(format!(
                "tagger returned {} sentences for {} inputs",
                tagged.len(),
                sentences.len()
            )));
        }
        debug!(sentences = tagged.len(), "tagged sentences");
        Ok(tagged)
    }
}

fn parse_tagged_line(line: &str) -> Vec<TaggedToken> {
    line.split_whitespace()
        .map(|token| match token.rsplit_once(TAG_SEPARATOR) {
            Some((word, tag)) => TaggedToken::new(word, tag),
            None => TaggedToken::new(token, ""),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_tagger_falls_back_to_lowercase_then_default() {
        let tagger = LexiconTagger::new("NN")
            .with_tag("the", "DT")
            .with_tag("sat", "VBD");
        let tagged = tagger
            .tag_sentences(&[vec!["The".into(), "cat".into(), "sat".into()]])
            .unwrap();
        let tags: Vec<_> = tagged[0].iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["DT", "NN", "VBD"]);
    }

    #[test]
    fn slash_tag_output_splits_on_last_separator() {
        let tokens = parse_tagged_line("the_DT well_known_JJ cat_NN");
        assert_eq!(tokens[1], TaggedToken::new("well_known", "JJ"));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn missing_java_is_a_resource_error() {
        let tagger = CommandTagger::new(TaggerConfig {
            model: "english.tagger".into(),
            jar: "stanford-postagger.jar".into(),
            java_home: Some("/nonexistent/java/home".into()),
        });
        let result = tagger.tag_sentences(&[vec!["a".into()]]);
        assert!(matches!(result, Err(FeatureError::ResourceLoad { .. })));
    }
}
