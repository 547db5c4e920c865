//! The lexical-semantics feature family.
//!
//! Every measure is read off a [`SenseProfile`]: all senses of all words
//! of a candidate, gathered from a [`LexicalDatabase`]. Sense and synonym
//! counts are sums; hypernyms and hyponyms are counted as set unions, so a
//! hypernym shared by two senses counts once.
//!
//! A word the database fails to look up contributes no senses. When no
//! word has a sense at all the depth measures report sentinels that sort
//! past every real depth: [`UNDEFINED_MIN_DEPTH`] and
//! [`UNDEFINED_MAX_DEPTH`]. Treat them as "no data".

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use crate::batch::Batch;
use crate::error::FeatureError;
use crate::model::{LexicalDatabase, Sense};
use crate::value::FeatureValue;

use super::Feature;

/// Minimal depth reported for a candidate without senses.
pub const UNDEFINED_MIN_DEPTH: f64 = 9_999_999.0;
/// Maximal depth reported for a candidate without senses.
pub const UNDEFINED_MAX_DEPTH: f64 = -1.0;

/// Which lexical-semantics measure a [`SenseFeature`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenseMeasure {
    SenseCount,
    SynonymCount,
    IsSynonym,
    HypernymCount,
    HyponymCount,
    MinDepth,
    MaxDepth,
}

impl SenseMeasure {
    pub fn label(&self) -> &'static str {
        match self {
            SenseMeasure::SenseCount => "Sense Count",
            SenseMeasure::SynonymCount => "Synonym Count",
            SenseMeasure::IsSynonym => "Is Synonym",
            SenseMeasure::HypernymCount => "Hypernym Count",
            SenseMeasure::HyponymCount => "Hyponym Count",
            SenseMeasure::MinDepth => "Minimal Sense Depth",
            SenseMeasure::MaxDepth => "Maximal Sense Depth",
        }
    }
}

/// Everything the lexical database knows about a sequence of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenseProfile {
    pub senses: usize,
    pub synonyms: usize,
    pub sense_ids: HashSet<String>,
    pub hypernyms: HashSet<String>,
    pub hyponyms: HashSet<String>,
    pub min_depth: Option<u32>,
    pub max_depth: Option<u32>,
}

impl SenseProfile {
    pub fn collect<'w>(
        database: &dyn LexicalDatabase,
        words: impl IntoIterator<Item = &'w str>,
    ) -> Self {
        let mut profile = SenseProfile::default();
        for word in words {
            for sense in senses_of(database, word) {
                profile.add(sense);
            }
        }
        profile
    }

    fn add(&mut self, sense: Sense) {
        self.senses += 1;
        self.synonyms += sense.lemmas.len();
        self.hypernyms.extend(sense.hypernyms);
        self.hyponyms.extend(sense.hyponyms);
        self.min_depth = Some(self.min_depth.map_or(sense.min_depth, |d| d.min(sense.min_depth)));
        self.max_depth = Some(self.max_depth.map_or(sense.max_depth, |d| d.max(sense.max_depth)));
        self.sense_ids.insert(sense.id);
    }

    /// Whether any sense is shared with `other`.
    pub fn shares_sense(&self, other: &SenseProfile) -> bool {
        !self.sense_ids.is_disjoint(&other.sense_ids)
    }
}

fn senses_of(database: &dyn LexicalDatabase, word: &str) -> Vec<Sense> {
    database.senses(word).unwrap_or_else(|miss| {
        trace!(word = %miss.word, "sense lookup failed, no senses");
        Vec::new()
    })
}

/// One lexical-semantics measure over a lexical database.
pub struct SenseFeature {
    database: Arc<dyn LexicalDatabase>,
    measure: SenseMeasure,
}

impl SenseFeature {
    pub fn new(database: Arc<dyn LexicalDatabase>, measure: SenseMeasure) -> Self {
        SenseFeature { database, measure }
    }

    fn score(&self, candidate: &SenseProfile, target: Option<&SenseProfile>) -> f64 {
        match self.measure {
            SenseMeasure::SenseCount => candidate.senses as f64,
            SenseMeasure::SynonymCount => candidate.synonyms as f64,
            SenseMeasure::HypernymCount => candidate.hypernyms.len() as f64,
            SenseMeasure::HyponymCount => candidate.hyponyms.len() as f64,
            SenseMeasure::MinDepth => candidate
                .min_depth
                .map_or(UNDEFINED_MIN_DEPTH, f64::from),
            SenseMeasure::MaxDepth => candidate
                .max_depth
                .map_or(UNDEFINED_MAX_DEPTH, f64::from),
            SenseMeasure::IsSynonym => match target {
                Some(target) if target.senses > 0 && !candidate.shares_sense(target) => 0.0,
                _ => 1.0,
            },
        }
    }
}

impl Feature for SenseFeature {
    fn columns(&self) -> Vec<String> {
        vec![self.measure.label().to_string()]
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        let database = self.database.as_ref();
        let mut values = Vec::with_capacity(batch.candidate_count());
        for instance in batch.instances() {
            let target = (self.measure == SenseMeasure::IsSynonym)
                .then(|| SenseProfile::collect(database, [instance.target.trim()]));
            for candidate in &instance.candidates {
                let profile = SenseProfile::collect(database, candidate.words());
                values.push(FeatureValue::Scalar(self.score(&profile, target.as_ref())));
            }
        }
        Ok(values)
    }
}
