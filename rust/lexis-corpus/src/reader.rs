//! Corpus reader: turning corpus lines into instances.
//!
//! Fields are tab-separated and trimmed. Candidate fields are `rank:surface`,
//! split on the first colon so that surfaces may carry further colons or
//! internal spaces. Blank lines are skipped; any other malformed line fails
//! the whole read with the offending line number.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::CorpusError;
use crate::format::CorpusFormat;
use crate::instance::{Candidate, Instance};

/// Parse a single non-blank corpus line. `line` is the 1-based line number
/// used in error reports.
pub fn parse_line(line: usize, text: &str, format: CorpusFormat) -> Result<Instance, CorpusError> {
    let fields: Vec<&str> = text.trim().split('\t').map(str::trim).collect();
    if fields.len() < format.required_fields() {
        return Err(CorpusError::parse(
            line,
            format!(
                "expected at least {} tab-separated fields for the {format} format, found {}",
                format.required_fields(),
                fields.len()
            ),
        ));
    }

    let sentence = Instance::tokenize(fields[0]);
    let target = fields[1];
    let head: usize = fields[2].parse().map_err(|_| {
        CorpusError::parse(line, format!("head index '{}' is not a number", fields[2]))
    })?;
    if head >= sentence.len() {
        return Err(CorpusError::parse(
            line,
            format!(
                "head index {head} is outside a sentence of {} tokens",
                sentence.len()
            ),
        ));
    }

    let candidates = match format {
        CorpusFormat::Victor => fields[3..]
            .iter()
            .map(|field| parse_candidate(line, field))
            .collect::<Result<Vec<_>, _>>()?,
        CorpusFormat::Cwictor => vec![Candidate::unranked(target)],
    };

    Ok(Instance {
        sentence,
        target: target.to_string(),
        head,
        candidates,
    })
}

fn parse_candidate(line: usize, field: &str) -> Result<Candidate, CorpusError> {
    let (rank, surface) = field
        .split_once(':')
        .ok_or_else(|| {
            CorpusError::parse(line, format!("candidate '{field}' is not 'rank:surface'"))
        })?;
    let rank: u32 = rank
        .trim()
        .parse()
        .map_err(|_| CorpusError::parse(line, format!("rank '{}' is not a number", rank.trim())))?;
    let surface = surface.trim();
    if surface.is_empty() {
        return Err(CorpusError::parse(line, format!("candidate '{field}' has no surface")));
    }
    Ok(Candidate::new(rank, surface))
}

/// Parse a whole corpus held in memory.
pub fn parse_corpus(text: &str, format: CorpusFormat) -> Result<Vec<Instance>, CorpusError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(index + 1, line, format))
        .collect()
}

/// Read and parse a corpus file.
pub fn read_corpus(
    path: impl AsRef<Path>,
    format: CorpusFormat,
) -> Result<Vec<Instance>, CorpusError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let instances = parse_corpus(&text, format)?;
    debug!(
        path = %path.display(),
        %format,
        instances = instances.len(),
        candidates = candidate_count(&instances),
        "read corpus"
    );
    Ok(instances)
}

/// Total number of candidates across a batch of instances.
pub fn candidate_count(instances: &[Instance]) -> usize {
    instances.iter().map(|i| i.candidates.len()).sum()
}
