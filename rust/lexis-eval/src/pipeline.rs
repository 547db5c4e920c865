//! Round-trip evaluation of a full generation, selection and ranking
//! pipeline.
//!
//! Only the top pick of each ranking matters. An instance is *changed* when
//! the top pick differs from the target word as written, and *precise* when
//! a changed pick is also a gold candidate.

use lexis_corpus::Instance;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EvalError;
use crate::metric::ratio;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineScores {
    /// Precise over changed instances.
    pub precision: Option<f64>,
    /// Precise over all instances.
    pub accuracy: Option<f64>,
    /// Changed over all instances.
    pub changed_proportion: Option<f64>,
}

/// Score one best-first ranking per gold instance. An empty ranking leaves
/// the target unchanged.
pub fn evaluate_pipeline(
    gold: &[Instance],
    rankings: &[Vec<String>],
) -> Result<PipelineScores, EvalError> {
    EvalError::check_len(gold.len(), rankings.len())?;

    let mut changed = 0;
    let mut precise = 0;
    for (instance, ranking) in gold.iter().zip(rankings) {
        let Some(top) = ranking.first().map(|top| top.trim()) else {
            continue;
        };
        if top == instance.target.trim() {
            continue;
        }
        changed += 1;
        if instance.gold_surfaces().contains(top) {
            precise += 1;
        }
    }

    let scores = PipelineScores {
        precision: ratio(precise, changed),
        accuracy: ratio(precise, gold.len()),
        changed_proportion: ratio(changed, gold.len()),
    };
    debug!(instances = gold.len(), changed, precise, "evaluated pipeline");
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_corpus::{CorpusFormat, parse_corpus};
    use pretty_assertions::assert_eq;

    fn gold() -> Vec<Instance> {
        parse_corpus(
            "a quick fox\tquick\t1\t1:rapid\t2:fast\n\
             a quick dog\tquick\t1\t1:rapid\t2:fast\n\
             a quick cat\tquick\t1\t1:rapid\t2:fast\n",
            CorpusFormat::Victor,
        )
        .unwrap()
    }

    fn picks(tops: &[&str]) -> Vec<Vec<String>> {
        tops.iter()
            .map(|top| vec![top.to_string(), "filler".to_string()])
            .collect()
    }

    #[test]
    fn unchanged_instances_only_count_in_totals() {
        let scores = evaluate_pipeline(&gold(), &picks(&["fast", "quick", "slow"])).unwrap();
        assert_eq!(scores.precision, Some(0.5));
        assert_eq!(scores.accuracy, Some(1.0 / 3.0));
        assert_eq!(scores.changed_proportion, Some(2.0 / 3.0));
    }

    #[test]
    fn nothing_changed_leaves_precision_undefined() {
        let rankings = [Vec::new(), picks(&["quick"]).remove(0), Vec::new()];
        let scores = evaluate_pipeline(&gold(), &rankings).unwrap();
        assert_eq!(
            scores,
            PipelineScores {
                precision: None,
                accuracy: Some(0.0),
                changed_proportion: Some(0.0),
            }
        );
    }
}
