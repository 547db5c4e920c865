//! Generation and selection evaluation.
//!
//! Both score proposed candidate sets against the gold candidates of each
//! instance:
//!
//! - **potential**: share of instances where at least one proposal is gold;
//! - **precision**: gold proposals over all gold candidates, summed over the
//!   corpus;
//! - **F-mean**: harmonic mean of the two.
//!
//! Generation proposals are keyed by target word; selection proposals are
//! given per instance, in corpus order.

use std::collections::{HashMap, HashSet};

use lexis_corpus::Instance;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EvalError;
use crate::metric::{Tally, harmonic_mean};

/// Potential, precision and F-mean of a set of proposals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorScores {
    pub potential: Option<f64>,
    pub precision: Option<f64>,
    pub f_mean: Option<f64>,
}

#[derive(Debug, Default)]
struct Accumulator {
    potential: Tally,
    precision: Tally,
}

impl Accumulator {
    fn add(&mut self, instance: &Instance, proposed: Option<&HashSet<String>>) {
        let gold = instance.gold_surfaces();
        let overlap = proposed.map_or(0, |proposed| {
            proposed
                .iter()
                .filter(|surface| gold.contains(surface.as_str()))
                .count()
        });
        self.potential.record(overlap > 0);
        self.precision.add(overlap, gold.len());
    }

    fn finish(self) -> GeneratorScores {
        let potential = self.potential.ratio();
        let precision = self.precision.ratio();
        GeneratorScores {
            potential,
            precision,
            f_mean: harmonic_mean(potential, precision),
        }
    }
}

/// Score substitution generation. Instances whose target has no proposals
/// count as misses.
pub fn evaluate_generator(
    gold: &[Instance],
    substitutions: &HashMap<String, HashSet<String>>,
) -> GeneratorScores {
    let mut accumulator = Accumulator::default();
    for instance in gold {
        accumulator.add(instance, substitutions.get(instance.target.trim()));
    }
    let scores = accumulator.finish();
    debug!(instances = gold.len(), ?scores, "evaluated generator");
    scores
}

/// Score substitution selection: one proposed set per gold instance.
pub fn evaluate_selector(
    gold: &[Instance],
    selections: &[HashSet<String>],
) -> Result<GeneratorScores, EvalError> {
    EvalError::check_len(gold.len(), selections.len())?;
    let mut accumulator = Accumulator::default();
    for (instance, selected) in gold.iter().zip(selections) {
        accumulator.add(instance, Some(selected));
    }
    let scores = accumulator.finish();
    debug!(instances = gold.len(), ?scores, "evaluated selector");
    Ok(scores)
}
