//! Ranking evaluation: TopRank@k and Recall@k for k in 1..=3.
//!
//! Level `k` only considers instances with more than `k` gold-ranked
//! candidates (level 1 considers all of them). Correctness at every level
//! is judged on the system's top pick alone: it is correct at `k` when its
//! gold rank is at most `k`.
//!
//! Recall is micro-averaged over eligible instances. The system's recall
//! set grows cumulatively:
//!
//! ```text
//! level 1   {top pick}            only if the top pick has gold rank 1
//! level 2   level 1 ∪ {2nd pick}
//! level 3   level 2 ∪ {3rd pick}
//! ```
//!
//! and is compared against the gold surfaces ranked at most `k`.

use std::collections::HashSet;

use lexis_corpus::Instance;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EvalError;
use crate::metric::Tally;

/// Deepest level scored.
pub const LEVELS: usize = 3;

/// TopRank@k and Recall@k; index 0 holds k = 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankerScores {
    pub top_rank: [Option<f64>; LEVELS],
    pub recall: [Option<f64>; LEVELS],
}

/// Score one best-first ranking of candidate surfaces per gold instance.
pub fn evaluate_ranker(
    gold: &[Instance],
    rankings: &[Vec<String>],
) -> Result<RankerScores, EvalError> {
    EvalError::check_len(gold.len(), rankings.len())?;

    let mut top_rank = [Tally::default(); LEVELS];
    let mut recall = [Tally::default(); LEVELS];

    for (instance, ranking) in gold.iter().zip(rankings) {
        let gold_ranks = instance.gold_ranking();
        let first_rank = ranking
            .first()
            .and_then(|top| gold_ranks.get(top.as_str()))
            .copied();

        let mut predicted: HashSet<&str> = HashSet::new();
        for (level, k) in (1..=LEVELS as u32).enumerate() {
            if level > 0 && gold_ranks.len() <= k as usize {
                break;
            }
            top_rank[level].record(first_rank.is_some_and(|rank| rank <= k));

            match level {
                0 if first_rank == Some(1) => predicted.extend(ranking.first().map(String::as_str)),
                0 => {}
                _ => predicted.extend(ranking.get(level).map(String::as_str)),
            }
            let expected = instance.recall_set(k);
            recall[level].add(predicted.intersection(&expected).count(), expected.len());
        }
    }

    let scores = RankerScores {
        top_rank: top_rank.map(|tally| tally.ratio()),
        recall: recall.map(|tally| tally.ratio()),
    };
    debug!(instances = gold.len(), ?scores, "evaluated ranker");
    Ok(scores)
}
