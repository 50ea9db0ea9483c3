/// Convergence checking.
///
/// A ranking is complete only when both hold:
///   (a) every score is distinct, and
///   (b) every unordered pair has been judged at least once.
/// Either alone is not enough: scores can be distinct while pairs remain
/// unjudged, and all pairs can be judged while scores still tie.
use serde::Serialize;
use std::collections::HashSet;

use crate::pairing::{tied_groups, uncompared_pair_count};
use crate::store::EngineState;

/// Where a ranking session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// More comparisons are available.
    InProgress,
    /// Scores are distinct and every pair has been judged.
    Converged,
    /// Not converged, yet no comparison can be offered. The ranking is
    /// reported as-is with ties left in place.
    Stalled,
}

impl Phase {
    pub fn is_finished(self) -> bool {
        !matches!(self, Phase::InProgress)
    }

    /// Status line for the presentation layer.
    pub fn message(self, comparison_count: u64) -> String {
        match self {
            Phase::InProgress => format!("{comparison_count} comparisons so far."),
            Phase::Converged => "All items ranked.".to_string(),
            Phase::Stalled => "No further comparisons possible; tied items remain.".to_string(),
        }
    }
}

pub fn unique_score_count(state: &EngineState) -> usize {
    state.items().iter().map(|i| i.score()).collect::<HashSet<_>>().len()
}

pub fn is_complete(state: &EngineState) -> bool {
    unique_score_count(state) == state.len() && uncompared_pair_count(state) == 0
}

pub fn phase(state: &EngineState) -> Phase {
    if is_complete(state) {
        return Phase::Converged;
    }
    // Mirrors the selector: a pair exists iff something is uncompared or tied.
    if uncompared_pair_count(state) > 0 || !tied_groups(state).is_empty() {
        Phase::InProgress
    } else {
        Phase::Stalled
    }
}
