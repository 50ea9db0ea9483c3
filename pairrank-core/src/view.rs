/// View data for the presentation layer: status counters and rankings.
use std::cmp::Ordering;

use crate::convergence::unique_score_count;
use crate::pairing::uncompared_pair_count;
use crate::store::EngineState;
use crate::types::{RankedEntry, Status};

pub fn status(state: &EngineState) -> Status {
    Status {
        comparison_count: state.comparison_count(),
        unique_score_count: unique_score_count(state),
        total_item_count: state.len(),
        uncompared_pair_count: uncompared_pair_count(state),
    }
}

/// Current ordering: score descending, equal scores by name ascending.
/// Works for provisional and final rankings alike.
pub fn ranking(state: &EngineState) -> Vec<RankedEntry> {
    let mut sorted: Vec<_> = state.items().iter().collect();
    sorted.sort_by(|a, b| match b.score().cmp(&a.score()) {
        Ordering::Equal => a.name().cmp(b.name()),
        other => other,
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, item)| RankedEntry {
            rank: i + 1,
            name: item.name().to_string(),
            score: item.score(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: usize, name: &str, score: u64) -> RankedEntry {
        RankedEntry { rank, name: name.to_string(), score }
    }

    #[test]
    fn test_two_item_final_ranking() {
        let mut s = EngineState::initialize(["A", "B"]).unwrap();
        s.apply_outcome("A", "B").unwrap();
        assert_eq!(ranking(&s), vec![entry(1, "A", 1), entry(2, "B", 0)]);
    }

    #[test]
    fn test_ties_ordered_by_name() {
        let mut s = EngineState::initialize(["pear", "apple", "fig"]).unwrap();
        s.apply_outcome("fig", "pear").unwrap();
        assert_eq!(
            ranking(&s),
            vec![entry(1, "fig", 1), entry(2, "apple", 0), entry(3, "pear", 0)]
        );
    }

    #[test]
    fn test_status_counters() {
        let mut s = EngineState::initialize(["A", "B", "C"]).unwrap();
        assert_eq!(
            status(&s),
            Status {
                comparison_count: 0,
                unique_score_count: 1,
                total_item_count: 3,
                uncompared_pair_count: 3,
            }
        );

        s.apply_outcome("A", "B").unwrap();
        let st = status(&s);
        assert_eq!(st.comparison_count, 1);
        assert_eq!(st.unique_score_count, 2);
        assert_eq!(st.uncompared_pair_count, 2);
    }
}
