/// Ranking engine orchestrator.
///
/// Pure computation: no IO. The caller shows each pair to a person, then
/// feeds the decision back. The engine owns the state, the random source and
/// the pair currently on screen.
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::convergence::{Phase, phase};
use crate::error::{EngineError, Result};
use crate::pairing::select_pair;
use crate::store::EngineState;
use crate::types::{Command, Pair, RankedEntry, Side, Status};
use crate::view;

/// Configuration for the ranking engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Seed for pair selection. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Result of submitting one decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub phase: Phase,
    pub comparison_count: u64,
}

pub struct RankingEngine {
    state: EngineState,
    rng: StdRng,
    /// Pair currently presented, if any. Cleared by every accepted decision.
    pending: Option<Pair>,
}

impl RankingEngine {
    pub fn new<I, S>(names: I, config: EngineConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_state(EngineState::initialize(names)?, config))
    }

    pub fn from_state(state: EngineState, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RankingEngine {
            state,
            rng,
            pending: None,
        }
    }

    /// Resume from an exported state string.
    pub fn import(text: &str, config: EngineConfig) -> Result<Self> {
        Ok(Self::from_state(EngineState::import_json(text)?, config))
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Number of items being ranked.
    pub fn num_items(&self) -> usize {
        self.state.len()
    }

    /// The pair to show next. Repeated calls return the same pair until a
    /// decision is submitted.
    pub fn next_pair(&mut self) -> Option<&Pair> {
        if self.pending.is_none() {
            self.pending = select_pair(&self.state, &mut self.rng);
        }
        self.pending.as_ref()
    }

    pub fn pending_pair(&self) -> Option<&Pair> {
        self.pending.as_ref()
    }

    /// Apply a decision. On error nothing changes, including the pending pair.
    pub fn submit(&mut self, command: &Command) -> Result<Progress> {
        self.state.apply(command)?;
        self.pending = None;

        let progress = Progress {
            phase: self.phase(),
            comparison_count: self.state.comparison_count(),
        };
        if progress.phase.is_finished() {
            tracing::info!(phase = ?progress.phase, comparisons = progress.comparison_count, "ranking finished");
        }
        Ok(progress)
    }

    /// Pick one side of the pending pair.
    pub fn choose(&mut self, side: Side) -> Result<Progress> {
        let command = self.pending.as_ref().ok_or(EngineError::NoPendingPair)?.pick(side);
        self.submit(&command)
    }

    /// Start over with a new list. The current state survives a failure.
    pub fn reinitialize<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.state = EngineState::initialize(names)?;
        self.pending = None;
        Ok(())
    }

    /// Replace the whole state from an export. The current state survives a failure.
    pub fn replace_state(&mut self, text: &str) -> Result<()> {
        self.state = EngineState::import_json(text)?;
        self.pending = None;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        phase(&self.state)
    }

    pub fn message(&self) -> String {
        self.phase().message(self.state.comparison_count())
    }

    pub fn status(&self) -> Status {
        view::status(&self.state)
    }

    pub fn ranking(&self) -> Vec<RankedEntry> {
        view::ranking(&self.state)
    }

    pub fn export_json(&self) -> String {
        self.state.export_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PairKind;
    use std::collections::HashMap;

    fn seeded(seed: u64) -> EngineConfig {
        EngineConfig { seed: Some(seed) }
    }

    #[test]
    fn test_engine_two_item_scenario() {
        let mut engine = RankingEngine::new(["A", "B"], seeded(1)).unwrap();

        let pair = engine.next_pair().unwrap().clone();
        assert_eq!(pair.kind, PairKind::Uncompared);
        assert!(pair.contains("A") && pair.contains("B"));

        let progress = engine
            .submit(&Command::SelectWinner {
                winner: "A".to_string(),
                loser: "B".to_string(),
            })
            .unwrap();
        assert_eq!(progress.phase, Phase::Converged);
        assert_eq!(progress.comparison_count, 1);
        assert!(engine.next_pair().is_none());

        let ranking = engine.ranking();
        assert_eq!(ranking[0], RankedEntry { rank: 1, name: "A".to_string(), score: 1 });
        assert_eq!(ranking[1], RankedEntry { rank: 2, name: "B".to_string(), score: 0 });
        assert_eq!(engine.message(), "All items ranked.");
    }

    #[test]
    fn test_next_pair_is_stable_until_decision() {
        let mut engine = RankingEngine::new(["A", "B", "C", "D"], seeded(3)).unwrap();
        let first = engine.next_pair().cloned();
        assert_eq!(engine.next_pair().cloned(), first);
        engine.choose(Side::First).unwrap();
        assert!(engine.pending_pair().is_none());
    }

    #[test]
    fn test_choose_without_pending_pair() {
        let mut engine = RankingEngine::new(["A", "B"], seeded(0)).unwrap();
        assert_eq!(engine.choose(Side::First), Err(EngineError::NoPendingPair));
    }

    #[test]
    fn test_rejected_submit_keeps_pending_pair() {
        let mut engine = RankingEngine::new(["A", "B", "C"], seeded(8)).unwrap();
        let pending = engine.next_pair().cloned();
        let err = engine
            .submit(&Command::SelectWinner {
                winner: "nobody".to_string(),
                loser: "A".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownOutcomeParticipant { .. }));
        assert_eq!(engine.pending_pair().cloned(), pending);
        assert_eq!(engine.state().comparison_count(), 0);
    }

    #[test]
    fn test_hidden_order_is_recovered() {
        // A judge who always prefers the item with the higher hidden strength.
        let names = ["delta", "alpha", "echo", "charlie", "bravo", "foxtrot"];
        let strength: HashMap<&str, u32> = [
            ("alpha", 6), ("bravo", 5), ("charlie", 4), ("delta", 3), ("echo", 2), ("foxtrot", 1),
        ]
        .into_iter()
        .collect();

        for seed in 0..10 {
            let mut engine = RankingEngine::new(names, seeded(seed)).unwrap();
            let mut steps = 0;
            while let Some(pair) = engine.next_pair() {
                let side = if strength[pair.first.as_str()] > strength[pair.second.as_str()] {
                    Side::First
                } else {
                    Side::Second
                };
                engine.choose(side).unwrap();
                steps += 1;
                assert!(steps < 100, "did not converge (seed {seed})");
            }
            assert_eq!(engine.phase(), Phase::Converged);
            let order: Vec<String> = engine.ranking().into_iter().map(|r| r.name).collect();
            assert_eq!(order, vec!["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"]);
            // A consistent judge never needs a tie-break round.
            assert_eq!(engine.state().comparison_count(), 15);
        }
    }

    #[test]
    fn test_inconsistent_judge_still_converges() {
        let mut engine = RankingEngine::new(["A", "B", "C", "D", "E"], seeded(21)).unwrap();
        let mut flip = false;
        let mut steps = 0;
        while engine.next_pair().is_some() {
            flip = !flip;
            engine.choose(if flip { Side::First } else { Side::Second }).unwrap();
            steps += 1;
            assert!(steps < 500);
        }
        assert_eq!(engine.phase(), Phase::Converged);
        let status = engine.status();
        assert_eq!(status.unique_score_count, 5);
        assert_eq!(status.uncompared_pair_count, 0);
        assert_eq!(engine.state().total_score(), status.comparison_count);
    }

    #[test]
    fn test_reinitialize_failure_keeps_state() {
        let mut engine = RankingEngine::new(["A", "B"], seeded(2)).unwrap();
        engine.next_pair();
        engine.choose(Side::First).unwrap();
        let before = engine.state().clone();

        assert_eq!(engine.reinitialize(["solo"]), Err(EngineError::InvalidInput { usable: 1 }));
        assert_eq!(engine.state(), &before);

        engine.reinitialize(["x", "y", "z"]).unwrap();
        assert_eq!(engine.num_items(), 3);
        assert_eq!(engine.state().comparison_count(), 0);
    }

    #[test]
    fn test_replace_state() {
        let mut engine = RankingEngine::new(["A", "B", "C"], seeded(4)).unwrap();
        engine.next_pair();
        engine.choose(Side::Second).unwrap();
        let exported = engine.export_json();

        let mut other = RankingEngine::new(["P", "Q"], seeded(5)).unwrap();
        assert!(other.replace_state("{\"elements\": 5}").is_err());
        assert_eq!(other.num_items(), 2);

        other.replace_state(&exported).unwrap();
        assert_eq!(other.state(), engine.state());

        let resumed = RankingEngine::import(&exported, EngineConfig::default()).unwrap();
        assert_eq!(resumed.status(), engine.status());
    }
}
