/// Outcome applier: the only place scores and comparison history change.
use crate::constants::WIN_POINTS;
use crate::error::{EngineError, Result};
use crate::store::EngineState;
use crate::types::Command;

impl EngineState {
    /// Record that `winner` was preferred over `loser`.
    ///
    /// On success the winner gains a point, the comparison counter goes up by
    /// one, and each item records the other as an opponent. Recording the same
    /// pair again never shrinks either opponent set.
    ///
    /// Unknown names, `winner == loser`, and a score or counter already at
    /// `u64::MAX` are rejected without touching the state.
    pub fn apply_outcome(&mut self, winner: &str, loser: &str) -> Result<()> {
        let winner_idx = self.position(winner).ok_or_else(|| EngineError::UnknownOutcomeParticipant {
            name: winner.to_string(),
        })?;
        let loser_idx = self.position(loser).ok_or_else(|| EngineError::UnknownOutcomeParticipant {
            name: loser.to_string(),
        })?;
        if winner_idx == loser_idx {
            return Err(EngineError::SelfComparison {
                name: winner.to_string(),
            });
        }

        let score = self.items[winner_idx].score.checked_add(WIN_POINTS).ok_or_else(|| {
            EngineError::ScoreOverflow {
                name: winner.to_string(),
            }
        })?;
        let comparison_count = self.comparison_count.checked_add(1).ok_or(EngineError::CounterOverflow)?;

        let winner_item = &mut self.items[winner_idx];
        winner_item.score = score;
        winner_item.opponents.insert(loser.to_string());
        self.items[loser_idx].opponents.insert(winner.to_string());
        self.comparison_count = comparison_count;

        tracing::debug!(
            winner,
            loser,
            winner_score = self.items[winner_idx].score,
            comparisons = self.comparison_count,
            "applied outcome"
        );
        Ok(())
    }

    /// State transition for a user command.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::SelectWinner { winner, loser } => self.apply_outcome(winner, loser),
        }
    }
}
