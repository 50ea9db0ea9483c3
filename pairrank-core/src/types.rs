use serde::Serialize;
use std::collections::BTreeSet;

/// A named competitor with its accumulated score and the names it has already
/// been compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub(crate) name: String,
    pub(crate) score: u64,
    pub(crate) opponents: BTreeSet<String>,
}

impl Item {
    pub(crate) fn new(name: String) -> Self {
        Item {
            name,
            score: crate::constants::INITIAL_SCORE,
            opponents: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Names this item has been judged against at least once.
    pub fn opponents(&self) -> &BTreeSet<String> {
        &self.opponents
    }

    pub fn has_met(&self, other: &str) -> bool {
        self.opponents.contains(other)
    }
}

/// Why a pair was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairKind {
    /// The two items have never been judged against each other.
    Uncompared,
    /// Every pair has been judged once; these two share a score.
    TieBreak,
}

/// Two distinct items to present to the user. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub first: String,
    pub second: String,
    pub kind: PairKind,
}

impl Pair {
    pub fn contains(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }

    /// Build the winner command for one side of this pair.
    pub fn pick(&self, side: Side) -> Command {
        let (winner, loser) = match side {
            Side::First => (&self.first, &self.second),
            Side::Second => (&self.second, &self.first),
        };
        Command::SelectWinner {
            winner: winner.clone(),
            loser: loser.clone(),
        }
    }
}

/// Which side of a presented pair the user chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// A user decision fed back into the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectWinner { winner: String, loser: String },
}

/// One row of a provisional or final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    pub name: String,
    pub score: u64,
}

/// Counters shown alongside the current comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub comparison_count: u64,
    pub unique_score_count: usize,
    pub total_item_count: usize,
    pub uncompared_pair_count: usize,
}

/// Internal indexed pair (positions in the item sequence, not names).
pub(crate) type IndexedPair = (usize, usize);
