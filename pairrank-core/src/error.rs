/// Error types for the ranking engine.
///
/// Every failure is local to one operation and leaves the engine state as it
/// was before the call. Nothing here is fatal.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Fewer than two non-blank names were supplied at initialization.
    #[error("need at least 2 items to rank, got {usable}")]
    InvalidInput { usable: usize },

    /// A name list that looks like JSON failed to parse.
    #[error("name list looks like JSON but failed to parse: {reason}")]
    NameList { reason: String },

    /// The same name (after trimming) appeared more than once.
    #[error("duplicate item name \"{name}\"")]
    DuplicateName { name: String },

    /// An imported state could not be parsed or is structurally invalid.
    #[error("malformed state: {reason}")]
    MalformedState { reason: String },

    /// A winner or loser name does not match any item.
    #[error("no item named \"{name}\"")]
    UnknownOutcomeParticipant { name: String },

    /// Winner and loser are the same item.
    #[error("\"{name}\" cannot be compared against itself")]
    SelfComparison { name: String },

    /// The winner's score cannot grow any further.
    #[error("score of \"{name}\" is at its maximum")]
    ScoreOverflow { name: String },

    /// The comparison counter cannot grow any further.
    #[error("comparison counter is at its maximum")]
    CounterOverflow,

    /// A side was chosen while no pair was being presented.
    #[error("no comparison is pending")]
    NoPendingPair,
}

impl EngineError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        EngineError::MalformedState { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
