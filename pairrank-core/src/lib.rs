/// pairrank-core: Pure-computation pairwise ranking engine.
///
/// Items → "which is better?" decisions → a total order. No IO, no UI — the
/// caller shows each pair to a person and reports the answer.
///
/// Every pair is judged at least once before tied scores are broken with
/// extra matchups. The ranking is settled once all scores are distinct and
/// no pair is left unjudged.
///
/// # Quick start
///
/// ```rust
/// use pairrank_core::{EngineConfig, Phase, RankingEngine, Side};
///
/// let mut engine = RankingEngine::new(["tea", "coffee", "cocoa"], EngineConfig { seed: Some(7) })?;
///
/// while let Some(pair) = engine.next_pair() {
///     // Ask a person here. This one always prefers the shorter name.
///     let side = if pair.first.len() <= pair.second.len() { Side::First } else { Side::Second };
///     engine.choose(side)?;
/// }
///
/// assert_eq!(engine.phase(), Phase::Converged);
/// for r in engine.ranking() {
///     println!("{}. {} ({})", r.rank, r.name, r.score);
/// }
///
/// let saved = engine.export_json();
/// let resumed = RankingEngine::import(&saved, EngineConfig::default())?;
/// assert_eq!(resumed.status(), engine.status());
/// # Ok::<(), pairrank_core::EngineError>(())
/// ```

pub mod codec;
pub mod constants;
pub mod convergence;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod pairing;
pub mod store;
pub mod types;
pub mod view;

// Re-export primary public API at crate root.
pub use codec::{SerializedItem, SerializedState};
pub use convergence::{Phase, is_complete, phase, unique_score_count};
pub use engine::{EngineConfig, Progress, RankingEngine};
pub use error::{EngineError, Result};
pub use pairing::{select_pair, tied_groups, uncompared_pair_count, uncompared_pairs};
pub use store::{EngineState, parse_names};
pub use types::{Command, Item, Pair, PairKind, RankedEntry, Side, Status};
pub use view::{ranking, status};
