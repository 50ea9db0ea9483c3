/// Minimum number of usable names needed to start a ranking.
/// With fewer than two items there is nothing to compare.
pub const MIN_ITEMS: usize = 2;

/// Score every item starts with at initialization.
pub const INITIAL_SCORE: u64 = 0;

/// Points awarded to the winner of a single comparison.
pub const WIN_POINTS: u64 = 1;

/// `point` used when an imported element omits it.
pub const DEFAULT_IMPORTED_POINT: u64 = 0;

/// `counter` used when an imported state omits it or stores a non-numeric value.
/// Older exports did not record a counter at all, so this is not an error.
pub const DEFAULT_IMPORTED_COUNTER: u64 = 0;
