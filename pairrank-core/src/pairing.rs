/// Pair selection: which two items to show next.
///
/// Two stages, evaluated in strict priority order on every call:
///   Stage 1 (Coverage): any pair that has never been judged, chosen uniformly.
///   Stage 2 (Tie-break): once every pair has been judged, two items that share
///                        a score, from a uniformly chosen tied group.
///
/// Public functions return `Pair` (owned names). Internal functions work on
/// `usize` positions into the item sequence.
use rand::Rng;
use std::collections::BTreeMap;

use crate::store::EngineState;
use crate::types::{IndexedPair, Pair, PairKind};

/// Pick the next pair to compare, or `None` when nothing is left to ask.
pub fn select_pair(state: &EngineState, rng: &mut impl Rng) -> Option<Pair> {
    let (kind, (a, b)) = select_pair_indexed(state, rng)?;
    let items = state.items();

    tracing::debug!(first = %items[a].name, second = %items[b].name, ?kind, "selected pair");
    Some(Pair {
        first: items[a].name.clone(),
        second: items[b].name.clone(),
        kind,
    })
}

/// Every unordered pair that has never been judged, in item order.
pub fn uncompared_pairs(state: &EngineState) -> Vec<(String, String)> {
    let items = state.items();
    uncompared_pairs_indexed(state)
        .into_iter()
        .map(|(a, b)| (items[a].name.clone(), items[b].name.clone()))
        .collect()
}

pub fn uncompared_pair_count(state: &EngineState) -> usize {
    let items = state.items();
    let mut count = 0;
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if is_uncompared(state, i, j) {
                count += 1;
            }
        }
    }
    count
}

/// Score groups with at least two members, ordered by score.
/// Each group lists item names in item order.
pub fn tied_groups(state: &EngineState) -> Vec<(u64, Vec<String>)> {
    let items = state.items();
    tied_groups_indexed(state)
        .into_iter()
        .map(|(score, members)| {
            let names = members.into_iter().map(|i| items[i].name.clone()).collect();
            (score, names)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Internal indexed selection (works with usize positions)
// ---------------------------------------------------------------------------

pub(crate) fn select_pair_indexed(
    state: &EngineState,
    rng: &mut impl Rng,
) -> Option<(PairKind, IndexedPair)> {
    // Stage 1: Coverage
    let uncompared = uncompared_pairs_indexed(state);
    if !uncompared.is_empty() {
        let pick = uncompared[rng.random_range(0..uncompared.len())];
        return Some((PairKind::Uncompared, pick));
    }

    // Stage 2: Tie-break
    let groups = tied_groups_indexed(state);
    if groups.is_empty() {
        return None;
    }
    let (_, members) = &groups[rng.random_range(0..groups.len())];
    let (i, j) = random_distinct_pair(members.len(), rng);
    Some((PairKind::TieBreak, (members[i], members[j])))
}

fn is_uncompared(state: &EngineState, i: usize, j: usize) -> bool {
    let items = state.items();
    !items[i].has_met(&items[j].name) && !items[j].has_met(&items[i].name)
}

pub(crate) fn uncompared_pairs_indexed(state: &EngineState) -> Vec<IndexedPair> {
    let n = state.len();
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if is_uncompared(state, i, j) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn tied_groups_indexed(state: &EngineState) -> Vec<(u64, Vec<usize>)> {
    let mut by_score: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
    for (idx, item) in state.items().iter().enumerate() {
        by_score.entry(item.score).or_default().push(idx);
    }
    by_score
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .collect()
}

/// Two distinct positions in `0..len`. The second index is re-drawn until it
/// differs from the first. Requires `len >= 2`.
fn random_distinct_pair(len: usize, rng: &mut impl Rng) -> IndexedPair {
    debug_assert!(len >= 2);
    let first = rng.random_range(0..len);
    let mut second = rng.random_range(0..len);
    while second == first {
        second = rng.random_range(0..len);
    }
    (first, second)
}
