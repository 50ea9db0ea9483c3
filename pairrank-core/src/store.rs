/// Item store: the competing items, their scores and their comparison history.
///
/// `EngineState` is the single owner of all ranking data. It is created by
/// `initialize`, mutated only by the outcome applier, and replaced wholesale
/// by a state import.
use std::collections::HashMap;

use crate::constants::MIN_ITEMS;
use crate::error::{EngineError, Result};
use crate::types::Item;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    pub(crate) items: Vec<Item>,
    pub(crate) comparison_count: u64,
    /// Name -> position in `items`. Names never change after construction.
    index: HashMap<String, usize>,
}

impl EngineState {
    /// Create a fresh state from a list of names.
    ///
    /// Names are trimmed and blank entries dropped. Fails with `InvalidInput`
    /// when fewer than two names remain and with `DuplicateName` when a name
    /// repeats.
    pub fn initialize<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if names.len() < MIN_ITEMS {
            return Err(EngineError::InvalidInput { usable: names.len() });
        }

        let items = names.into_iter().map(Item::new).collect();
        let state = Self::from_parts(items, 0).map_err(|name| EngineError::DuplicateName { name })?;

        tracing::debug!(items = state.len(), "initialized ranking state");
        Ok(state)
    }

    /// Assemble a state from already-normalised items.
    /// Returns the first repeated name as the error.
    pub(crate) fn from_parts(items: Vec<Item>, comparison_count: u64) -> std::result::Result<Self, String> {
        let mut index = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if index.insert(item.name.clone(), idx).is_some() {
                return Err(item.name.clone());
            }
        }
        Ok(EngineState {
            items,
            comparison_count,
            index,
        })
    }

    /// Items in input order. The order carries no ranking meaning.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn comparison_count(&self) -> u64 {
        self.comparison_count
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.position(name).map(|idx| &self.items[idx])
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Sum of all scores, saturating at `u64::MAX`. Equals `comparison_count`
    /// for any state reached through initialization and outcomes.
    pub fn total_score(&self) -> u64 {
        self.items.iter().fold(0u64, |acc, i| acc.saturating_add(i.score))
    }
}

/// Split raw newline-separated text into candidate names.
///
/// Text that starts with `[` is read as a JSON array of strings instead.
/// Blank lines are skipped; trimming and validation happen in `initialize`.
pub fn parse_names(text: &str) -> Result<Vec<String>> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        let names: Vec<String> = serde_json::from_str(trimmed)
            .map_err(|e| EngineError::NameList { reason: e.to_string() })?;
        return Ok(names.into_iter().filter(|s| !s.trim().is_empty()).collect());
    }
    Ok(trimmed
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_fresh_items() {
        let state = EngineState::initialize(["Apple", "Banana", "Cherry"]).unwrap();
        assert_eq!(state.len(), 3);
        assert_eq!(state.comparison_count(), 0);
        for item in state.items() {
            assert_eq!(item.score(), 0);
            assert!(item.opponents().is_empty());
        }
        let names: Vec<&str> = state.items().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_initialize_trims_and_drops_blanks() {
        let state = EngineState::initialize(["  A ", "", "   ", "B\t"]).unwrap();
        let names: Vec<&str> = state.items().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_initialize_requires_two_names() {
        assert_eq!(
            EngineState::initialize(Vec::<String>::new()),
            Err(EngineError::InvalidInput { usable: 0 })
        );
        assert_eq!(
            EngineState::initialize(["only", "  "]),
            Err(EngineError::InvalidInput { usable: 1 })
        );
    }

    #[test]
    fn test_initialize_rejects_duplicates_after_trim() {
        let err = EngineState::initialize(["A", "B", " A "]).unwrap_err();
        assert_eq!(err, EngineError::DuplicateName { name: "A".to_string() });
    }

    #[test]
    fn test_lookup_by_name() {
        let state = EngineState::initialize(["A", "B"]).unwrap();
        assert_eq!(state.get("B").map(|i| i.name()), Some("B"));
        assert!(state.get("C").is_none());
        assert_eq!(state.position("A"), Some(0));
    }

    #[test]
    fn test_total_score_saturates() {
        let s = EngineState::import_json(
            r#"{"elements":[{"name":"A","point":18446744073709551615},{"name":"B","point":5}]}"#,
        )
        .unwrap();
        assert_eq!(s.total_score(), u64::MAX);
    }

    #[test]
    fn test_parse_names_plain_text() {
        let names = parse_names("  one\n\ntwo  \n three\n").unwrap();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_parse_names_json_array() {
        let names = parse_names(r#"["x", " ", "y"]"#).unwrap();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_parse_names_bad_json() {
        assert!(matches!(parse_names("[not json"), Err(EngineError::NameList { .. })));
    }
}
