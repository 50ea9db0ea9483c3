/// State export and import.
///
/// Wire format:
///
/// ```json
/// {"elements":[{"name":"A","point":1,"comparedWith":["B"]}, ...], "counter":1}
/// ```
///
/// Field defaults on import:
///
/// | field          | absent          | wrong type                    |
/// |----------------|-----------------|-------------------------------|
/// | `name`         | error           | error                         |
/// | `point`        | 0               | error                         |
/// | `comparedWith` | empty           | error                         |
/// | `counter`      | 0               | 0                             |
///
/// Import repairs history rather than rejecting it: self references and names
/// that match no element are dropped, and the opponent relation is made
/// symmetric.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::constants::{DEFAULT_IMPORTED_COUNTER, DEFAULT_IMPORTED_POINT};
use crate::error::{EngineError, Result};
use crate::store::EngineState;
use crate::types::Item;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedItem {
    pub name: String,
    #[serde(default = "default_point")]
    pub point: u64,
    #[serde(default, rename = "comparedWith")]
    pub compared_with: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializedState {
    pub elements: Vec<SerializedItem>,
    pub counter: u64,
}

fn default_point() -> u64 {
    DEFAULT_IMPORTED_POINT
}

impl SerializedState {
    /// Decode from a parsed JSON value, applying the documented defaults.
    pub fn from_value(value: &Value) -> Result<Self> {
        let elements = value
            .get("elements")
            .ok_or_else(|| EngineError::malformed("missing \"elements\""))?
            .as_array()
            .ok_or_else(|| EngineError::malformed("\"elements\" is not an array"))?;

        let elements = elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                SerializedItem::deserialize(element)
                    .map_err(|e| EngineError::malformed(format!("element {i}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let counter = match value.get("counter") {
            Some(v) => v.as_u64().unwrap_or_else(|| {
                tracing::warn!(counter = %v, "non-numeric counter, using default");
                DEFAULT_IMPORTED_COUNTER
            }),
            None => DEFAULT_IMPORTED_COUNTER,
        };

        Ok(SerializedState { elements, counter })
    }
}

impl EngineState {
    pub fn export(&self) -> SerializedState {
        SerializedState {
            elements: self
                .items()
                .iter()
                .map(|item| SerializedItem {
                    name: item.name().to_string(),
                    point: item.score(),
                    compared_with: item.opponents().iter().cloned().collect(),
                })
                .collect(),
            counter: self.comparison_count(),
        }
    }

    pub fn export_json(&self) -> String {
        // Only strings and integers: serialization cannot fail.
        serde_json::to_string(&self.export()).unwrap()
    }

    pub fn import_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| EngineError::malformed(format!("not valid JSON: {e}")))?;
        Self::import(SerializedState::from_value(&value)?)
    }

    /// Build a state from decoded elements, normalising names and history.
    pub fn import(serialized: SerializedState) -> Result<Self> {
        let mut items = Vec::with_capacity(serialized.elements.len());
        let mut histories = Vec::with_capacity(serialized.elements.len());
        for (i, element) in serialized.elements.into_iter().enumerate() {
            let name = element.name.trim().to_string();
            if name.is_empty() {
                return Err(EngineError::malformed(format!("element {i} has a blank name")));
            }
            let mut item = Item::new(name);
            item.score = element.point;
            items.push(item);
            histories.push(element.compared_with);
        }

        let known: HashSet<String> = items.iter().map(|i| i.name.clone()).collect();

        for (item, history) in items.iter_mut().zip(histories) {
            for opponent in history {
                let opponent = opponent.trim().to_string();
                if opponent == item.name || !known.contains(&opponent) {
                    tracing::warn!(item = %item.name, %opponent, "dropping invalid comparedWith entry");
                    continue;
                }
                item.opponents.insert(opponent);
            }
        }

        symmetrize(&mut items);

        let state = EngineState::from_parts(items, serialized.counter)
            .map_err(|name| EngineError::malformed(format!("duplicate element name \"{name}\"")))?;
        tracing::debug!(
            items = state.len(),
            comparisons = state.comparison_count(),
            "imported ranking state"
        );
        Ok(state)
    }
}

/// Ensure that if A lists B then B lists A.
fn symmetrize(items: &mut [Item]) {
    let edges: Vec<(String, String)> = items
        .iter()
        .flat_map(|item| item.opponents.iter().map(move |o| (item.name.clone(), o.clone())))
        .collect();
    for (from, to) in edges {
        if let Some(target) = items.iter_mut().find(|i| i.name == to) {
            if target.opponents.insert(from.clone()) {
                tracing::warn!(item = %to, opponent = %from, "restored missing reverse comparison");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::select_pair;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    /// Opponent sets keyed by name, for comparing states regardless of item order.
    fn history_by_name(state: &EngineState) -> Vec<(String, u64, BTreeSet<String>)> {
        let mut rows: Vec<_> = state
            .items()
            .iter()
            .map(|i| (i.name().to_string(), i.score(), i.opponents().clone()))
            .collect();
        rows.sort();
        rows
    }

    #[test]
    fn test_export_format() {
        let mut s = EngineState::initialize(["A", "B", "C"]).unwrap();
        s.apply_outcome("A", "B").unwrap();
        let json: Value = serde_json::from_str(&s.export_json()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "elements": [
                    {"name": "A", "point": 1, "comparedWith": ["B"]},
                    {"name": "B", "point": 0, "comparedWith": ["A"]},
                    {"name": "C", "point": 0, "comparedWith": []}
                ],
                "counter": 1
            })
        );
    }

    #[test]
    fn test_round_trip_reachable_states() {
        let mut s = EngineState::initialize(["w", "x", "y", "z"]).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        for step in 0..12 {
            let restored = EngineState::import_json(&s.export_json()).unwrap();
            assert_eq!(history_by_name(&restored), history_by_name(&s));
            assert_eq!(restored.comparison_count(), s.comparison_count());
            assert_eq!(restored, s);

            let Some(pair) = select_pair(&s, &mut rng) else { break };
            if step % 2 == 0 {
                s.apply_outcome(&pair.first, &pair.second).unwrap();
            } else {
                s.apply_outcome(&pair.second, &pair.first).unwrap();
            }
        }
    }

    #[test]
    fn test_import_defaults() {
        let s = EngineState::import_json(r#"{"elements":[{"name":"X","point":3}], "counter":"bad"}"#).unwrap();
        assert_eq!(s.len(), 1);
        let x = s.get("X").unwrap();
        assert_eq!(x.score(), 3);
        assert!(x.opponents().is_empty());
        assert_eq!(s.comparison_count(), 0);
    }

    #[test]
    fn test_import_missing_point_and_counter() {
        let s = EngineState::import_json(r#"{"elements":[{"name":"X"},{"name":"Y"}]}"#).unwrap();
        assert_eq!(s.get("X").unwrap().score(), 0);
        assert_eq!(s.comparison_count(), 0);
    }

    #[test]
    fn test_import_rejects_bad_elements() {
        for payload in [
            "not json",
            r#"{"counter": 1}"#,
            r#"{"elements": {"name": "A"}}"#,
            r#"{"elements": [{"point": 1}]}"#,
            r#"{"elements": [{"name": "A", "point": -1}]}"#,
            r#"{"elements": [{"name": "A", "comparedWith": "B"}]}"#,
            r#"{"elements": [{"name": "  "}]}"#,
            r#"{"elements": [{"name": "A"}, {"name": "A "}]}"#,
        ] {
            let err = EngineState::import_json(payload).unwrap_err();
            assert!(
                matches!(err, EngineError::MalformedState { .. }),
                "expected MalformedState for {payload}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_import_repairs_history() {
        let s = EngineState::import_json(
            r#"{"elements":[
                {"name":"A","point":1,"comparedWith":["B","A","ghost"]},
                {"name":"B","point":0},
                {"name":"C","point":0,"comparedWith":[]}
            ],"counter":1}"#,
        )
        .unwrap();
        let a = s.get("A").unwrap();
        let b = s.get("B").unwrap();
        assert_eq!(a.opponents().iter().collect::<Vec<_>>(), vec!["B"]);
        assert!(b.has_met("A"));
        assert!(s.get("C").unwrap().opponents().is_empty());
    }
}
