//! Value table mapping (observation, action) pairs to estimates

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::{Action, Observation};

/// One stored estimate, the unit of the persisted form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QEntry {
    pub state: Observation,
    pub action: Action,
    pub value: f64,
}

/// Lazily populated table of action-value estimates
///
/// Lookups of unseen pairs return 0.0 without inserting anything; only
/// `set` grows the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    values: HashMap<(Observation, Action), f64>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate for a pair, 0.0 if never written
    pub fn get(&self, state: &Observation, action: Action) -> f64 {
        self.values.get(&(*state, action)).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, state: Observation, action: Action, value: f64) {
        self.values.insert((state, action), value);
    }

    pub fn contains(&self, state: &Observation, action: Action) -> bool {
        self.values.contains_key(&(*state, action))
    }

    /// First action with the strictly highest estimate, scanning in
    /// `Action::ALL` order, together with that estimate
    pub fn best(&self, state: &Observation) -> (Action, f64) {
        let mut best_action = Action::ALL[0];
        let mut best_value = f64::NEG_INFINITY;

        for action in Action::ALL {
            let value = self.get(state, action);
            if value > best_value {
                best_value = value;
                best_action = action;
            }
        }

        (best_action, best_value)
    }

    pub fn best_action(&self, state: &Observation) -> Action {
        self.best(state).0
    }

    pub fn best_value(&self, state: &Observation) -> f64 {
        self.best(state).1
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct observations with at least one stored pair
    pub fn state_count(&self) -> usize {
        let mut states: Vec<&Observation> = self.values.keys().map(|(s, _)| s).collect();
        states.sort();
        states.dedup();
        states.len()
    }

    /// All entries sorted by observation then action
    pub fn entries(&self) -> Vec<QEntry> {
        let mut entries: Vec<QEntry> = self
            .values
            .iter()
            .map(|(&(state, action), &value)| QEntry {
                state,
                action,
                value,
            })
            .collect();
        entries.sort_by(|a, b| (a.state, a.action).cmp(&(b.state, b.action)));
        entries
    }
}

impl FromIterator<QEntry> for QTable {
    fn from_iter<I: IntoIterator<Item = QEntry>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|entry| ((entry.state, entry.action), entry.value))
            .collect();
        Self { values }
    }
}
