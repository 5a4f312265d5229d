//! Action-value table keyed by packed board states

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{ActionValues, BOARD_CELLS, StateKey};

/// Mapping from state key to one value per cell index
///
/// Entries are created lazily: reads of an unseen state return a vector
/// filled with `q_init`, and the first mutable access inserts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: HashMap<StateKey, ActionValues>,
    q_init: f64,
}

impl ValueTable {
    /// Create an empty, lazily populated table
    pub fn new(q_init: f64) -> Self {
        Self {
            values: HashMap::new(),
            q_init,
        }
    }

    /// Create a table with an entry for every one of the 3^9 cell combinations
    pub fn prefilled(q_init: f64) -> Self {
        Self {
            values: StateKey::all()
                .map(|key| (key, [q_init; BOARD_CELLS]))
                .collect(),
            q_init,
        }
    }

    pub fn q_init(&self) -> f64 {
        self.q_init
    }

    /// Value vector for a state, or the default vector when unseen
    pub fn values(&self, key: StateKey) -> ActionValues {
        self.values
            .get(&key)
            .copied()
            .unwrap_or([self.q_init; BOARD_CELLS])
    }

    /// Mutable value vector, inserting the default vector when unseen
    pub fn values_mut(&mut self, key: StateKey) -> &mut ActionValues {
        let q_init = self.q_init;
        self.values.entry(key).or_insert([q_init; BOARD_CELLS])
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, key: StateKey, action: usize) -> f64 {
        self.values
            .get(&key)
            .map_or(self.q_init, |values| values[action])
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, key: StateKey, action: usize, value: f64) {
        self.values_mut(key)[action] = value;
    }

    /// Maximum Q-value over legal actions, or `q_init` for an unseen state.
    /// Returns 0.0 when there are no legal actions.
    pub fn max_q(&self, key: StateKey, legal_actions: &[usize]) -> f64 {
        if legal_actions.is_empty() {
            return 0.0;
        }
        let values = self.values(key);
        legal_actions
            .iter()
            .map(|&action| values[action])
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Legal action with the highest value, lowest index on ties
    pub fn argmax(&self, key: StateKey, legal_actions: &[usize]) -> Option<usize> {
        best_actions(&self.values(key), legal_actions).first().copied()
    }

    /// Reset all Q-values
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of states with an entry
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, key: StateKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Stored entries in ascending key order
    pub fn entries(&self) -> Vec<(StateKey, ActionValues)> {
        let mut entries: Vec<_> = self.values.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }
}

/// All legal actions attaining the maximum value, in ascending cell order
pub fn best_actions(values: &ActionValues, legal_actions: &[usize]) -> Vec<usize> {
    let max = legal_actions
        .iter()
        .map(|&action| values[action])
        .fold(f64::NEG_INFINITY, f64::max);
    legal_actions
        .iter()
        .copied()
        .filter(|&action| values[action] == max)
        .collect()
}
