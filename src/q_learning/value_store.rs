//! Single- or double-table storage of action values

use serde::{Deserialize, Serialize};

use super::q_table::ValueTable;
use crate::types::{ActionValues, BOARD_CELLS, StateKey};

/// Bootstrap rule for double Q-learning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleBootstrap {
    /// The updated table bootstraps from its own max over the next state
    #[default]
    SameTable,
    /// The updated table picks the next action, the other table evaluates it
    CrossTable,
}

/// Which of the two double-Q tables an update targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSide {
    First,
    Second,
}

/// Learned action values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueStore {
    Single(ValueTable),
    Double {
        first: ValueTable,
        second: ValueTable,
        bootstrap: DoubleBootstrap,
    },
}

impl ValueStore {
    pub fn single(q_init: f64, eager: bool) -> Self {
        ValueStore::Single(make_table(q_init, eager))
    }

    pub fn double(q_init: f64, eager: bool, bootstrap: DoubleBootstrap) -> Self {
        ValueStore::Double {
            first: make_table(q_init, eager),
            second: make_table(q_init, eager),
            bootstrap,
        }
    }

    pub fn is_double(&self) -> bool {
        matches!(self, ValueStore::Double { .. })
    }

    /// Values the policy acts on: the table itself, or the per-action
    /// average of both tables.
    pub fn action_values(&self, key: StateKey) -> ActionValues {
        match self {
            ValueStore::Single(table) => table.values(key),
            ValueStore::Double { first, second, .. } => {
                let a = first.values(key);
                let b = second.values(key);
                let mut averaged = [0.0; BOARD_CELLS];
                for (slot, (x, y)) in averaged.iter_mut().zip(a.iter().zip(b.iter())) {
                    *slot = (x + y) / 2.0;
                }
                averaged
            }
        }
    }

    /// Make sure every table has an entry for `key`
    pub fn touch(&mut self, key: StateKey) {
        match self {
            ValueStore::Single(table) => {
                table.values_mut(key);
            }
            ValueStore::Double { first, second, .. } => {
                first.values_mut(key);
                second.values_mut(key);
            }
        }
    }

    /// Drop every learned value, keeping the layout
    pub fn clear(&mut self) {
        match self {
            ValueStore::Single(table) => table.clear(),
            ValueStore::Double { first, second, .. } => {
                first.clear();
                second.clear();
            }
        }
    }

    /// Number of stored states (summed over both tables for double Q)
    pub fn len(&self) -> usize {
        self.tables().iter().map(|table| table.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables().iter().all(|table| table.is_empty())
    }

    pub fn tables(&self) -> Vec<&ValueTable> {
        match self {
            ValueStore::Single(table) => vec![table],
            ValueStore::Double { first, second, .. } => vec![first, second],
        }
    }
}

fn make_table(q_init: f64, eager: bool) -> ValueTable {
    if eager {
        ValueTable::prefilled(q_init)
    } else {
        ValueTable::new(q_init)
    }
}
