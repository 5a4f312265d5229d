//! Temporal-difference update rules
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    q_table::ValueTable,
    value_store::{DoubleBootstrap, TableSide, ValueStore},
};
use crate::ports::Transition;

/// Step size and discount of the TD update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdParams {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
}

impl Default for TdParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
        }
    }
}

impl TdParams {
    /// Apply one transition to the store.
    ///
    /// A double store updates one table chosen uniformly at random.
    pub fn apply<R: Rng>(&self, store: &mut ValueStore, transition: &Transition, rng: &mut R) {
        match store {
            ValueStore::Single(table) => self.q_learning_update(table, transition),
            ValueStore::Double {
                first,
                second,
                bootstrap,
            } => {
                let side = if rng.random_bool(0.5) {
                    TableSide::First
                } else {
                    TableSide::Second
                };
                let (updated, other) = match side {
                    TableSide::First => (first, &*second),
                    TableSide::Second => (second, &*first),
                };
                match bootstrap {
                    DoubleBootstrap::SameTable => self.q_learning_update(updated, transition),
                    DoubleBootstrap::CrossTable => {
                        self.cross_table_update(updated, other, transition)
                    }
                }
            }
        }
    }

    /// Single-table Q-learning update, bootstrapping from the table's own max
    pub fn q_learning_update(&self, table: &mut ValueTable, transition: &Transition) {
        let bootstrap = if transition.done {
            0.0
        } else {
            let next = &transition.next_state;
            table.max_q(next.key(), &next.legal_moves())
        };
        self.step(table, transition, bootstrap);
    }

    /// Double Q-learning update: the updated table selects the next action,
    /// the other table supplies its value
    pub fn cross_table_update(
        &self,
        table: &mut ValueTable,
        evaluator: &ValueTable,
        transition: &Transition,
    ) {
        let bootstrap = if transition.done {
            0.0
        } else {
            let next = &transition.next_state;
            let key = next.key();
            table
                .argmax(key, &next.legal_moves())
                .map_or(0.0, |action| evaluator.get(key, action))
        };
        self.step(table, transition, bootstrap);
    }

    fn step(&self, table: &mut ValueTable, transition: &Transition, bootstrap: f64) {
        let values = table.values_mut(transition.state.key());
        let current_q = values[transition.action];
        let td_target = transition.reward + self.discount_factor * bootstrap;
        let td_error = td_target - current_q;
        values[transition.action] = current_q + self.learning_rate * td_error;
    }
}
