//! Epsilon-greedy action selection

use rand::{Rng, seq::IndexedRandom};

use super::{q_table::best_actions, value_store::ValueStore};
use crate::{Error, Result, types::StateKey};

/// Pick an action for `state` among `available`.
///
/// With probability `epsilon` the choice is uniform over `available`;
/// otherwise it is uniform over the legal actions sharing the highest value
/// (averaged across tables for a double store). The state's entry is created
/// if it does not exist yet.
///
/// # Errors
///
/// Returns [`Error::InvalidState`] when `available` is empty.
pub fn choose_move<R: Rng>(
    store: &mut ValueStore,
    state: StateKey,
    available: &[usize],
    epsilon: f64,
    rng: &mut R,
) -> Result<usize> {
    if available.is_empty() {
        return Err(Error::InvalidState {
            state: state.to_string(),
        });
    }

    if rng.random::<f64>() < epsilon {
        return pick(available, rng, state);
    }

    store.touch(state);
    let values = store.action_values(state);
    pick(&best_actions(&values, available), rng, state)
}

fn pick<R: Rng>(candidates: &[usize], rng: &mut R, state: StateKey) -> Result<usize> {
    candidates
        .choose(rng)
        .copied()
        .ok_or_else(|| Error::InvalidState {
            state: state.to_string(),
        })
}
