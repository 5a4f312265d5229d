//! Fixed opponent policies for training and evaluation
//!
//! None of these keep values of their own. Their moves still pass through the
//! training supervisor, which feeds them to the agent's table under
//! [`LearnFrom::BothSeats`](super::LearnFrom::BothSeats) and skips them under
//! [`LearnFrom::AgentSeat`](super::LearnFrom::AgentSeat).

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::MovePolicy,
    tictactoe::{BoardState, LineAnalyzer},
    types::BOARD_CELLS,
};

/// Opponent kinds selectable from configuration and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    Random,
    Defensive,
    FixedOrder,
}

impl OpponentKind {
    /// Build the policy, seeding it when `seed` is given.
    pub fn build(self, seed: Option<u64>) -> Box<dyn MovePolicy> {
        match self {
            OpponentKind::Random => Box::new(RandomPolicy::new("random", seed)),
            OpponentKind::Defensive => Box::new(DefensivePolicy::new("defensive", seed)),
            OpponentKind::FixedOrder => Box::new(FixedOrderPolicy::default()),
        }
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn no_moves(state: &BoardState) -> Error {
    Error::InvalidState {
        state: state.encode(),
    }
}

/// Plays a uniformly random legal move
pub struct RandomPolicy {
    name: String,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(seed),
        }
    }
}

impl MovePolicy for RandomPolicy {
    fn choose_move(&mut self, state: &BoardState) -> Result<usize> {
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| no_moves(state))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Blocks an immediate opponent win, otherwise plays randomly.
///
/// Does NOT try to win itself.
pub struct DefensivePolicy {
    name: String,
    rng: StdRng,
}

impl DefensivePolicy {
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(seed),
        }
    }

    /// Cell where the side not to move would complete a line
    fn threat(state: &BoardState) -> Option<usize> {
        let opponent = state.to_move.opponent();
        state.legal_moves().into_iter().find(|&pos| {
            let mut cells = state.cells;
            cells[pos] = opponent.to_cell();
            LineAnalyzer::has_won(&cells, opponent)
        })
    }
}

impl MovePolicy for DefensivePolicy {
    fn choose_move(&mut self, state: &BoardState) -> Result<usize> {
        if let Some(block) = Self::threat(state) {
            return Ok(block);
        }
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| no_moves(state))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Plays the first empty cell of a fixed preference order.
///
/// Fully deterministic, which makes it a useful passive sparring partner for
/// checking that learning moves values in the right direction.
#[derive(Debug, Clone)]
pub struct FixedOrderPolicy {
    order: [usize; BOARD_CELLS],
}

impl FixedOrderPolicy {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `order` is a
    /// permutation of 0..9.
    pub fn new(order: [usize; BOARD_CELLS]) -> Result<Self> {
        let mut seen = [false; BOARD_CELLS];
        for &cell in &order {
            if cell >= BOARD_CELLS || seen[cell] {
                return Err(Error::InvalidConfiguration {
                    message: format!("fixed move order {order:?} is not a permutation of 0-8"),
                });
            }
            seen[cell] = true;
        }
        Ok(Self { order })
    }

    pub fn order(&self) -> [usize; BOARD_CELLS] {
        self.order
    }
}

impl Default for FixedOrderPolicy {
    /// Row-major order
    fn default() -> Self {
        Self {
            order: [0, 1, 2, 3, 4, 5, 6, 7, 8],
        }
    }
}

impl MovePolicy for FixedOrderPolicy {
    fn choose_move(&mut self, state: &BoardState) -> Result<usize> {
        if state.is_terminal() {
            return Err(no_moves(state));
        }
        self.order
            .iter()
            .copied()
            .find(|&cell| state.is_empty(cell))
            .ok_or_else(|| no_moves(state))
    }

    fn name(&self) -> &str {
        "fixed-order"
    }
}
