//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Cell;

/// Number of cells (and therefore action slots) on the board.
pub const BOARD_CELLS: usize = 9;

/// Number of distinct cell combinations, 3^9.
pub const STATE_SPACE: u32 = 19_683;

/// One estimated value per cell index. Only slots of legal moves are meaningful.
pub type ActionValues = [f64; BOARD_CELLS];

/// Packed base-3 encoding of the nine cells.
///
/// Cell `i` contributes `digit * 3^i` where Empty=0, X=1, O=2, so every board
/// maps to a unique integer in `0..3^9`. The side to move is not encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(u16);

impl StateKey {
    /// Key of the empty board.
    pub const EMPTY: StateKey = StateKey(0);

    /// Pack a cell array into its key.
    pub fn from_cells(cells: &[Cell; BOARD_CELLS]) -> Self {
        let packed = cells
            .iter()
            .rev()
            .fold(0u16, |acc, &cell| acc * 3 + cell.digit());
        StateKey(packed)
    }

    /// Build a key from its raw integer form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateKey`] if the value is not below 3^9.
    pub fn new(raw: u32) -> Result<Self, crate::Error> {
        if raw < STATE_SPACE {
            Ok(StateKey(raw as u16))
        } else {
            Err(crate::Error::InvalidStateKey { key: raw })
        }
    }

    /// Unpack the key into its cells.
    pub fn cells(self) -> [Cell; BOARD_CELLS] {
        let mut cells = [Cell::Empty; BOARD_CELLS];
        let mut rest = self.0;
        for cell in &mut cells {
            *cell = Cell::from_digit(rest % 3);
            rest /= 3;
        }
        cells
    }

    /// Iterate over every key in the state space, including unreachable boards.
    pub fn all() -> impl Iterator<Item = StateKey> {
        (0..STATE_SPACE as u16).map(StateKey)
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl From<StateKey> for u16 {
    fn from(key: StateKey) -> Self {
        key.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
