//! Learner and move-policy ports
//!
//! The game engine depends on these traits rather than on concrete agents:
//! - [`MovePolicy`] picks a cell for the side to move
//! - [`Learner`] consumes the transitions produced by the engine

use crate::{Result, tictactoe::BoardState};

/// One step of experience for a single mover.
///
/// `next_state` is the board right after the move, with the other side to
/// move, or the terminal board when `done` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: BoardState,
    pub action: usize,
    pub reward: f64,
    pub next_state: BoardState,
    pub done: bool,
}

/// Move selection for the side to move.
///
/// # Examples
///
/// ```no_run
/// use qttt::{ports::MovePolicy, tictactoe::BoardState};
///
/// fn opening<P: MovePolicy>(policy: &mut P) -> qttt::Result<usize> {
///     policy.choose_move(&BoardState::new())
/// }
/// ```
pub trait MovePolicy: Send {
    /// Pick a cell (0-8) for `state.to_move`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidState`] when the board has no legal moves.
    fn choose_move(&mut self, state: &BoardState) -> Result<usize>;

    /// Name used in logs and summaries.
    fn name(&self) -> &str;

    /// Reseed any internal random number generator. Deterministic policies
    /// can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

/// Consumer of temporal-difference transitions.
pub trait Learner {
    /// Apply one update. Missing table entries are initialised lazily, so
    /// updates never fail.
    fn update(&mut self, transition: &Transition);
}

/// A learner that discards every transition, for replaying games without
/// touching any value table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLearning;

impl Learner for NoLearning {
    fn update(&mut self, _transition: &Transition) {}
}
