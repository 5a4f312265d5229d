//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BoardState, Cell, Player};
pub use game::{GameEngine, GameStatus, MoveRejection, MoveResult, RewardScheme};
pub use lines::{LineAnalyzer, WINNING_LINES};
