//! Tabular Q-learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - A 3×3 board with packed base-3 state keys and win detection
//! - A turn-alternating game engine that emits learning transitions
//! - Single- and double-table Q-learning agents with epsilon-greedy play
//! - A training supervisor with cancellation and progress observers
//! - A play-and-train session facade and optional MessagePack persistence

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use app::{AgentConfig, MoveReport, Session, SharedSession};
pub use error::{Error, Result};
pub use pipeline::{CancellationToken, TrainingConfig, TrainingResult, TrainingSupervisor};
pub use q_learning::{DoubleBootstrap, QAgent};
pub use tictactoe::{BoardState, GameEngine, GameStatus, Player};
pub use types::StateKey;
