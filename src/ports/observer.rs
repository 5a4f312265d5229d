//! Observer port - abstraction for training observation
//!
//! The training supervisor never renders anything itself. It reports
//! episode outcomes and periodic progress events to observers, which decide
//! whether to draw a progress bar, log, or collect metrics.

use serde::{Deserialize, Serialize};

use crate::{Result, pipeline::TrainingResult, tictactoe::GameStatus};

/// Periodic training progress report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub episodes_completed: usize,
    pub total_episodes: usize,
    /// `episodes_completed / total_episodes`, 1.0 for an empty run
    pub fraction: f64,
    /// Exploration rate after the last decay
    pub epsilon: f64,
    /// Lifetime games-played counter of the agent
    pub games_played: u64,
}

impl ProgressEvent {
    pub fn new(
        episodes_completed: usize,
        total_episodes: usize,
        epsilon: f64,
        games_played: u64,
    ) -> Self {
        let fraction = if total_episodes > 0 {
            episodes_completed as f64 / total_episodes as f64
        } else {
            1.0
        };
        Self {
            episodes_completed,
            total_episodes,
            fraction,
            epsilon,
            games_played,
        }
    }
}

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode: `on_episode_end(...)`, then `on_progress(...)` on
///    every report interval and on the final episode
/// 3. `on_training_end(result)` - Once at the end, also after cancellation
///
/// Callbacks run between episodes, never while a game is in progress.
///
/// # Examples
///
/// ```no_run
/// use qttt::{ports::Observer, tictactoe::GameStatus};
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         status: GameStatus,
///         _moves: &[usize],
///     ) -> qttt::Result<()> {
///         if status == GameStatus::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each finished episode with its final status and the
    /// cells played in order.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _status: GameStatus,
        _moves: &[usize],
    ) -> Result<()> {
        Ok(())
    }

    fn on_progress(&mut self, _event: &ProgressEvent) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        Ok(())
    }
}
