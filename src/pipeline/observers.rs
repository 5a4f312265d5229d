//! Observer implementations for training runs
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::sync::{Arc, Mutex, MutexGuard};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    pipeline::TrainingResult,
    ports::{Observer, ProgressEvent},
    tictactoe::GameStatus,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_progress(&mut self, event: &ProgressEvent) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(event.episodes_completed as u64);
            pb.set_message(format!("ε={:.4}", event.epsilon));
        }
        Ok(())
    }

    fn on_training_end(&mut self, result: &TrainingResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            let message = format!(
                "1st:{} 2nd:{} D:{}",
                result.first_mover_wins, result.second_mover_wins, result.draws
            );
            if result.cancelled {
                pb.abandon_with_message(format!("cancelled, {message}"));
            } else {
                pb.finish_with_message(message);
            }
        }
        Ok(())
    }
}

/// Logs every progress event through `tracing`
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl Observer for LoggingObserver {
    fn on_progress(&mut self, event: &ProgressEvent) -> Result<()> {
        tracing::info!(
            completed = event.episodes_completed,
            total = event.total_episodes,
            epsilon = event.epsilon,
            games_played = event.games_played,
            "Training progress {:.1}%",
            event.fraction * 100.0
        );
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    first_mover_wins: usize,
    second_mover_wins: usize,
    draws: usize,
    move_counts: Vec<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> usize {
        self.move_counts.len()
    }

    fn rate(&self, count: usize) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            count as f64 / self.move_counts.len() as f64
        }
    }

    /// Get average game length in plies
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games(),
            first_mover_wins: self.first_mover_wins,
            second_mover_wins: self.second_mover_wins,
            draws: self.draws,
            first_mover_win_rate: self.rate(self.first_mover_wins),
            second_mover_win_rate: self.rate(self.second_mover_wins),
            draw_rate: self.rate(self.draws),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub first_mover_wins: usize,
    pub second_mover_wins: usize,
    pub draws: usize,
    pub first_mover_win_rate: f64,
    pub second_mover_win_rate: f64,
    pub draw_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, status: GameStatus, moves: &[usize]) -> Result<()> {
        match status {
            GameStatus::WonByFirstMover => self.first_mover_wins += 1,
            GameStatus::WonBySecondMover => self.second_mover_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => return Ok(()),
        }
        self.move_counts.push(moves.len());
        Ok(())
    }
}

/// Shares one observer between the supervisor and the caller, so results can
/// be read back after the run.
impl<O: Observer> Observer for Arc<Mutex<O>> {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        lock(&**self)?.on_training_start(total_episodes)
    }

    fn on_episode_end(&mut self, episode: usize, status: GameStatus, moves: &[usize]) -> Result<()> {
        lock(&**self)?.on_episode_end(episode, status, moves)
    }

    fn on_progress(&mut self, event: &ProgressEvent) -> Result<()> {
        lock(&**self)?.on_progress(event)
    }

    fn on_training_end(&mut self, result: &TrainingResult) -> Result<()> {
        lock(&**self)?.on_training_end(result)
    }
}

fn lock<O>(shared: &Mutex<O>) -> Result<MutexGuard<'_, O>> {
    shared.lock().map_err(|_| Error::LockPoisoned {
        operation: "notify shared observer".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();
        observer
            .on_episode_end(0, GameStatus::WonByFirstMover, &[0, 3, 1, 4, 2])
            .unwrap();
        observer
            .on_episode_end(1, GameStatus::Draw, &[0, 1, 2, 4, 3, 5, 7, 6, 8])
            .unwrap();
        observer
            .on_episode_end(2, GameStatus::WonBySecondMover, &[0, 3, 1, 4, 8, 5])
            .unwrap();

        let summary = observer.summary();
        assert_eq!(summary.total_games, 3);
        assert_eq!(summary.first_mover_wins, 1);
        assert_eq!(summary.second_mover_wins, 1);
        assert_eq!(summary.draws, 1);
        assert!((summary.draw_rate - 1.0 / 3.0).abs() < 1e-12);
        assert!((summary.avg_game_length - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn shared_observer_is_readable_after_handoff() {
        let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
        let mut handle: Box<dyn Observer> = Box::new(Arc::clone(&metrics));
        handle
            .on_episode_end(0, GameStatus::Draw, &[0, 1, 2, 4, 3, 5, 7, 6, 8])
            .unwrap();
        drop(handle);
        assert_eq!(metrics.lock().unwrap().summary().draws, 1);
    }

    #[test]
    fn empty_metrics_have_zero_rates() {
        let summary = MetricsObserver::new().summary();
        assert_eq!(summary.total_games, 0);
        assert_eq!(summary.draw_rate, 0.0);
        assert_eq!(summary.avg_game_length, 0.0);
    }

    #[test]
    fn progress_observer_handles_events_without_bar() {
        let mut observer = ProgressObserver::new();
        observer
            .on_progress(&ProgressEvent::new(5, 10, 0.1, 5))
            .unwrap();
        observer.on_training_start(10).unwrap();
        observer
            .on_progress(&ProgressEvent::new(10, 10, 0.1, 10))
            .unwrap();
    }
}
