//! Training supervisor for the Q-learning agent
//!
//! Episodes run strictly one after another on the calling thread. Between
//! episodes the supervisor checks the cancellation token, decays the agent's
//! exploration rate and notifies observers; nothing else touches the value
//! tables while a game is in progress.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Learner, MovePolicy, Observer, ProgressEvent, Transition},
    q_learning::QAgent,
    tictactoe::{GameEngine, GameStatus, Player},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Emit a progress event every this many episodes (and on the last one)
    pub report_interval: usize,

    /// Which player opens every episode
    pub first_player: Player,

    /// Whose moves update the agent's table when it faces a fixed opponent
    pub learn_from: LearnFrom,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10,
            report_interval: 100,
            first_player: Player::X,
            learn_from: LearnFrom::BothSeats,
        }
    }
}

/// Which seats feed transitions into the agent's table during
/// [`TrainingSupervisor::run_against`]. Self-play always learns from both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnFrom {
    /// Every move of the game, the opponent's included. A continuing move
    /// bootstraps from the board the other seat faces, so that seat's values
    /// must be learned for anything but the last move to pick up credit.
    #[default]
    BothSeats,
    /// Only the agent's own moves
    AgentSeat,
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes actually played
    pub episodes: usize,
    /// Episodes requested
    pub requested: usize,
    pub first_player: Player,
    pub first_mover_wins: usize,
    pub second_mover_wins: usize,
    pub draws: usize,
    /// Whether the run stopped early on cancellation
    pub cancelled: bool,
    pub final_epsilon: f64,
    /// Lifetime games-played counter of the agent after the run
    pub games_played: u64,
}

impl TrainingResult {
    /// Games won by `player`
    pub fn wins_for(&self, player: Player) -> usize {
        if player == self.first_player {
            self.first_mover_wins
        } else {
            self.second_mover_wins
        }
    }

    pub fn draw_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.draws as f64 / self.episodes as f64
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Shared flag asking a running training loop to stop at the next episode
/// boundary
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear a previous cancellation so the token can be reused
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Forwards only the transitions that belong to one side; `None` forwards all
struct SeatLearner<'a> {
    agent: &'a mut QAgent,
    side: Option<Player>,
}

impl Learner for SeatLearner<'_> {
    fn update(&mut self, transition: &Transition) {
        if self
            .side
            .is_none_or(|side| transition.state.to_move == side)
        {
            self.agent.update(transition);
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    first_mover_wins: usize,
    second_mover_wins: usize,
    draws: usize,
}

impl Tally {
    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::WonByFirstMover => self.first_mover_wins += 1,
            GameStatus::WonBySecondMover => self.second_mover_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }
}

/// Drives repeated episodes and reports progress to observers
pub struct TrainingSupervisor {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    cancel: CancellationToken,
}

impl TrainingSupervisor {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Add an observer to the supervisor
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train by self-play: the agent chooses every move and learns from both
    /// sides.
    pub fn run(&mut self, agent: &mut QAgent) -> Result<TrainingResult> {
        self.drive(agent, None)
    }

    /// Train against a fixed opponent. The agent plays `agent_player`;
    /// `config.learn_from` decides whether the opponent's moves are learned too.
    pub fn run_against(
        &mut self,
        agent: &mut QAgent,
        opponent: &mut dyn MovePolicy,
        agent_player: Player,
    ) -> Result<TrainingResult> {
        self.drive(agent, Some((opponent, agent_player)))
    }

    fn drive(
        &mut self,
        agent: &mut QAgent,
        mut opponent: Option<(&mut dyn MovePolicy, Player)>,
    ) -> Result<TrainingResult> {
        let total = self.config.episodes;
        let interval = self.config.report_interval.max(1);
        let learn_side = match self.config.learn_from {
            LearnFrom::BothSeats => None,
            LearnFrom::AgentSeat => opponent.as_ref().map(|(_, side)| *side),
        };

        tracing::info!(
            episodes = total,
            agent = agent.name(),
            opponent = opponent.as_ref().map_or("self", |(policy, _)| policy.name()),
            "Starting training"
        );

        for observer in &mut self.observers {
            observer.on_training_start(total)?;
        }

        let mut engine = GameEngine::new(self.config.first_player, agent.config().rewards);
        let mut tally = Tally::default();
        let mut played = 0;
        let mut cancelled = false;

        for episode in 0..total {
            if self.cancel.is_cancelled() {
                tracing::info!(episode, "Training cancelled");
                cancelled = true;
                break;
            }

            engine.reset();
            while !engine.status().is_terminal() {
                let board = *engine.board();
                let cell = match opponent.as_mut() {
                    Some((policy, side)) if *side != board.to_move => policy.choose_move(&board)?,
                    _ => agent.choose_move(&board)?,
                };
                let mut learner = SeatLearner {
                    agent: &mut *agent,
                    side: learn_side,
                };
                if !engine.apply_move(cell, &mut learner).accepted {
                    return Err(Error::InvalidMove { position: cell });
                }
            }
            agent.finish_episode();

            let status = engine.status();
            tally.record(status);
            played = episode + 1;

            for observer in &mut self.observers {
                observer.on_episode_end(episode, status, engine.moves())?;
            }

            if played.is_multiple_of(interval) || played == total {
                let event = ProgressEvent::new(played, total, agent.epsilon(), agent.games_played());
                for observer in &mut self.observers {
                    observer.on_progress(&event)?;
                }
            }
        }

        let result = TrainingResult {
            episodes: played,
            requested: total,
            first_player: self.config.first_player,
            first_mover_wins: tally.first_mover_wins,
            second_mover_wins: tally.second_mover_wins,
            draws: tally.draws,
            cancelled,
            final_epsilon: agent.epsilon(),
            games_played: agent.games_played(),
        };

        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }

        tracing::info!(
            episodes = result.episodes,
            first_mover_wins = result.first_mover_wins,
            second_mover_wins = result.second_mover_wins,
            draws = result.draws,
            epsilon = result.final_epsilon,
            "Training finished"
        );

        Ok(result)
    }
}
