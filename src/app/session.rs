//! Play-and-train facade used by user interfaces
//!
//! A [`Session`] pairs one agent with one interactive game. Every operation
//! takes `&mut self`, so a human move can never interleave with a training
//! run. [`SharedSession`] wraps a session in a mutex for hosts that drive
//! play and training from different threads.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    pipeline::{CancellationToken, TrainingConfig, TrainingResult, TrainingSupervisor},
    ports::{MovePolicy, Observer},
    q_learning::QAgent,
    tictactoe::{BoardState, GameEngine, GameStatus, MoveRejection, Player},
};

/// Outcome of a human move, including the agent's reply if it made one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub accepted: bool,
    /// Status after the human move and the reply
    pub status: GameStatus,
    pub rejection: Option<MoveRejection>,
    /// Cell the agent answered with
    pub reply: Option<usize>,
}

/// One agent, one interactive board
pub struct Session {
    agent: QAgent,
    engine: GameEngine,
    human: Player,
    training: TrainingConfig,
    cancel: CancellationToken,
}

impl Session {
    /// `training.first_player` opens both the interactive game and every
    /// training episode.
    pub fn new(agent: QAgent, human: Player, training: TrainingConfig) -> Self {
        let engine = GameEngine::new(training.first_player, agent.config().rewards);
        Self {
            agent,
            engine,
            human,
            training,
            cancel: CancellationToken::new(),
        }
    }

    pub fn agent(&self) -> &QAgent {
        &self.agent
    }

    pub fn board(&self) -> &BoardState {
        self.engine.board()
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn human(&self) -> Player {
        self.human
    }

    pub fn first_player(&self) -> Player {
        self.engine.first_mover()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Let the agent move if it is on turn, e.g. to open a game it starts.
    ///
    /// Returns the cell played, or `None` when it is not the agent's turn or
    /// the game is over.
    pub fn agent_move(&mut self) -> Result<Option<usize>> {
        if self.engine.status().is_terminal() || self.engine.current_player() == self.human {
            return Ok(None);
        }
        let cell = self.agent.choose_move(self.engine.board())?;
        if !self.engine.apply_move(cell, &mut self.agent).accepted {
            return Err(Error::InvalidMove { position: cell });
        }
        Ok(Some(cell))
    }

    /// Play the human's move at `cell`; if the game continues the agent
    /// answers immediately.
    ///
    /// Rejected moves change nothing. The agent learns from every move of
    /// the interactive game, its own and the human's.
    pub fn make_move(&mut self, cell: usize) -> Result<MoveReport> {
        let status = self.engine.status();
        if !status.is_terminal() && self.engine.current_player() != self.human {
            return Ok(MoveReport {
                accepted: false,
                status,
                rejection: Some(MoveRejection::OutOfTurn),
                reply: None,
            });
        }

        let result = self.engine.apply_move(cell, &mut self.agent);
        if !result.accepted {
            return Ok(MoveReport {
                accepted: false,
                status: result.status,
                rejection: result.rejection,
                reply: None,
            });
        }

        let reply = self.agent_move()?;
        Ok(MoveReport {
            accepted: true,
            status: self.engine.status(),
            rejection: None,
            reply,
        })
    }

    /// Run `episodes` self-play episodes. The interactive board is cleared
    /// afterwards; learned values and the game counter carry over.
    pub fn train_agent(
        &mut self,
        episodes: usize,
        observers: Vec<Box<dyn Observer>>,
    ) -> Result<TrainingResult> {
        let config = TrainingConfig {
            episodes,
            ..self.training.clone()
        };
        let mut supervisor = observers.into_iter().fold(
            TrainingSupervisor::new(config).with_cancellation(self.cancel.clone()),
            |supervisor, observer| supervisor.with_observer(observer),
        );

        let result = supervisor.run(&mut self.agent);
        self.cancel.reset();
        self.engine.reset();
        result
    }

    /// Forget everything learned. The current board is left as it is.
    pub fn reset_learning(&mut self) {
        self.agent.reset_learning();
        tracing::info!(agent = self.agent.name(), "Learning reset");
    }

    /// Clear the board only.
    pub fn reset_game(&mut self) {
        self.engine.reset();
        tracing::debug!("Game reset");
    }
}

/// Thread-safe handle to a [`Session`]
///
/// The cancellation token lives outside the lock, so a training run holding
/// the session can still be cancelled from another thread.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
    cancel: CancellationToken,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        let cancel = session.cancellation_token();
        Self {
            inner: Arc::new(Mutex::new(session)),
            cancel,
        }
    }

    fn lock(&self, operation: &str) -> Result<MutexGuard<'_, Session>> {
        self.inner.lock().map_err(|_| Error::LockPoisoned {
            operation: operation.to_string(),
        })
    }

    /// Run `f` with exclusive access to the session
    pub fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Result<R> {
        let mut session = self.lock("access session")?;
        Ok(f(&mut session))
    }

    pub fn make_move(&self, cell: usize) -> Result<MoveReport> {
        self.lock("make a move")?.make_move(cell)
    }

    pub fn train_agent(
        &self,
        episodes: usize,
        observers: Vec<Box<dyn Observer>>,
    ) -> Result<TrainingResult> {
        self.lock("train the agent")?.train_agent(episodes, observers)
    }

    pub fn reset_learning(&self) -> Result<()> {
        self.lock("reset learning")?.reset_learning();
        Ok(())
    }

    pub fn reset_game(&self) -> Result<()> {
        self.lock("reset the game")?.reset_game();
        Ok(())
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AgentConfig;

    fn session(human: Player, first_player: Player) -> Session {
        let agent = QAgent::new(AgentConfig::default().with_seed(5)).unwrap();
        Session::new(
            agent,
            human,
            TrainingConfig {
                first_player,
                ..TrainingConfig::default()
            },
        )
    }

    #[test]
    fn accepted_move_gets_a_reply() {
        let mut session = session(Player::X, Player::X);
        let report = session.make_move(4).unwrap();

        assert!(report.accepted);
        assert_eq!(report.status, GameStatus::InProgress);
        let reply = report.reply.unwrap();
        assert_ne!(reply, 4);
        assert_eq!(session.board().occupied_count(), 2);
        assert_eq!(session.board().to_move, Player::X);
    }

    #[test]
    fn occupied_cell_is_a_no_op() {
        let mut session = session(Player::X, Player::X);
        session.make_move(0).unwrap();
        let board = *session.board();

        let report = session.make_move(0).unwrap();
        assert!(!report.accepted);
        assert_eq!(report.rejection, Some(MoveRejection::Occupied));
        assert_eq!(report.reply, None);
        assert_eq!(*session.board(), board);
    }

    #[test]
    fn agent_opens_when_it_moves_first() {
        let mut session = session(Player::O, Player::X);
        let report = session.make_move(0).unwrap();
        assert_eq!(report.rejection, Some(MoveRejection::OutOfTurn));

        let opening = session.agent_move().unwrap();
        assert!(opening.is_some());
        assert_eq!(session.agent_move().unwrap(), None);
        assert_eq!(session.board().to_move, Player::O);
    }

    #[test]
    fn reset_game_restores_empty_key_and_keeps_learning() {
        let mut session = session(Player::X, Player::X);
        session.train_agent(20, Vec::new()).unwrap();
        session.make_move(4).unwrap();
        let learned = session.agent().store().len();

        session.reset_game();
        assert_eq!(session.board().key(), BoardState::new().key());
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.agent().store().len(), learned);
    }

    #[test]
    fn reset_learning_twice_leaves_empty_table() {
        let mut session = session(Player::X, Player::X);
        session.train_agent(30, Vec::new()).unwrap();
        assert_eq!(session.agent().games_played(), 30);

        for _ in 0..2 {
            session.reset_learning();
            assert!(session.agent().store().is_empty());
            assert_eq!(session.agent().games_played(), 0);
        }
    }

    #[test]
    fn training_clears_board_and_token() {
        let mut session = session(Player::X, Player::X);
        session.make_move(4).unwrap();
        session.cancellation_token().cancel();

        let result = session.train_agent(10, Vec::new()).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.episodes, 0);
        assert_eq!(session.board().occupied_count(), 0);
        assert!(!session.cancellation_token().is_cancelled());
    }

    #[test]
    fn shared_session_serializes_access() {
        let shared = SharedSession::new(session(Player::X, Player::X));
        let worker = {
            let shared = shared.clone();
            std::thread::spawn(move || shared.train_agent(50, Vec::new()))
        };
        let result = worker.join().unwrap().unwrap();
        assert_eq!(result.episodes, 50);

        shared.reset_game().unwrap();
        let report = shared.make_move(4).unwrap();
        assert!(report.accepted);
        let played = shared
            .with_session(|session| session.agent().games_played())
            .unwrap();
        assert_eq!(played, 50);
    }
}
