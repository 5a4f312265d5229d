//! Turn-alternating game engine
//!
//! [`GameEngine`] drives one episode: it applies moves, detects the end of the
//! game, and hands the resulting transitions to a [`Learner`]. It never renders
//! anything; callers receive a [`MoveResult`] and decide what to show.

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};
use crate::{
    ports::{Learner, Transition},
    types::BOARD_CELLS,
};

/// Status of an episode relative to the side that opened it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    WonByFirstMover,
    WonBySecondMover,
    Draw,
}

impl GameStatus {
    /// Status of an arbitrary board given which side opened.
    pub fn of(board: &BoardState, first_mover: Player) -> Self {
        match board.winner() {
            Some(winner) if winner == first_mover => GameStatus::WonByFirstMover,
            Some(_) => GameStatus::WonBySecondMover,
            None if board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Winning side, if the game was won.
    pub fn winner(self, first_mover: Player) -> Option<Player> {
        match self {
            GameStatus::WonByFirstMover => Some(first_mover),
            GameStatus::WonBySecondMover => Some(first_mover.opponent()),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

/// Reward values assigned at the end of a game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardScheme {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

impl Default for RewardScheme {
    fn default() -> Self {
        Self {
            win: 1.0,
            draw: 0.5,
            loss: -1.0,
        }
    }
}

/// Why a move was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRejection {
    Occupied,
    OutOfBounds,
    GameOver,
    /// The move came from a seat that is not on turn
    OutOfTurn,
}

/// Outcome of a single move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub accepted: bool,
    pub status: GameStatus,
    pub rejection: Option<MoveRejection>,
}

impl MoveResult {
    fn accepted(status: GameStatus) -> Self {
        Self {
            accepted: true,
            status,
            rejection: None,
        }
    }

    fn rejected(status: GameStatus, reason: MoveRejection) -> Self {
        Self {
            accepted: false,
            status,
            rejection: Some(reason),
        }
    }
}

/// A mover's most recent (state, action), kept so the ply that ends the game
/// can settle it with the final reward
#[derive(Debug, Clone, Copy)]
struct LastMove {
    state: BoardState,
    action: usize,
}

/// Turn state machine for a single game
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: BoardState,
    first_mover: Player,
    status: GameStatus,
    rewards: RewardScheme,
    last_moves: [Option<LastMove>; 2],
    moves: Vec<usize>,
}

impl GameEngine {
    pub fn new(first_mover: Player, rewards: RewardScheme) -> Self {
        Self {
            board: BoardState::new_with_player(first_mover),
            first_mover,
            status: GameStatus::InProgress,
            rewards,
            last_moves: [None, None],
            moves: Vec::with_capacity(BOARD_CELLS),
        }
    }

    /// Clear the board and both movers' last moves. Learned values are untouched.
    pub fn reset(&mut self) {
        self.board = BoardState::new_with_player(self.first_mover);
        self.status = GameStatus::InProgress;
        self.last_moves = [None, None];
        self.moves.clear();
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn first_mover(&self) -> Player {
        self.first_mover
    }

    pub fn current_player(&self) -> Player {
        self.board.to_move
    }

    /// Cells played so far, in order.
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Place the current player's marker at `position`.
    ///
    /// Rejected moves leave the engine untouched and produce no transition.
    /// Every accepted move updates the mover's own (state-before, action)
    /// pair exactly once: with reward 0 against the resulting board while the
    /// game continues, or with the win or draw reward when the move ends it.
    /// A game-ending move also settles the opponent's last pair with the
    /// complementary reward.
    pub fn apply_move(&mut self, position: usize, learner: &mut dyn Learner) -> MoveResult {
        if self.status.is_terminal() {
            return MoveResult::rejected(self.status, MoveRejection::GameOver);
        }
        if position >= BOARD_CELLS {
            return MoveResult::rejected(self.status, MoveRejection::OutOfBounds);
        }
        let Ok(after) = self.board.make_move(position) else {
            return MoveResult::rejected(self.status, MoveRejection::Occupied);
        };

        let before = self.board;
        let mover = before.to_move;
        self.board = after;
        self.moves.push(position);
        self.status = GameStatus::of(&after, self.first_mover);

        let (own_reward, other_reward) = match self.status {
            GameStatus::InProgress => {
                learner.update(&Transition {
                    state: before,
                    action: position,
                    reward: 0.0,
                    next_state: after,
                    done: false,
                });
                self.last_moves[mover.index()] = Some(LastMove {
                    state: before,
                    action: position,
                });
                return MoveResult::accepted(self.status);
            }
            GameStatus::Draw => (self.rewards.draw, self.rewards.draw),
            GameStatus::WonByFirstMover | GameStatus::WonBySecondMover => {
                (self.rewards.win, self.rewards.loss)
            }
        };

        learner.update(&Transition {
            state: before,
            action: position,
            reward: own_reward,
            next_state: after,
            done: true,
        });
        if let Some(last) = self.last_moves[mover.opponent().index()].take() {
            learner.update(&Transition {
                state: last.state,
                action: last.action,
                reward: other_reward,
                next_state: after,
                done: true,
            });
        }

        MoveResult::accepted(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NoLearning;

    #[derive(Default)]
    struct Recorder {
        transitions: Vec<Transition>,
    }

    impl Learner for Recorder {
        fn update(&mut self, transition: &Transition) {
            self.transitions.push(*transition);
        }
    }

    fn engine() -> GameEngine {
        GameEngine::new(Player::X, RewardScheme::default())
    }

    #[test]
    fn top_row_win_reported_on_fifth_ply() {
        let mut engine = engine();
        let mut learner = NoLearning;
        let script = [0, 3, 1, 4, 2];

        for (ply, &cell) in script.iter().enumerate() {
            let result = engine.apply_move(cell, &mut learner);
            assert!(result.accepted);
            if ply < 4 {
                assert_eq!(result.status, GameStatus::InProgress, "ply {}", ply + 1);
            } else {
                assert_eq!(result.status, GameStatus::WonByFirstMover);
            }
        }
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let mut engine = engine();
        let mut learner = NoLearning;
        let mut last = None;
        for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            last = Some(engine.apply_move(cell, &mut learner));
        }
        assert_eq!(last.unwrap().status, GameStatus::Draw);
        assert_eq!(engine.board().encode(), "XOXXOOOXX_O");
    }

    #[test]
    fn occupied_cell_is_rejected_without_state_change() {
        let mut engine = engine();
        let mut learner = Recorder::default();
        engine.apply_move(4, &mut learner);
        let board = *engine.board();

        let result = engine.apply_move(4, &mut learner);
        assert!(!result.accepted);
        assert_eq!(result.rejection, Some(MoveRejection::Occupied));
        assert_eq!(*engine.board(), board);
        assert_eq!(engine.current_player(), Player::O);
        assert!(learner.transitions.is_empty());
    }

    #[test]
    fn out_of_range_and_finished_games_are_rejected() {
        let mut engine = engine();
        let mut learner = NoLearning;
        assert_eq!(
            engine.apply_move(9, &mut learner).rejection,
            Some(MoveRejection::OutOfBounds)
        );

        for cell in [0, 3, 1, 4, 2] {
            engine.apply_move(cell, &mut learner);
        }
        let result = engine.apply_move(8, &mut learner);
        assert!(!result.accepted);
        assert_eq!(result.rejection, Some(MoveRejection::GameOver));
        assert_eq!(result.status, GameStatus::WonByFirstMover);
    }

    #[test]
    fn continuing_ply_updates_its_own_pair_at_once() {
        let mut engine = engine();
        let mut learner = Recorder::default();

        for (ply, cell) in [0, 3, 1, 4].into_iter().enumerate() {
            let before = *engine.board();
            engine.apply_move(cell, &mut learner);
            assert_eq!(learner.transitions.len(), ply + 1);

            let t = learner.transitions[ply];
            assert_eq!(t.state, before);
            assert_eq!(t.action, cell);
            assert_eq!(t.reward, 0.0);
            assert!(!t.done);
            assert_eq!(t.next_state, *engine.board());
        }
        assert_eq!(learner.transitions[0].next_state.encode(), "X........_O");
    }

    #[test]
    fn winning_ply_rewards_winner_and_penalises_loser() {
        let mut engine = engine();
        let mut learner = Recorder::default();
        for cell in [0, 3, 1, 4] {
            engine.apply_move(cell, &mut learner);
        }
        learner.transitions.clear();

        engine.apply_move(2, &mut learner);
        let rewards: Vec<(usize, f64, bool)> = learner
            .transitions
            .iter()
            .map(|t| (t.action, t.reward, t.done))
            .collect();
        // The winning move, then O's last move at 4 is settled.
        assert_eq!(rewards, vec![(2, 1.0, true), (4, -1.0, true)]);
        assert!(learner.transitions.iter().all(|t| t.next_state == *engine.board()));
    }

    #[test]
    fn draw_settles_both_movers() {
        let mut engine = engine();
        let mut learner = Recorder::default();
        for cell in [0, 1, 2, 4, 3, 5, 7, 6] {
            engine.apply_move(cell, &mut learner);
        }
        learner.transitions.clear();

        engine.apply_move(8, &mut learner);
        let terminal: Vec<(usize, f64)> = learner
            .transitions
            .iter()
            .filter(|t| t.done)
            .map(|t| (t.action, t.reward))
            .collect();
        assert_eq!(terminal, vec![(8, 0.5), (6, 0.5)]);
    }

    #[test]
    fn reset_restores_empty_board() {
        let mut engine = GameEngine::new(Player::O, RewardScheme::default());
        let mut learner = NoLearning;
        engine.apply_move(4, &mut learner);
        engine.reset();

        assert_eq!(engine.board().key(), BoardState::new().key());
        assert_eq!(engine.current_player(), Player::O);
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert!(engine.moves().is_empty());
    }

    #[test]
    fn second_mover_win_is_reported() {
        let mut engine = GameEngine::new(Player::O, RewardScheme::default());
        let mut learner = NoLearning;
        let mut status = GameStatus::InProgress;
        for cell in [0, 3, 1, 4, 8, 5] {
            status = engine.apply_move(cell, &mut learner).status;
        }
        assert_eq!(status, GameStatus::WonBySecondMover);
        assert_eq!(status.winner(Player::O), Some(Player::X));
    }
}
