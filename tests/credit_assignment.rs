//! End-to-end checks of how finished games credit both movers.

use qttt::{
    AgentConfig, BoardState, GameEngine, GameStatus, Player, QAgent,
    ports::{Learner, Transition},
    tictactoe::RewardScheme,
};

#[derive(Default)]
struct Recorder(Vec<Transition>);

impl Learner for Recorder {
    fn update(&mut self, transition: &Transition) {
        self.0.push(*transition);
    }
}

fn play(engine: &mut GameEngine, moves: &[usize], learner: &mut dyn Learner) {
    for &cell in moves {
        assert!(engine.apply_move(cell, learner).accepted, "move {cell} refused");
    }
}

#[test]
fn win_settles_winner_and_loser_once_each() {
    let mut engine = GameEngine::new(Player::X, RewardScheme::default());
    let mut recorder = Recorder::default();
    play(&mut engine, &[0, 3, 1, 4, 2], &mut recorder);

    assert_eq!(engine.status(), GameStatus::WonByFirstMover);
    let terminal: Vec<&Transition> = recorder.0.iter().filter(|t| t.done).collect();
    assert_eq!(terminal.len(), 2);

    let winner = terminal
        .iter()
        .find(|t| t.state.to_move == Player::X)
        .unwrap();
    assert_eq!((winner.action, winner.reward), (2, 1.0));

    let loser = terminal
        .iter()
        .find(|t| t.state.to_move == Player::O)
        .unwrap();
    assert_eq!((loser.action, loser.reward), (4, -1.0));

    // Four continuing plies plus the two terminal settlements.
    assert_eq!(recorder.0.len(), 6);
}

#[test]
fn intermediate_transitions_bootstrap_from_the_resulting_board() {
    let mut engine = GameEngine::new(Player::X, RewardScheme::default());
    let mut recorder = Recorder::default();
    play(&mut engine, &[4, 0, 8], &mut recorder);
    assert_eq!(recorder.0.len(), 3);

    let first = recorder.0[0];
    assert_eq!(first.state, BoardState::new());
    assert_eq!(first.action, 4);
    assert_eq!(first.reward, 0.0);
    assert!(!first.done);
    assert_eq!(first.next_state.encode(), "....X...._O");
    assert_eq!(first.next_state.to_move, Player::O);
}

#[test]
fn every_continuing_ply_updates_the_board_it_was_played_on() {
    let mut engine = GameEngine::new(Player::O, RewardScheme::default());
    let script = [4, 0, 8, 2, 1, 7, 6, 3, 5];

    for (ply, &cell) in script.iter().enumerate() {
        let before = *engine.board();
        let mut recorder = Recorder::default();
        assert!(engine.apply_move(cell, &mut recorder).accepted);
        if engine.status().is_terminal() {
            break;
        }

        assert_eq!(recorder.0.len(), 1, "ply {}", ply + 1);
        let t = recorder.0[0];
        assert_eq!((t.state, t.action), (before, cell));
        assert_eq!(t.next_state, *engine.board());
        assert_eq!(t.reward, 0.0);
        assert!(!t.done);
    }
}

#[test]
fn q_values_after_one_won_game() {
    let mut agent = QAgent::new(AgentConfig::default().with_seed(1)).unwrap();
    let mut engine = GameEngine::new(Player::X, agent.config().rewards);
    play(&mut engine, &[0, 3, 1, 4, 2], &mut agent);

    // α = 0.1 from zero: the winning move gets 0.1, the losing reply -0.1.
    let before_win = BoardState::from_string("XX.OO....").unwrap();
    assert!((agent.action_values(&before_win)[2] - 0.1).abs() < 1e-12);

    let before_loss = BoardState::from_string("XX.O.....").unwrap();
    assert!((agent.action_values(&before_loss)[4] + 0.1).abs() < 1e-12);

    // Earlier moves bootstrapped from boards nobody had valued yet.
    assert_eq!(agent.action_values(&BoardState::new())[0], 0.0);
}

#[test]
fn draw_pays_both_sides_the_draw_reward() {
    let mut agent = QAgent::new(AgentConfig::default().with_seed(1)).unwrap();
    let mut engine = GameEngine::new(Player::X, agent.config().rewards);
    // X O X / X O O / O X X
    play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8], &mut agent);
    assert_eq!(engine.status(), GameStatus::Draw);

    let before_last = BoardState::from_string("XOXXOOOX.").unwrap();
    assert!((agent.action_values(&before_last)[8] - 0.05).abs() < 1e-12);

    let before_o_last = BoardState::from_string("XOXXOO.X.").unwrap();
    assert!((agent.action_values(&before_o_last)[6] - 0.05).abs() < 1e-12);
}

#[test]
fn o_can_open_the_game() {
    let mut engine = GameEngine::new(Player::O, RewardScheme::default());
    let mut recorder = Recorder::default();
    play(&mut engine, &[0, 3, 1, 4, 2], &mut recorder);

    assert_eq!(engine.status(), GameStatus::WonByFirstMover);
    assert_eq!(engine.status().winner(Player::O), Some(Player::O));
    assert_eq!(engine.board().get(0).to_char(), 'O');
}
