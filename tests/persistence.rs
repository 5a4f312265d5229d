//! Saving and loading trained agents through the app container.

use std::path::Path;

use qttt::{
    AgentConfig, BoardState, DoubleBootstrap, Error, QAgent, TrainingConfig, TrainingSupervisor,
    adapters::{InMemoryRepository, MsgPackRepository},
    app::App,
    ports::{AgentRepository, MovePolicy},
    q_learning::SavedAgent,
};
use tempfile::tempdir;

fn trained(config: AgentConfig, episodes: usize) -> QAgent {
    let mut agent = QAgent::new(config).unwrap();
    TrainingSupervisor::new(TrainingConfig {
        episodes,
        ..TrainingConfig::default()
    })
    .run(&mut agent)
    .unwrap();
    agent
}

fn assert_same_values(a: &QAgent, b: &QAgent) {
    assert_eq!(a.store(), b.store());
    for board in [".........", "X........", "X...O....", "XO.......", "XX.OO...."] {
        let board = BoardState::from_string(board).unwrap();
        assert_eq!(a.action_values(&board), b.action_values(&board));
    }
}

#[test]
fn msgpack_round_trip_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("agent.msgpack");
    let app = App::new();

    let agent = trained(
        AgentConfig::default()
            .with_epsilon(0.5, 0.99, 0.05)
            .with_seed(8),
        300,
    );
    app.save_agent(&agent, &path).unwrap();
    let loaded = app.load_agent(&path).unwrap();

    assert_same_values(&agent, &loaded);
    assert_eq!(loaded.games_played(), 300);
    assert_eq!(loaded.epsilon(), agent.epsilon());
    assert_eq!(loaded.config(), agent.config());
    assert_eq!(loaded.name(), agent.name());
}

#[test]
fn double_agent_survives_the_round_trip() {
    let app = App::for_testing()
        .with_repository(InMemoryRepository::new())
        .build();
    let agent = trained(
        AgentConfig::default()
            .with_double(DoubleBootstrap::CrossTable)
            .with_seed(4),
        200,
    );

    let path = Path::new("double");
    app.save_agent(&agent, path).unwrap();
    let loaded = app.load_agent(path).unwrap();

    assert!(loaded.store().is_double());
    assert_same_values(&agent, &loaded);
    assert_eq!(loaded.name(), "double-q");
}

#[test]
fn resumed_training_continues_the_counters() {
    let app = App::for_testing()
        .with_repository(InMemoryRepository::new())
        .build();
    let agent = trained(
        AgentConfig::default()
            .with_epsilon(0.4, 0.9, 0.1)
            .with_seed(21),
        10,
    );
    app.save_agent(&agent, Path::new("resume")).unwrap();

    let mut resumed = app.load_agent(Path::new("resume")).unwrap();
    TrainingSupervisor::new(TrainingConfig {
        episodes: 10,
        ..TrainingConfig::default()
    })
    .run(&mut resumed)
    .unwrap();

    assert_eq!(resumed.games_played(), 20);
    let expected = (0.4 * 0.9_f64.powi(20)).max(0.1);
    assert!((resumed.epsilon() - expected).abs() < 1e-9);
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempdir().unwrap();
    let result = App::new().load_agent(&dir.path().join("absent.msgpack"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn unknown_format_version_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("future.msgpack");
    let agent = QAgent::new(AgentConfig::default()).unwrap();

    let mut saved = SavedAgent::from_agent(&agent);
    saved.version = SavedAgent::VERSION + 1;
    MsgPackRepository::new().save(&saved, &path).unwrap();

    let result = App::new().load_agent(&path);
    assert!(matches!(result, Err(Error::UnsupportedVersion { .. })));
}

#[test]
fn corrupt_file_is_a_serialization_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.msgpack");
    std::fs::write(&path, b"definitely not msgpack").unwrap();

    let result = App::new().load_agent(&path);
    assert!(matches!(result, Err(Error::SerializationContext { .. })));
}
