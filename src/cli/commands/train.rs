//! Train command - Train a Q-learning agent by self-play or against a fixed opponent

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{
    app::App,
    cli::{
        config::{AgentArgs, PlayerArg},
        output::{format_number, print_kv, print_section},
    },
    pipeline::{
        LearnFrom, LoggingObserver, MetricsObserver, MetricsSummary, OpponentKind,
        ProgressObserver, TrainingConfig, TrainingResult, TrainingSupervisor,
    },
    ports::MovePolicy,
    q_learning::QAgent,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Number of training episodes (overrides the config file)
    #[arg(long, short = 'n')]
    pub episodes: Option<usize>,

    /// Progress report interval in episodes
    #[arg(long)]
    pub report_interval: Option<usize>,

    /// Opponent to train against; omit for self-play
    #[arg(long, short = 'o', value_enum)]
    pub opponent: Option<OpponentArg>,

    /// Which token the agent controls against a fixed opponent
    #[arg(long, value_enum, default_value = "x")]
    pub agent_player: PlayerArg,

    /// Which token makes the first move
    #[arg(long, value_enum)]
    pub first_player: Option<PlayerArg>,

    /// Against a fixed opponent, learn only from the agent's own moves
    #[arg(long, default_value_t = false)]
    pub agent_seat_only: bool,

    /// Continue training a previously saved agent
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Output file for the trained agent (MessagePack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar and log progress instead
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OpponentArg {
    /// Uniformly random legal moves
    Random,
    /// Blocks immediate threats, otherwise random
    Defensive,
    /// First free cell in row-major order
    FixedOrder,
}

impl From<OpponentArg> for OpponentKind {
    fn from(arg: OpponentArg) -> Self {
        match arg {
            OpponentArg::Random => OpponentKind::Random,
            OpponentArg::Defensive => OpponentKind::Defensive,
            OpponentArg::FixedOrder => OpponentKind::FixedOrder,
        }
    }
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: &'a TrainingResult,
    metrics: MetricsSummary,
    opponent: String,
    agent_player: Option<Player>,
    seed: Option<u64>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let resolved = args.agent.resolve()?;
    let training = TrainingConfig {
        episodes: args.episodes.unwrap_or(resolved.training.episodes),
        report_interval: args
            .report_interval
            .unwrap_or(resolved.training.report_interval),
        first_player: args
            .first_player
            .map_or(resolved.training.first_player, Player::from),
        learn_from: if args.agent_seat_only {
            LearnFrom::AgentSeat
        } else {
            resolved.training.learn_from
        },
    };

    let app = App::new();
    let mut agent = match &args.resume {
        Some(path) => load_for_resume(&app, path)?,
        None => app.create_agent(resolved.agent.clone())?,
    };

    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let mut supervisor =
        TrainingSupervisor::new(training.clone()).with_observer(Box::new(Arc::clone(&metrics)));
    supervisor = if args.no_progress {
        supervisor.with_observer(Box::new(LoggingObserver))
    } else {
        supervisor.with_observer(Box::new(ProgressObserver::new()))
    };

    let (result, opponent_name, agent_player) = match args.opponent {
        Some(kind) => {
            let seed = resolved.agent.seed.map(|seed| seed.wrapping_add(1));
            let mut opponent = OpponentKind::from(kind).build(seed);
            let agent_player = Player::from(args.agent_player);
            let result = supervisor.run_against(&mut agent, opponent.as_mut(), agent_player)?;
            (result, opponent.name().to_string(), Some(agent_player))
        }
        None => (supervisor.run(&mut agent)?, "self-play".to_string(), None),
    };

    let metrics = metrics
        .lock()
        .map_err(|_| anyhow::anyhow!("metrics observer lock poisoned"))?
        .summary();
    print_summary(&agent, &result, &metrics, &opponent_name, agent_player);

    if let Some(path) = &args.output {
        app.save_agent(&agent, path)
            .with_context(|| format!("Failed to save agent to {}", path.display()))?;
        println!("\n✓ Agent saved to: {}", path.display());
    }

    if let Some(path) = &args.summary {
        let summary = TrainingSummaryFile {
            training: &result,
            metrics,
            opponent: opponent_name,
            agent_player,
            seed: agent.config().seed,
        };
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("✓ Summary written to: {}", path.display());
    }

    Ok(())
}

fn load_for_resume(app: &App, path: &Path) -> Result<QAgent> {
    let agent = app
        .load_agent(path)
        .with_context(|| format!("Failed to load agent from {}", path.display()))?;
    tracing::info!(
        games_played = agent.games_played(),
        epsilon = agent.epsilon(),
        "Resuming saved agent"
    );
    Ok(agent)
}

fn print_summary(
    agent: &QAgent,
    result: &TrainingResult,
    metrics: &MetricsSummary,
    opponent: &str,
    agent_player: Option<Player>,
) {
    print_section("Training Summary");
    print_kv("Agent", agent.name());
    print_kv("Opponent", opponent);
    print_kv(
        "Episodes",
        &format!(
            "{} / {}{}",
            format_number(result.episodes),
            format_number(result.requested),
            if result.cancelled { " (cancelled)" } else { "" }
        ),
    );
    print_kv("First mover wins", &format_number(result.first_mover_wins));
    print_kv("Second mover wins", &format_number(result.second_mover_wins));
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", format_number(result.draws), result.draw_rate() * 100.0),
    );
    if let Some(player) = agent_player {
        print_kv("Agent wins", &format_number(result.wins_for(player)));
    }
    print_kv("Avg game length", &format!("{:.2}", metrics.avg_game_length));
    print_kv("Final epsilon", &format!("{:.4}", result.final_epsilon));
    print_kv("Games played", &result.games_played.to_string());
    print_kv("States stored", &format_number(agent.store().len()));
}
