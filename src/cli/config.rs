//! Shared configuration types for CLI commands

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{
    app::AgentConfig,
    pipeline::TrainingConfig,
    q_learning::DoubleBootstrap,
    tictactoe::{Player, RewardScheme},
};

/// Contents of a `--config` JSON file. Both sections are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub agent: AgentConfig,
    pub training: TrainingConfig,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Player token accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerArg {
    X,
    O,
}

impl From<PlayerArg> for Player {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::X => Player::X,
            PlayerArg::O => Player::O,
        }
    }
}

/// Double Q-learning bootstrap selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DoubleArg {
    /// Updated table bootstraps from its own max
    SameTable,
    /// Updated table selects, the other table evaluates
    CrossTable,
}

impl From<DoubleArg> for DoubleBootstrap {
    fn from(arg: DoubleArg) -> Self {
        match arg {
            DoubleArg::SameTable => DoubleBootstrap::SameTable,
            DoubleArg::CrossTable => DoubleBootstrap::CrossTable,
        }
    }
}

/// Agent hyperparameters; any flag given overrides the config file
#[derive(Args, Debug, Clone, Default)]
pub struct AgentArgs {
    /// JSON config file with `agent` and `training` sections
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Learning rate α (0.0-1.0]
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ [0.0-1.0]
    #[arg(long)]
    pub discount: Option<f64>,

    /// Initial exploration rate
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Epsilon decay per episode
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Minimum epsilon
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// Initial Q-value
    #[arg(long)]
    pub q_init: Option<f64>,

    /// Reward schedule (e.g. win=1,draw=0.5,loss=-1)
    #[arg(long)]
    pub reward: Option<String>,

    /// Use double Q-learning with the given bootstrap rule
    #[arg(long, value_enum)]
    pub double: Option<DoubleArg>,

    /// Populate all 3^9 table entries up front
    #[arg(long, default_value_t = false)]
    pub eager_init: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AgentArgs {
    /// Merge the config file (if any) with command-line overrides
    pub fn resolve(&self) -> Result<ConfigFile> {
        let mut file = ConfigFile::load_or_default(self.config.as_deref())?;
        let agent = &mut file.agent;

        if let Some(value) = self.learning_rate {
            agent.learning_rate = value;
        }
        if let Some(value) = self.discount {
            agent.discount_factor = value;
        }
        if let Some(value) = self.epsilon {
            agent.epsilon = value;
        }
        if let Some(value) = self.epsilon_decay {
            agent.epsilon_decay = value;
        }
        if let Some(value) = self.min_epsilon {
            agent.min_epsilon = value;
        }
        if let Some(value) = self.q_init {
            agent.q_init = value;
        }
        if let Some(spec) = &self.reward {
            agent.rewards = parse_reward_schedule(spec, agent.rewards)?;
        }
        if let Some(double) = self.double {
            agent.double = Some(double.into());
        }
        if self.eager_init {
            agent.eager_init = true;
        }
        if let Some(seed) = self.seed {
            agent.seed = Some(seed);
        }

        agent.validate()?;
        Ok(file)
    }
}

/// Parse a reward schedule (e.g. "win=1,draw=0.5,loss=-1"); keys not given
/// keep their value from `base`
pub fn parse_reward_schedule(s: &str, base: RewardScheme) -> Result<RewardScheme> {
    let mut rewards = base;
    for part in s.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (key, value) = trimmed
            .split_once('=')
            .with_context(|| format!("Invalid reward entry '{trimmed}'. Expected key=value"))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("Invalid numeric reward '{value}' in '{trimmed}'"))?;
        match key.trim().to_ascii_lowercase().as_str() {
            "win" => rewards.win = value,
            "draw" => rewards.draw = value,
            "loss" => rewards.loss = value,
            other => anyhow::bail!("Unknown reward key '{other}'. Expected win, draw, or loss"),
        }
    }
    Ok(rewards)
}
