//! Q-learning agent
//!
//! [`QAgent`] owns its value store, exploration schedule and random number
//! generator. It plays through [`MovePolicy`] and learns through [`Learner`],
//! so the same instance can sit on either side of a [`GameEngine`].
//!
//! [`GameEngine`]: crate::tictactoe::GameEngine

use rand::{SeedableRng, rngs::StdRng};

use super::{
    exploration::ExplorationSchedule, learner::TdParams, policy, value_store::ValueStore,
};
use crate::{
    Result,
    app::AgentConfig,
    ports::{Learner, MovePolicy, Transition},
    tictactoe::BoardState,
    types::ActionValues,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

fn build_store(config: &AgentConfig) -> ValueStore {
    match config.double {
        Some(bootstrap) => ValueStore::double(config.q_init, config.eager_init, bootstrap),
        None => ValueStore::single(config.q_init, config.eager_init),
    }
}

/// Tabular Q-learning agent (single or double table)
#[derive(Debug, Clone)]
pub struct QAgent {
    config: AgentConfig,
    store: ValueStore,
    td: TdParams,
    exploration: ExplorationSchedule,
    rng: StdRng,
    games_played: u64,
    name: String,
}

impl QAgent {
    /// Create an agent with empty value tables.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the configuration
    /// does not validate.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let name = if config.double.is_some() {
            "double-q"
        } else {
            "q-learning"
        };
        Ok(Self {
            store: build_store(&config),
            td: config.td_params(),
            exploration: config.exploration(),
            rng: build_rng(config.seed),
            games_played: 0,
            name: name.to_string(),
            config,
        })
    }

    /// Rebuild an agent from previously saved parts.
    pub(crate) fn from_parts(
        config: AgentConfig,
        store: ValueStore,
        games_played: u64,
        epsilon: f64,
    ) -> Result<Self> {
        let mut agent = Self::new(config)?;
        agent.store = store;
        agent.games_played = games_played;
        agent.exploration.resume_at(epsilon);
        Ok(agent)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    /// Count one finished episode and decay epsilon.
    pub fn finish_episode(&mut self) {
        self.games_played += 1;
        self.exploration.decay();
    }

    /// Values the agent would act on in `state`. Read-only: unseen states
    /// report `q_init` without being inserted.
    pub fn action_values(&self, state: &BoardState) -> ActionValues {
        self.store.action_values(state.key())
    }

    /// Exploit-only move choice, used for evaluation and inspection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidState`] when the board has no legal moves.
    pub fn greedy_move(&mut self, state: &BoardState) -> Result<usize> {
        policy::choose_move(
            &mut self.store,
            state.key(),
            &state.legal_moves(),
            0.0,
            &mut self.rng,
        )
    }

    /// Forget everything learned: rebuild the tables, zero the games-played
    /// counter and restore the exploration rate. Calling it twice is the same
    /// as calling it once.
    ///
    /// The tables come back exactly as [`QAgent::new`] built them. With
    /// `eager_init` that means every state present again at `q_init`, so the
    /// store is full rather than empty.
    pub fn reset_learning(&mut self) {
        self.store = build_store(&self.config);
        self.games_played = 0;
        self.exploration.reset();
        self.rng = build_rng(self.config.seed);
    }
}

impl MovePolicy for QAgent {
    fn choose_move(&mut self, state: &BoardState) -> Result<usize> {
        let epsilon = self.exploration.epsilon();
        policy::choose_move(
            &mut self.store,
            state.key(),
            &state.legal_moves(),
            epsilon,
            &mut self.rng,
        )
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl Learner for QAgent {
    fn update(&mut self, transition: &Transition) {
        self.td.apply(&mut self.store, transition, &mut self.rng);
    }
}
