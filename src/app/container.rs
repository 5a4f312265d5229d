//! Dependency injection container.
//!
//! The container owns infrastructure dependencies (the agent repository) and
//! provides factory methods for agents and sessions.

use std::{path::Path, sync::Arc};

use super::{config::AgentConfig, session::Session};
use crate::{
    Result,
    adapters::MsgPackRepository,
    pipeline::TrainingConfig,
    ports::AgentRepository,
    q_learning::{QAgent, SavedAgent},
    tictactoe::Player,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ```
/// use qttt::app::{AgentConfig, App};
///
/// let app = App::new();
/// let agent = app.create_agent(AgentConfig::default().with_seed(42))?;
/// # Ok::<(), qttt::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use qttt::adapters::InMemoryRepository;
/// use qttt::app::App;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    repository: Arc<dyn AgentRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app using `MsgPackRepository` and no default seed.
    pub fn new() -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn repository(&self) -> Arc<dyn AgentRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    /// Create an agent with empty tables. A seed in `config` wins over the
    /// app default.
    pub fn create_agent(&self, mut config: AgentConfig) -> Result<QAgent> {
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        QAgent::new(config)
    }

    /// Create a session around a fresh agent.
    pub fn create_session(
        &self,
        config: AgentConfig,
        human: Player,
        training: TrainingConfig,
    ) -> Result<Session> {
        Ok(Session::new(self.create_agent(config)?, human, training))
    }

    /// Load an agent from persistent storage.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use qttt::app::App;
    /// use std::path::Path;
    ///
    /// let app = App::new();
    /// let agent = app.load_agent(Path::new("trained_agent.msgpack"))?;
    /// # Ok::<(), qttt::Error>(())
    /// ```
    pub fn load_agent(&self, path: &Path) -> Result<QAgent> {
        self.repository.load(path)?.to_agent()
    }

    /// Save an agent to persistent storage.
    pub fn save_agent(&self, agent: &QAgent, path: &Path) -> Result<()> {
        self.repository.save(&SavedAgent::from_agent(agent), path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
pub struct AppBuilder {
    repository: Option<Arc<dyn AgentRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            default_seed: None,
        }
    }

    /// Set a custom agent repository.
    pub fn with_repository<R: AgentRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Falls back to `MsgPackRepository` when no repository
    /// was given.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
