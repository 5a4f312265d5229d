//! Repository port for agent persistence.
//!
//! Saving is an optional extension: nothing in training or play depends on
//! it, and a session runs entirely in memory unless asked to save.

use std::path::Path;

use crate::{Result, q_learning::SavedAgent};

/// Port for persisting and loading trained agents.
///
/// # Examples
///
/// ```no_run
/// use qttt::ports::AgentRepository;
/// use qttt::q_learning::SavedAgent;
/// use std::path::Path;
///
/// fn save_agent<R: AgentRepository>(
///     repo: &R,
///     agent: &SavedAgent,
///     path: &Path,
/// ) -> qttt::Result<()> {
///     repo.save(agent, path)
/// }
/// ```
pub trait AgentRepository {
    /// Save an agent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()>;

    /// Load an agent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist or the data is not a
    /// valid snapshot.
    fn load(&self, path: &Path) -> Result<SavedAgent>;
}
