//! Serialization support for Q-learning agents.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result, app::AgentConfig, q_learning::agent::QAgent, q_learning::value_store::ValueStore,
};

/// Everything needed to resume a trained agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    pub config: AgentConfig,
    pub store: ValueStore,
    pub games_played: u64,
    pub epsilon: f64,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QAgent) -> Self {
        Self {
            version: Self::VERSION,
            config: agent.config().clone(),
            store: agent.store().clone(),
            games_played: agent.games_played(),
            epsilon: agent.epsilon(),
        }
    }

    /// Rebuild the agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`] for a different format version,
    /// or [`Error::InvalidConfiguration`] if the stored config is invalid.
    pub fn to_agent(&self) -> Result<QAgent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        QAgent::from_parts(
            self.config.clone(),
            self.store.clone(),
            self.games_played,
            self.epsilon,
        )
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize agent to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
