//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::{DoubleBootstrap, ExplorationSchedule, TdParams},
    tictactoe::RewardScheme,
};

/// Configuration for creating a Q-learning agent.
///
/// Every field has a default, so a JSON file only needs to name the values it
/// changes.
///
/// # Examples
///
/// ```
/// use qttt::app::AgentConfig;
/// use qttt::q_learning::DoubleBootstrap;
///
/// let config = AgentConfig::default()
///     .with_learning_rate(0.2)
///     .with_epsilon(0.3, 0.999, 0.01)
///     .with_double(DoubleBootstrap::CrossTable)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ, in [0, 1]
    pub discount_factor: f64,
    /// Value given to state-action pairs never updated
    pub q_init: f64,
    /// Initial exploration rate
    pub epsilon: f64,
    /// Multiplicative epsilon decay applied after each episode
    pub epsilon_decay: f64,
    /// Lower bound for epsilon
    pub min_epsilon: f64,
    pub rewards: RewardScheme,
    /// Double Q-learning with the given bootstrap rule; `None` uses one table
    pub double: Option<DoubleBootstrap>,
    /// Populate every state up front instead of on first reference
    pub eager_init: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        let td = TdParams::default();
        Self {
            learning_rate: td.learning_rate,
            discount_factor: td.discount_factor,
            q_init: 0.0,
            epsilon: 0.1,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
            rewards: RewardScheme::default(),
            double: None,
            eager_init: false,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_q_init(mut self, q_init: f64) -> Self {
        self.q_init = q_init;
        self
    }

    /// Set the exploration schedule: initial rate, per-episode decay and floor.
    pub fn with_epsilon(mut self, epsilon: f64, decay: f64, min: f64) -> Self {
        self.epsilon = epsilon;
        self.epsilon_decay = decay;
        self.min_epsilon = min;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardScheme) -> Self {
        self.rewards = rewards;
        self
    }

    /// Switch to double Q-learning.
    pub fn with_double(mut self, bootstrap: DoubleBootstrap) -> Self {
        self.double = Some(bootstrap);
        self
    }

    pub fn with_eager_init(mut self, eager: bool) -> Self {
        self.eager_init = eager;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn td_params(&self) -> TdParams {
        TdParams {
            learning_rate: self.learning_rate,
            discount_factor: self.discount_factor,
        }
    }

    pub fn exploration(&self) -> ExplorationSchedule {
        ExplorationSchedule::new(self.epsilon, self.epsilon_decay, self.min_epsilon)
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return invalid(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return invalid(format!(
                "discount_factor must be in [0, 1], got {}",
                self.discount_factor
            ));
        }
        for (name, value) in [
            ("epsilon", self.epsilon),
            ("epsilon_decay", self.epsilon_decay),
            ("min_epsilon", self.min_epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("{name} must be in [0, 1], got {value}"));
            }
        }
        if self.min_epsilon > self.epsilon {
            return invalid(format!(
                "min_epsilon ({}) exceeds epsilon ({})",
                self.min_epsilon, self.epsilon
            ));
        }
        let RewardScheme { win, draw, loss } = self.rewards;
        if ![self.q_init, win, draw, loss].iter().all(|v| v.is_finite()) {
            return invalid("q_init and rewards must be finite".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.discount_factor, 0.9);
        assert_eq!(config.epsilon, 0.1);
        assert!(config.double.is_none());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let cases = [
            AgentConfig::default().with_learning_rate(0.0),
            AgentConfig::default().with_learning_rate(1.5),
            AgentConfig::default().with_discount_factor(-0.1),
            AgentConfig::default().with_epsilon(1.2, 1.0, 0.0),
            AgentConfig::default().with_epsilon(0.1, 1.0, 0.5),
            AgentConfig::default().with_q_init(f64::NAN),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfiguration { .. })),
                "{config:?}"
            );
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AgentConfig =
            serde_json::from_str(r#"{"learning_rate": 0.3, "double": "cross_table"}"#).unwrap();
        assert_eq!(config.learning_rate, 0.3);
        assert_eq!(config.double, Some(DoubleBootstrap::CrossTable));
        assert_eq!(config.discount_factor, 0.9);
        assert_eq!(config.rewards, RewardScheme::default());
    }
}
