//! Epsilon schedule for exploration

use serde::{Deserialize, Serialize};

/// Exploration rate, decayed multiplicatively once per finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplorationSchedule {
    epsilon: f64,
    initial: f64,
    decay: f64,
    min: f64,
}

impl ExplorationSchedule {
    pub fn new(initial: f64, decay: f64, min: f64) -> Self {
        Self {
            epsilon: initial,
            initial,
            decay,
            min,
        }
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// ε ← max(min, ε·decay)
    pub fn decay(&mut self) {
        self.epsilon = (self.epsilon * self.decay).max(self.min);
    }

    pub fn reset(&mut self) {
        self.epsilon = self.initial;
    }

    /// Restore a previously reached rate, e.g. after loading a saved agent
    pub(crate) fn resume_at(&mut self, epsilon: f64) {
        self.epsilon = epsilon.max(self.min);
    }
}
