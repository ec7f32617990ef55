//! Search configuration.

use std::time::Duration;

use crate::constants::{DEFAULT_EXPLORATION, DEFAULT_MOVE_CAP, DEFAULT_TIME_BUDGET_MS};
use crate::error::SearchError;

/// How a rollout picks the move it actually plays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RolloutPolicy {
    /// Always play a uniformly random legal move. When every sibling is
    /// already in the table the UCB1-preferred move is still computed and
    /// traced, but it does not steer the rollout.
    #[default]
    Uniform,
    /// Play the UCB1-preferred move whenever every sibling is in the table,
    /// and a uniformly random move otherwise.
    Ucb1,
}

/// Parameters of one move decision.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Wall-clock budget for the whole decision.
    pub time_budget: Duration,
    /// Maximum plies per rollout.
    pub move_cap: usize,
    /// UCB1 exploration constant.
    pub exploration: f64,
    /// How rollouts pick the move they play.
    pub rollout_policy: RolloutPolicy,
    /// Seed for the rollout RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(DEFAULT_TIME_BUDGET_MS),
            move_cap: DEFAULT_MOVE_CAP,
            exploration: DEFAULT_EXPLORATION,
            rollout_policy: RolloutPolicy::default(),
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn with_move_cap(mut self, move_cap: usize) -> Self {
        self.move_cap = move_cap;
        self
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_rollout_policy(mut self, rollout_policy: RolloutPolicy) -> Self {
        self.rollout_policy = rollout_policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject parameters the search cannot work with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}
