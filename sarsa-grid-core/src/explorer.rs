//! Exploration strategy of the SARSA agent.
use crate::{error::SarsaError, Action, ActionRow};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration of [`EpsilonGreedy`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedyConfig {
    /// Epsilon of the first episode.
    pub eps_start: f32,

    /// Floor of epsilon.
    pub eps_final: f32,

    /// Amount subtracted from epsilon after every completed episode.
    pub eps_decay: f32,

    /// Take the worst instead of the best action in odd-numbered episodes.
    pub anti_greedy_on_odd_episodes: bool,
}

impl Default for EpsilonGreedyConfig {
    fn default() -> Self {
        Self {
            eps_start: 0.9,
            eps_final: 0.05,
            eps_decay: 0.0001,
            anti_greedy_on_odd_episodes: true,
        }
    }
}

impl EpsilonGreedyConfig {
    /// Set the epsilon value at the start.
    pub fn eps_start(mut self, v: f32) -> Self {
        self.eps_start = v;
        self
    }

    /// Set the floor of epsilon.
    pub fn eps_final(mut self, v: f32) -> Self {
        self.eps_final = v;
        self
    }

    /// Set the per-episode decrement of epsilon.
    pub fn eps_decay(mut self, v: f32) -> Self {
        self.eps_decay = v;
        self
    }

    /// Enable or disable the anti-greedy alternation.
    pub fn anti_greedy_on_odd_episodes(mut self, v: bool) -> Self {
        self.anti_greedy_on_odd_episodes = v;
        self
    }

    /// A constant epsilon with no alternation.
    pub fn constant(eps: f32) -> Self {
        Self {
            eps_start: eps,
            eps_final: eps,
            eps_decay: 0.0,
            anti_greedy_on_odd_episodes: false,
        }
    }

    /// Checks `0 <= eps_final <= eps_start <= 1` and `eps_decay >= 0`.
    pub fn validate(&self) -> Result<(), SarsaError> {
        if !(0.0..=1.0).contains(&self.eps_start) {
            return Err(SarsaError::invalid_parameter("eps_start", self.eps_start));
        }
        if !(0.0..=self.eps_start).contains(&self.eps_final) {
            return Err(SarsaError::invalid_parameter("eps_final", self.eps_final));
        }
        if !(self.eps_decay >= 0.0) {
            return Err(SarsaError::invalid_parameter("eps_decay", self.eps_decay));
        }
        Ok(())
    }
}

/// Epsilon-greedy action selection with linear per-episode decay.
///
/// With probability epsilon the action is uniformly random. Otherwise the best action
/// of the row is taken, or, if the anti-greedy alternation is enabled, the worst action
/// in odd-numbered episodes.
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f32,
    eps_final: f32,
    eps_decay: f32,
    anti_greedy_on_odd_episodes: bool,
}

impl EpsilonGreedy {
    /// Constructs epsilon-greedy explorer.
    pub fn build(config: &EpsilonGreedyConfig) -> Self {
        Self {
            epsilon: config.eps_start,
            eps_final: config.eps_final,
            eps_decay: config.eps_decay,
            anti_greedy_on_odd_episodes: config.anti_greedy_on_odd_episodes,
        }
    }

    /// Current epsilon.
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Overrides epsilon. The next decay starts from this value.
    pub fn set_epsilon(&mut self, v: f32) {
        self.epsilon = v;
    }

    /// Returns `true` if odd-numbered episodes take the worst action.
    pub fn is_anti_greedy_on_odd_episodes(&self) -> bool {
        self.anti_greedy_on_odd_episodes
    }

    /// Applies the per-episode decay: `epsilon = max(eps_final, epsilon - eps_decay)`.
    pub fn decay(&mut self) {
        self.epsilon = self.eps_final.max(self.epsilon - self.eps_decay);
    }

    /// Takes an action based on the action values of the successor state.
    ///
    /// `row` is `None` when the transition was blocked; there is no successor state and
    /// the action is drawn uniformly. A uniform number is drawn on every call, before
    /// the random action if any.
    pub fn action<R: Rng + ?Sized>(&self, row: Option<&ActionRow>, episode: usize, rng: &mut R) -> Action {
        let r = rng.gen::<f32>();
        match row {
            Some(row) if r >= self.epsilon => {
                if self.anti_greedy_on_odd_episodes && episode % 2 == 1 {
                    row.min().1
                } else {
                    row.max().1
                }
            }
            _ => Action::sample(rng),
        }
    }
}
