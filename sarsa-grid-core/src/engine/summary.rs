use crate::record::{Record, RecordValue};
use std::fmt;

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Entered a cell with positive reward.
    Goal,

    /// Entered a cell with negative reward.
    Penalty,

    /// Tried to leave the grid or enter an obstacle.
    Blocked,

    /// Reached the step limit of an episode.
    Truncated,
}

impl Termination {
    pub(super) fn from_reward(reward: f32) -> Self {
        if reward > 0.0 {
            Termination::Goal
        } else if reward < 0.0 {
            Termination::Penalty
        } else {
            Termination::Blocked
        }
    }

    /// Lower-case name, as written into records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::Goal => "goal",
            Termination::Penalty => "penalty",
            Termination::Blocked => "blocked",
            Termination::Truncated => "truncated",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics of a completed episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    /// Index of the episode, starting from zero.
    pub episode: usize,

    /// Number of steps taken.
    pub steps: usize,

    /// Sum of rewards.
    pub total_reward: f32,

    /// Why the episode ended.
    pub termination: Termination,

    /// Epsilon used during the episode, before the end-of-episode decay.
    pub epsilon: f32,
}

impl EpisodeSummary {
    /// Converts the summary into a [`Record`].
    pub fn record(&self) -> Record {
        Record::from_slice(&[
            ("episode", RecordValue::Scalar(self.episode as f32)),
            ("episode_steps", RecordValue::Scalar(self.steps as f32)),
            ("episode_return", RecordValue::Scalar(self.total_reward)),
            ("epsilon", RecordValue::Scalar(self.epsilon)),
            (
                "termination",
                RecordValue::String(self.termination.as_str().to_string()),
            ),
        ])
    }
}

/// Result of [`Engine::run_one_step`](super::Engine::run_one_step).
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A step was taken and the episode goes on.
    Continue,

    /// A step was taken and it ended the episode.
    EpisodeEnd(EpisodeSummary),

    /// The engine is stopped; nothing was done.
    Stopped,
}
