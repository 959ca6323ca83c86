use serde::{Deserialize, Serialize};

/// How much work [`Engine::run_until_yield`](super::Engine::run_until_yield) does
/// before it hands control back to the host.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct Cadence {
    /// Yield after every step.
    pub step_by_step: bool,

    /// Otherwise yield after this many completed episodes. Zero counts as one.
    pub episodes_per_yield: usize,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            step_by_step: false,
            episodes_per_yield: 1,
        }
    }
}

impl Cadence {
    /// Yield after every step.
    pub fn step_by_step() -> Self {
        Self {
            step_by_step: true,
            ..Self::default()
        }
    }

    /// Yield after `n` completed episodes.
    pub fn episodes(n: usize) -> Self {
        Self {
            step_by_step: false,
            episodes_per_yield: n,
        }
    }
}
