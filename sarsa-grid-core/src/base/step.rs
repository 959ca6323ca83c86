//! Environment step.
use super::Env;

/// Outcome of taking an action in a state.
///
/// `obs` is the successor state. It is `None` when the action was blocked, i.e. it would
/// have left the grid or entered an obstacle. A blocked step is always terminal and has
/// zero reward, and there is no successor to look up.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Successor observation, `None` if the action was blocked.
    pub obs: Option<E::Obs>,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(act: E::Act, obs: Option<E::Obs>, reward: f32, is_terminated: bool) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
        }
    }

    /// Constructs a blocked step.
    pub fn blocked(act: E::Act) -> Self {
        Self::new(act, None, 0.0, true)
    }

    #[inline]
    /// Returns `true` if the action was blocked by the boundary or an obstacle.
    pub fn is_blocked(&self) -> bool {
        self.obs.is_none()
    }

    /// Returns the successor if the episode continues from it.
    pub fn next_obs(&self) -> Option<&E::Obs> {
        match self.is_terminated {
            true => None,
            false => self.obs.as_ref(),
        }
    }
}

impl<E: Env> std::fmt::Debug for Step<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("act", &self.act)
            .field("obs", &self.obs)
            .field("reward", &self.reward)
            .field("is_terminated", &self.is_terminated)
            .finish()
    }
}
