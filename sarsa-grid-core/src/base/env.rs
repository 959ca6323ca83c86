//! Environment.
use super::Step;
use anyhow::Result;
use rand::Rng;
use std::fmt::Debug;

/// Represents an environment, typically an MDP.
///
/// Unlike environments wrapping a simulator, the transition model is a pure function of
/// the environment and the given state: the caller owns the current state and feeds it
/// back with every step.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment, i.e. the state of the agent.
    type Obs: Clone + Debug;

    /// Action of the environment.
    type Act: Clone + Debug;

    /// Builds an environment, validating the given configuration.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Computes the outcome of taking `act` in `obs`.
    fn step(&self, obs: &Self::Obs, act: &Self::Act) -> Step<Self>
    where
        Self: Sized;

    /// Draws an initial state for a new episode.
    fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Obs;
}
