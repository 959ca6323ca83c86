//! Configuration of [`Engine`](super::Engine).
use super::Cadence;
use crate::{GridEnvConfig, SarsaConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Engine`](super::Engine).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
pub struct EngineConfig {
    /// The grid.
    pub env: GridEnvConfig,

    /// Hyper-parameters of the agent.
    pub agent: SarsaConfig,

    /// Episodes are cut after this many steps. `None` lets an episode run until it
    /// terminates.
    #[serde(default)]
    pub max_episode_steps: Option<usize>,

    /// Initial yield cadence of [`Engine::run_until_yield`](super::Engine::run_until_yield).
    #[serde(default)]
    pub cadence: Cadence,
}

impl EngineConfig {
    /// Sets the configuration of the grid.
    pub fn env(mut self, v: GridEnvConfig) -> Self {
        self.env = v;
        self
    }

    /// Sets the configuration of the agent.
    pub fn agent(mut self, v: SarsaConfig) -> Self {
        self.agent = v;
        self
    }

    /// Sets the step limit of an episode.
    pub fn max_episode_steps(mut self, v: usize) -> Self {
        self.max_episode_steps = Some(v);
        self
    }

    /// Sets the yield cadence.
    pub fn cadence(mut self, v: Cadence) -> Self {
        self.cadence = v;
        self
    }

    /// Constructs [`EngineConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`EngineConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
