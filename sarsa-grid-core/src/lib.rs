#![warn(missing_docs)]
//! Tabular SARSA(λ) with eligibility traces on a 2D grid world.
//!
//! The crate is organised around a handful of objects:
//!
//! * [`GridEnv`] computes transitions on a grid with rewards and obstacles.
//! * [`ActionValueTable`] and [`EligibilityTable`] hold one value per cell and [`Action`].
//! * [`EpsilonGreedy`] selects actions from a row of action values.
//! * [`SarsaAgent`] owns the tables and applies the SARSA(λ) update.
//! * [`Engine`] is the episode/step state machine a host drives step by step.
//! * [`Trainer`] runs an [`Engine`] for a number of episodes with a recorder and an evaluator.
//!
//! ```no_run
//! use sarsa_grid_core::{Cell, Engine, EngineConfig, GridEnvConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let env = GridEnvConfig::new(4, 4).reward(Cell::new(3, 3), 1);
//! let config = EngineConfig::default().env(env);
//! let mut engine = Engine::build(&config, 42)?;
//!
//! for _ in 0..100 {
//!     engine.run_one_episode();
//! }
//! let (value, action) = engine.q_table().best_action(Cell::new(2, 3));
//! println!("{} {}", action, value);
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Env, Policy, Step};

mod grid;
pub use grid::{Action, Cell, GridEnv, GridEnvConfig, RewardCell};

mod table;
pub use table::{ActionRow, ActionValueTable, EligibilityTable};

mod explorer;
pub use explorer::{EpsilonGreedy, EpsilonGreedyConfig};

mod agent;
pub use agent::{SarsaAgent, SarsaConfig};

mod engine;
pub use engine::{
    Cadence, Engine, EngineConfig, EpisodeSummary, Snapshot, StepOutcome, Termination,
};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod trainer;
pub use trainer::{Trainer, TrainerConfig};
