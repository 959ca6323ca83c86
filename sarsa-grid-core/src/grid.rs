//! Grid world: cells, actions and the transition model.
mod action;
mod cell;
mod config;
mod env;
mod layout;
pub use action::Action;
pub use cell::Cell;
pub use config::{GridEnvConfig, RewardCell};
pub use env::GridEnv;
