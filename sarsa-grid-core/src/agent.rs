//! SARSA(λ) agent.
mod base;
mod config;
pub use base::SarsaAgent;
pub use config::SarsaConfig;
