//! Configuration of [`SarsaAgent`](super::SarsaAgent).
use crate::{error::SarsaError, EpsilonGreedyConfig};
use serde::{Deserialize, Serialize};

/// Configuration of [`SarsaAgent`](super::SarsaAgent).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SarsaConfig {
    /// Step size of the value update (alpha).
    pub learn_rate: f32,

    /// Discount factor (gamma).
    pub discount_factor: f32,

    /// Trace decay (lambda). Traces are multiplied by `eligibility_factor * discount_factor`
    /// after every step.
    pub eligibility_factor: f32,

    /// Lower bound of the initial action values.
    pub q_init_low: f32,

    /// Upper bound of the initial action values.
    pub q_init_high: f32,

    /// Action selection.
    pub explorer: EpsilonGreedyConfig,
}

impl Default for SarsaConfig {
    fn default() -> Self {
        Self {
            learn_rate: 0.1,
            discount_factor: 0.9,
            eligibility_factor: 0.9,
            q_init_low: 1e-4,
            q_init_high: 1e-3,
            explorer: EpsilonGreedyConfig::default(),
        }
    }
}

impl SarsaConfig {
    /// Sets the learning rate.
    pub fn learn_rate(mut self, v: f32) -> Self {
        self.learn_rate = v;
        self
    }

    /// Sets the discount factor.
    pub fn discount_factor(mut self, v: f32) -> Self {
        self.discount_factor = v;
        self
    }

    /// Sets the trace decay.
    pub fn eligibility_factor(mut self, v: f32) -> Self {
        self.eligibility_factor = v;
        self
    }

    /// Sets the range of the initial action values.
    pub fn q_init(mut self, low: f32, high: f32) -> Self {
        self.q_init_low = low;
        self.q_init_high = high;
        self
    }

    /// Sets the configuration of the explorer.
    pub fn explorer(mut self, v: EpsilonGreedyConfig) -> Self {
        self.explorer = v;
        self
    }

    /// Checks that every hyper-parameter is in its valid range.
    pub fn validate(&self) -> Result<(), SarsaError> {
        if !(self.learn_rate >= 0.0) {
            return Err(SarsaError::invalid_parameter("learn_rate", self.learn_rate));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(SarsaError::invalid_parameter(
                "discount_factor",
                self.discount_factor,
            ));
        }
        if !(0.0..=1.0).contains(&self.eligibility_factor) {
            return Err(SarsaError::invalid_parameter(
                "eligibility_factor",
                self.eligibility_factor,
            ));
        }
        if !self.q_init_low.is_finite() {
            return Err(SarsaError::invalid_parameter("q_init_low", self.q_init_low));
        }
        if !(self.q_init_low <= self.q_init_high) || !self.q_init_high.is_finite() {
            return Err(SarsaError::invalid_parameter("q_init_high", self.q_init_high));
        }
        self.explorer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(SarsaConfig::default().validate().is_ok());
        assert!(SarsaConfig::default().learn_rate(0.0).validate().is_ok());
        assert_eq!(
            SarsaConfig::default().learn_rate(-0.1).validate(),
            Err(SarsaError::invalid_parameter("learn_rate", -0.1))
        );
        assert!(SarsaConfig::default().discount_factor(1.1).validate().is_err());
        assert!(SarsaConfig::default().eligibility_factor(-0.5).validate().is_err());
        assert!(SarsaConfig::default().q_init(0.5, 0.1).validate().is_err());
        assert!(SarsaConfig::default().q_init(0.5, 0.5).validate().is_ok());
        assert_eq!(
            SarsaConfig::default().q_init(f32::NEG_INFINITY, 0.001).validate(),
            Err(SarsaError::invalid_parameter("q_init_low", f32::NEG_INFINITY))
        );
        assert!(SarsaConfig::default().q_init(f32::NAN, 0.001).validate().is_err());
        assert!(SarsaConfig::default().q_init(0.0, f32::INFINITY).validate().is_err());
    }
}
