//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue},
    Env, Policy,
};
use anyhow::Result;
use log::debug;
use rand::{rngs::SmallRng, SeedableRng};

/// Runs a fixed number of episodes and reports their statistics.
///
/// Each episode starts from a random start cell of its own environment and runs the
/// policy until the episode terminates or `max_steps` steps are taken, whichever comes
/// first. A greedy policy can loop forever on a grid, hence the cap.
///
/// The returned record holds
///
/// * `eval_return` - mean return over the episodes,
/// * `eval_success_rate` - fraction of the episodes ending with a positive reward,
/// * `eval_steps` - mean number of steps.
///
/// ```no_run
/// use sarsa_grid_core::{
///     Cell, DefaultEvaluator, Engine, EngineConfig, Evaluator, GridEnv, GridEnvConfig,
/// };
///
/// # fn main() -> anyhow::Result<()> {
/// let env_config = GridEnvConfig::new(4, 4).reward(Cell::new(3, 3), 1);
/// let mut engine = Engine::build(&EngineConfig::default().env(env_config.clone()), 0)?;
/// let mut evaluator = DefaultEvaluator::<GridEnv>::new(&env_config, 42, 10, 100)?;
///
/// let record = evaluator.evaluate(engine.agent_mut())?;
/// println!("{}", record.get_scalar("eval_return")?);
/// # Ok(())
/// # }
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// Step limit of an episode.
    max_steps: usize,

    env: E,
    rng: SmallRng,
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// `seed` only drives the start cells of the evaluation episodes.
    pub fn new(config: &E::Config, seed: u64, n_episodes: usize, max_steps: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            max_steps,
            env: E::build(config)?,
            rng: SmallRng::seed_from_u64(seed),
        })
    }
}

impl<E, P> Evaluator<E, P> for DefaultEvaluator<E>
where
    E: Env,
    P: Policy<E>,
{
    fn evaluate(&mut self, policy: &mut P) -> Result<Record> {
        let mut r_total = 0f32;
        let mut n_success = 0usize;
        let mut n_steps = 0usize;

        for ix in 0..self.n_episodes {
            let mut obs = self.env.reset(&mut self.rng);
            let mut r_episode = 0f32;

            for _ in 0..self.max_steps {
                let act = policy.sample(&obs);
                let step = self.env.step(&obs, &act);
                r_episode += step.reward;
                n_steps += 1;

                if step.is_terminated {
                    if step.reward > 0.0 {
                        n_success += 1;
                    }
                    break;
                }
                match step.next_obs() {
                    Some(next) => obs = next.clone(),
                    None => break,
                }
            }
            debug!("Evaluation episode {}: return {}", ix, r_episode);
            r_total += r_episode;
        }

        let n = self.n_episodes.max(1) as f32;
        Ok(Record::from_slice(&[
            ("eval_return", RecordValue::Scalar(r_total / n)),
            ("eval_success_rate", RecordValue::Scalar(n_success as f32 / n)),
            ("eval_steps", RecordValue::Scalar(n_steps as f32 / n)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Cell, GridEnv, GridEnvConfig};

    /// Moves right, then up.
    struct RightThenUp {
        width: i32,
    }

    impl Policy<GridEnv> for RightThenUp {
        fn sample(&mut self, obs: &Cell) -> Action {
            if obs.x < self.width - 1 {
                Action::Right
            } else {
                Action::Up
            }
        }
    }

    /// Walks into the left wall.
    struct AlwaysLeft;

    impl Policy<GridEnv> for AlwaysLeft {
        fn sample(&mut self, _obs: &Cell) -> Action {
            Action::Left
        }
    }

    fn config() -> GridEnvConfig {
        GridEnvConfig::new(4, 4).reward(Cell::new(3, 3), 1)
    }

    #[test]
    fn test_successful_policy() -> Result<()> {
        let mut evaluator = DefaultEvaluator::<GridEnv>::new(&config(), 0, 10, 100)?;
        let record = evaluator.evaluate(&mut RightThenUp { width: 4 })?;
        assert_eq!(record.get_scalar("eval_return")?, 1.0);
        assert_eq!(record.get_scalar("eval_success_rate")?, 1.0);
        let steps = record.get_scalar("eval_steps")?;
        assert!(steps >= 1.0 && steps <= 6.0);
        Ok(())
    }

    #[test]
    fn test_failing_policy() -> Result<()> {
        let mut evaluator = DefaultEvaluator::<GridEnv>::new(&config(), 0, 5, 100)?;
        let record = evaluator.evaluate(&mut AlwaysLeft)?;
        assert_eq!(record.get_scalar("eval_return")?, 0.0);
        assert_eq!(record.get_scalar("eval_success_rate")?, 0.0);
        Ok(())
    }

    #[test]
    fn test_step_cap() -> Result<()> {
        let mut evaluator = DefaultEvaluator::<GridEnv>::new(&config(), 0, 3, 2)?;
        let record = evaluator.evaluate(&mut AlwaysLeft)?;
        assert!(record.get_scalar("eval_steps")? <= 2.0);
        Ok(())
    }
}
