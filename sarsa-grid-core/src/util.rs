//! Utilities for interaction of policies and environments.
use crate::{
    record::{Record, RecordValue, Recorder},
    Env, Policy,
};
use rand::Rng;

/// Runs episodes with a policy, writing one record per step, and returns the return of
/// each episode.
///
/// A record holds `episode`, `step`, `reward`, and `obs`, the observation the action
/// was taken from. An episode ends when the step is terminal or after `max_steps`
/// steps.
pub fn eval_with_recorder<E, P, R, G>(
    env: &E,
    policy: &mut P,
    n_episodes: usize,
    max_steps: usize,
    rng: &mut G,
    recorder: &mut R,
) -> Vec<f32>
where
    E: Env,
    E::Obs: Into<RecordValue>,
    P: Policy<E>,
    R: Recorder,
    G: Rng + ?Sized,
{
    let mut rs = Vec::with_capacity(n_episodes);

    for episode in 0..n_episodes {
        let mut prev_obs = env.reset(rng);
        let mut r_total = 0.0;

        for count_step in 0..max_steps {
            let act = policy.sample(&prev_obs);
            let step = env.step(&prev_obs, &act);
            r_total += step.reward;

            let mut record = Record::empty();
            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            record.insert("reward", RecordValue::Scalar(step.reward));
            record.insert("obs", prev_obs.clone().into());
            recorder.write(record);

            match step.next_obs() {
                Some(obs) => prev_obs = obs.clone(),
                None => break,
            }
        }
        rs.push(r_total);
    }

    rs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record::BufferedRecorder, Action, Cell, GridEnv, GridEnvConfig};
    use rand::{rngs::SmallRng, SeedableRng};

    struct AlwaysUp;

    impl Policy<GridEnv> for AlwaysUp {
        fn sample(&mut self, _obs: &Cell) -> Action {
            Action::Up
        }
    }

    #[test]
    fn test_eval_with_recorder() {
        // A single column: walking up always reaches the goal at the top.
        let config = GridEnvConfig::new(1, 5).reward(Cell::new(0, 4), 1);
        let env = GridEnv::build(&config).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut recorder = BufferedRecorder::new();

        let rs = eval_with_recorder(&env, &mut AlwaysUp, 3, 100, &mut rng, &mut recorder);
        assert_eq!(rs, vec![1.0; 3]);

        let last = recorder.iter().last().unwrap();
        assert_eq!(last.get_scalar("reward").unwrap(), 1.0);
        assert_eq!(last.get_array1("obs").unwrap(), vec![0.0, 3.0]);
        // each episode takes between 1 and 4 steps
        assert!(recorder.len() >= 3 && recorder.len() <= 12);
    }
}
