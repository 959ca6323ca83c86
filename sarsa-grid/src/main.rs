use anyhow::Result;
use clap::Parser;
use log::info;
use rand::{rngs::SmallRng, SeedableRng};
use sarsa_grid_core::{
    record::{BufferedRecorder, LogRecorder},
    util::eval_with_recorder,
    DefaultEvaluator, Engine, EngineConfig, Evaluator, GridEnv, GridEnvConfig, Trainer,
    TrainerConfig,
};
use std::path::PathBuf;

/// Trains a tabular SARSA(lambda) agent on a grid world.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file of the engine configuration. Overrides the grid flags.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML file of the trainer configuration. Overrides --episodes.
    #[arg(long)]
    trainer_config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(short, long, default_value_t = 2000)]
    episodes: usize,

    /// Seed of the random number generators
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Width of a random grid
    #[arg(long, default_value_t = 20)]
    width: i32,

    /// Height of a random grid
    #[arg(long, default_value_t = 20)]
    height: i32,

    /// Number of obstacles of a random grid
    #[arg(long, default_value_t = 40)]
    obstacles: usize,

    /// Number of evaluation episodes after training
    #[arg(long, default_value_t = 100)]
    eval_episodes: usize,

    /// Log the greedy trajectory of one episode after training
    #[arg(short, long, default_value_t = false)]
    trace: bool,
}

/// Step limit of training and evaluation episodes. A greedy policy may loop.
///
/// `env` must be validated.
fn max_steps(env: &GridEnvConfig) -> usize {
    4 * env.width as usize * env.height as usize
}

/// Builds the engine configuration from `--config` or a random layout.
///
/// A configuration without `max_episode_steps` gets [`max_steps`] of its grid.
fn create_engine_config(args: &Args) -> Result<EngineConfig> {
    let config = match &args.config {
        Some(path) => {
            let config = EngineConfig::load(path)?;
            config.env.validate()?;
            config
        }
        None => {
            GridEnvConfig::new(args.width, args.height).validate()?;
            let mut rng = SmallRng::seed_from_u64(args.seed);
            let env = GridEnvConfig::random_layout(args.width, args.height, args.obstacles, &mut rng);
            EngineConfig::default().env(env)
        }
    };

    match config.max_episode_steps {
        Some(_) => Ok(config),
        None => {
            let n = max_steps(&config.env);
            Ok(config.max_episode_steps(n))
        }
    }
}

fn create_trainer_config(args: &Args, env: &GridEnvConfig) -> Result<TrainerConfig> {
    match &args.trainer_config {
        Some(path) => TrainerConfig::load(path),
        None => Ok(TrainerConfig::default()
            .max_episodes(args.episodes)
            .flush_record_interval(100)
            .eval_interval(500)
            .eval_episodes(20)
            .eval_max_steps(max_steps(env))),
    }
}

fn train(args: &Args, config: &EngineConfig) -> Result<Engine> {
    let trainer_config = create_trainer_config(args, &config.env)?;
    let mut engine = Engine::build(config, args.seed)?;
    let mut evaluator = DefaultEvaluator::<GridEnv>::new(
        &config.env,
        args.seed,
        trainer_config.eval_episodes,
        trainer_config.eval_max_steps,
    )?;
    let mut recorder = LogRecorder::new();
    let mut trainer = Trainer::build(trainer_config);

    trainer.train(&mut engine, &mut recorder, &mut evaluator)?;
    Ok(engine)
}

fn eval(args: &Args, config: &EngineConfig, engine: &mut Engine) -> Result<f32> {
    let mut evaluator = DefaultEvaluator::<GridEnv>::new(
        &config.env,
        args.seed.wrapping_add(1),
        args.eval_episodes,
        max_steps(&config.env),
    )?;
    let record = evaluator.evaluate(engine.agent_mut())?;
    let success_rate = record.get_scalar("eval_success_rate")?;
    info!(
        "Greedy policy: return {}, success rate {}, {} steps",
        record.get_scalar("eval_return")?,
        success_rate,
        record.get_scalar("eval_steps")?
    );
    Ok(success_rate)
}

fn trace(args: &Args, config: &EngineConfig, engine: &Engine) -> Result<()> {
    let env = engine.env();
    let mut agent = engine.agent().clone();
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut recorder = BufferedRecorder::new();
    eval_with_recorder(
        env,
        &mut agent,
        1,
        max_steps(&config.env),
        &mut rng,
        &mut recorder,
    );

    for record in recorder.iter() {
        let cell = record.get_array1("obs")?;
        let action = engine.q_table().best_action((cell[0] as i32, cell[1] as i32).into());
        info!(
            "step {}: ({}, {}) {} (value {:.4}), reward {}",
            record.get_scalar("step")?,
            cell[0],
            cell[1],
            action.1,
            action.0,
            record.get_scalar("reward")?
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = create_engine_config(&args)?;
    let mut engine = train(&args, &config)?;
    eval(&args, &config, &mut engine)?;
    if args.trace {
        trace(&args, &config, &engine)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarsa_grid_core::{error::SarsaError, Cell, EpsilonGreedyConfig, SarsaConfig};
    use tempdir::TempDir;

    fn args() -> Args {
        Args {
            config: None,
            trainer_config: None,
            episodes: 20,
            seed: 0,
            width: 5,
            height: 5,
            obstacles: 2,
            eval_episodes: 5,
            trace: true,
        }
    }

    #[test]
    fn test_random_layout() -> Result<()> {
        let args = args();
        let config = create_engine_config(&args)?;
        assert_eq!((config.env.width, config.env.height), (5, 5));
        assert_eq!(config.env.obstacles.len(), 2);
        assert_eq!(config.max_episode_steps, Some(100));

        let mut engine = train(&args, &config)?;
        assert_eq!(engine.episode(), 20);
        eval(&args, &config, &mut engine)?;
        trace(&args, &config, &engine)?;
        Ok(())
    }

    #[test]
    fn test_config_files() -> Result<()> {
        let tmp_dir = TempDir::new("sarsa_grid")?;
        let engine_path = tmp_dir.path().join("engine.yaml");
        let trainer_path = tmp_dir.path().join("trainer.yaml");

        EngineConfig::default()
            .env(GridEnvConfig::new(4, 4).reward(Cell::new(3, 3), 1))
            .agent(SarsaConfig::default().explorer(EpsilonGreedyConfig::constant(0.1)))
            .save(&engine_path)?;
        TrainerConfig::default()
            .max_episodes(300)
            .eval_max_steps(64)
            .save(&trainer_path)?;

        let args = Args {
            config: Some(engine_path),
            trainer_config: Some(trainer_path),
            ..args()
        };
        let config = create_engine_config(&args)?;
        assert_eq!(config.env.width, 4);

        let mut engine = train(&args, &config)?;
        assert_eq!(engine.episode(), 300);
        let success_rate = eval(&args, &config, &mut engine)?;
        assert!((0.0..=1.0).contains(&success_rate));
        Ok(())
    }

    #[test]
    fn test_greedy_config_finishes() -> Result<()> {
        let tmp_dir = TempDir::new("sarsa_grid")?;
        let engine_path = tmp_dir.path().join("engine.yaml");
        EngineConfig::default()
            .env(GridEnvConfig::new(4, 4).reward(Cell::new(3, 3), 1))
            .agent(SarsaConfig::default().explorer(EpsilonGreedyConfig::constant(0.0)))
            .save(&engine_path)?;

        for seed in 0..5 {
            let args = Args {
                config: Some(engine_path.clone()),
                episodes: 50,
                seed,
                ..args()
            };
            let config = create_engine_config(&args)?;
            assert_eq!(config.max_episode_steps, Some(64));

            let engine = train(&args, &config)?;
            assert_eq!(engine.episode(), 50);
            assert!(engine.total_steps() <= 50 * 64);
        }
        Ok(())
    }

    #[test]
    fn test_keeps_configured_step_limit() -> Result<()> {
        let tmp_dir = TempDir::new("sarsa_grid")?;
        let engine_path = tmp_dir.path().join("engine.yaml");
        EngineConfig::default()
            .env(GridEnvConfig::new(4, 4).reward(Cell::new(3, 3), 1))
            .max_episode_steps(10)
            .save(&engine_path)?;

        let args = Args {
            config: Some(engine_path),
            ..args()
        };
        assert_eq!(create_engine_config(&args)?.max_episode_steps, Some(10));
        Ok(())
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let args = Args {
            width: 70_000,
            height: 70_000,
            ..args()
        };
        let err = create_engine_config(&args).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SarsaError>(),
            Some(&SarsaError::InvalidGridSize {
                width: 70_000,
                height: 70_000
            })
        );
    }
}
