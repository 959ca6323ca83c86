use anyhow::Result;
use rand::{rngs::SmallRng, SeedableRng};
use sarsa_grid_core::{
    Action, ActionValueTable, Cell, EligibilityTable, Engine, EngineConfig, Env,
    EpsilonGreedyConfig, GridEnv, GridEnvConfig, SarsaConfig, StepOutcome,
};

fn env_config() -> GridEnvConfig {
    GridEnvConfig::new(4, 4)
        .reward(Cell::new(3, 3), 1)
        .reward(Cell::new(0, 3), -1)
        .obstacle(Cell::new(1, 1))
        .obstacle(Cell::new(2, 2))
}

fn bits_q(q: &ActionValueTable) -> Vec<u32> {
    q.rows()
        .iter()
        .flat_map(|r| r.values().to_vec())
        .map(f32::to_bits)
        .collect()
}

fn bits_e(e: &EligibilityTable) -> Vec<u32> {
    e.rows()
        .iter()
        .flat_map(|r| r.values().to_vec())
        .map(f32::to_bits)
        .collect()
}

#[test]
fn test_start_draws_are_neutral() -> Result<()> {
    let env = GridEnv::build(&env_config())?;
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..10_000 {
        let cell = env.reset(&mut rng);
        assert!(env.contains(cell));
        assert_eq!(env.reward(cell), 0);
        assert!(!env.is_obstacle(cell));
    }
    Ok(())
}

#[test]
fn test_seeded_runs_are_identical() -> Result<()> {
    let config = EngineConfig::default().env(env_config());
    let mut engine1 = Engine::build(&config, 1234)?;
    let mut engine2 = Engine::build(&config, 1234)?;

    for _ in 0..2000 {
        let o1 = engine1.run_one_step();
        let o2 = engine2.run_one_step();
        assert_eq!(o1, o2);
        assert_eq!(engine1.actor_cell(), engine2.actor_cell());
    }

    assert_eq!(bits_q(engine1.q_table()), bits_q(engine2.q_table()));
    assert_eq!(
        bits_e(engine1.eligibility_table()),
        bits_e(engine2.eligibility_table())
    );
    assert_eq!(engine1.epsilon().to_bits(), engine2.epsilon().to_bits());
    Ok(())
}

#[test]
fn test_different_seeds_differ() -> Result<()> {
    let config = EngineConfig::default().env(env_config());
    let engine1 = Engine::build(&config, 1)?;
    let engine2 = Engine::build(&config, 2)?;
    assert_ne!(bits_q(engine1.q_table()), bits_q(engine2.q_table()));
    Ok(())
}

#[test]
fn test_zero_learn_rate_keeps_values() -> Result<()> {
    let agent = SarsaConfig::default().learn_rate(0.0);
    let config = EngineConfig::default().env(env_config()).agent(agent);
    let mut engine = Engine::build(&config, 0)?;
    let q = engine.q_table().clone();

    let mut traced = false;
    for _ in 0..200 {
        engine.run_one_step();
        traced |= engine
            .eligibility_table()
            .rows()
            .iter()
            .any(|r| r.values() != [0.0; 4]);
    }

    assert_eq!(engine.q_table(), &q);
    assert!(traced);
    Ok(())
}

#[test]
fn test_obstacles_are_never_written() -> Result<()> {
    let config = EngineConfig::default().env(env_config());
    let mut engine = Engine::build(&config, 5)?;
    let obstacles = [Cell::new(1, 1), Cell::new(2, 2)];
    let initial: Vec<_> = obstacles.iter().map(|c| engine.value_row(*c)).collect();

    for _ in 0..5000 {
        engine.run_one_step();
        for (cell, row) in obstacles.iter().zip(initial.iter()) {
            assert_eq!(&engine.value_row(*cell), row);
            assert_eq!(engine.eligibility_row(*cell), [0.0; 4]);
            assert_ne!(engine.actor_cell(), *cell);
        }
    }
    Ok(())
}

#[test]
fn test_epsilon_reaches_floor() -> Result<()> {
    let explorer = EpsilonGreedyConfig::default()
        .eps_start(0.9)
        .eps_final(0.05)
        .eps_decay(0.001);
    let config = EngineConfig::default()
        .env(env_config())
        .agent(SarsaConfig::default().explorer(explorer));
    let mut engine = Engine::build(&config, 0)?;

    for _ in 0..1000 {
        engine.run_one_episode();
    }
    assert_eq!(engine.episode(), 1000);
    assert_eq!(engine.epsilon(), 0.05);
    Ok(())
}

#[test]
fn test_epsilon_override_is_kept() -> Result<()> {
    let config = EngineConfig::default().env(env_config());
    let mut engine = Engine::build(&config, 0)?;
    engine.run_one_episode();
    engine.set_epsilon(1.0);
    let summary = engine.run_one_episode().unwrap();
    assert_eq!(summary.epsilon, 1.0);
    Ok(())
}

#[test]
fn test_stop_completes_episode_in_flight() -> Result<()> {
    let env = GridEnvConfig::new(30, 30).reward(Cell::new(29, 29), 1);
    let config = EngineConfig::default().env(env).max_episode_steps(50);
    let mut engine = Engine::build(&config, 9)?;

    while engine.run_one_step() != StepOutcome::Continue {}
    engine.request_stop();
    let episode = engine.episode();

    let mut outcome = engine.run_one_step();
    while outcome == StepOutcome::Continue {
        assert!(!engine.is_stopped());
        outcome = engine.run_one_step();
    }
    match outcome {
        StepOutcome::EpisodeEnd(summary) => assert_eq!(summary.episode, episode),
        _ => panic!("the episode in flight must complete"),
    }
    assert!(engine.is_stopped());
    assert_eq!(engine.run_one_step(), StepOutcome::Stopped);
    Ok(())
}

#[test]
fn test_actions_are_rows_in_order() -> Result<()> {
    let config = EngineConfig::default().env(env_config());
    let engine = Engine::build(&config, 0)?;
    let cell = Cell::new(0, 0);
    let row = engine.value_row(cell);
    for act in Action::ALL.iter() {
        assert_eq!(row[act.index()], engine.q_table().get(cell, *act));
    }
    Ok(())
}

#[test]
fn test_greedy_episodes_end_at_step_limit() -> Result<()> {
    let agent = SarsaConfig::default().explorer(EpsilonGreedyConfig::constant(0.0));
    let config = EngineConfig::default()
        .env(GridEnvConfig::new(4, 4).reward(Cell::new(3, 3), 1))
        .agent(agent)
        .max_episode_steps(64);

    for seed in 0..5 {
        let mut engine = Engine::build(&config, seed)?;
        for _ in 0..50 {
            let summary = engine.run_one_episode().unwrap();
            assert!(summary.steps <= 64);
        }
        assert_eq!(engine.episode(), 50);
    }
    Ok(())
}
