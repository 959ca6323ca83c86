//! Episode/step state machine.
mod cadence;
mod config;
mod snapshot;
mod summary;
pub use cadence::Cadence;
pub use config::EngineConfig;
pub use snapshot::Snapshot;
pub use summary::{EpisodeSummary, StepOutcome, Termination};

use crate::{Action, ActionValueTable, Cell, EligibilityTable, Env, GridEnv, SarsaAgent};
use anyhow::Result;
use log::{debug, info, trace};
use rand::{rngs::SmallRng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    EpisodeStart,
    Running { act: Action },
    Stopped,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Runs SARSA(λ) episodes on a [`GridEnv`], one step per call.
///
/// The engine owns the environment, the agent and the random number generator, so a
/// run is fully determined by its [`EngineConfig`] and seed. The host drives it with
/// [`Engine::run_one_step`], [`Engine::run_one_episode`] or [`Engine::run_until_yield`]
/// and reads its state in between.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> EpisodeStart
///     EpisodeStart --> Running: reset traces, draw start cell and action
///     EpisodeStart --> Stopped: stop requested
///     Running --> Running: non-terminal step
///     Running --> EpisodeStart: terminal or truncated step, decay epsilon
///     Stopped --> [*]
/// ```
///
/// A stop request is observed only at episode boundaries. An episode in flight always
/// completes.
pub struct Engine {
    env: GridEnv,
    agent: SarsaAgent,
    rng: SmallRng,
    phase: Phase,
    actor: Cell,
    episode: usize,
    episode_steps: usize,
    episode_return: f32,
    total_steps: usize,
    max_episode_steps: Option<usize>,
    cadence: Cadence,
    stop_requested: bool,
}

impl Engine {
    /// Constructs an engine.
    ///
    /// Fails if the grid or the hyper-parameters in `config` are invalid.
    pub fn build(config: &EngineConfig, seed: u64) -> Result<Self> {
        let env = GridEnv::build(&config.env)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let agent = SarsaAgent::build(&config.agent, env.width(), env.height(), &mut rng)?;
        let actor = env.reset(&mut rng);
        info!(
            "Built engine on a {}x{} grid with seed {}",
            env.width(),
            env.height(),
            seed
        );

        Ok(Self {
            env,
            agent,
            rng,
            phase: Phase::EpisodeStart,
            actor,
            episode: 0,
            episode_steps: 0,
            episode_return: 0.0,
            total_steps: 0,
            max_episode_steps: config.max_episode_steps,
            cadence: config.cadence,
            stop_requested: false,
        })
    }

    fn begin_episode(&mut self) -> Action {
        self.agent.begin_episode();
        self.actor = self.env.reset(&mut self.rng);
        self.episode_steps = 0;
        self.episode_return = 0.0;
        Action::sample(&mut self.rng)
    }

    fn end_episode(&mut self, termination: Termination) -> EpisodeSummary {
        let summary = EpisodeSummary {
            episode: self.episode,
            steps: self.episode_steps,
            total_reward: self.episode_return,
            termination,
            epsilon: self.agent.epsilon(),
        };
        debug!(
            "Episode {}: {} steps, return {}, {}",
            summary.episode, summary.steps, summary.total_reward, summary.termination
        );

        self.agent.end_episode();
        self.episode += 1;
        self.phase = if self.stop_requested {
            info!("Stopped after {} episodes", self.episode);
            Phase::Stopped
        } else {
            Phase::EpisodeStart
        };
        summary
    }

    /// Takes a single step, starting a new episode first if needed.
    pub fn run_one_step(&mut self) -> StepOutcome {
        let act = match self.phase {
            Phase::Stopped => return StepOutcome::Stopped,
            Phase::EpisodeStart if self.stop_requested => {
                self.phase = Phase::Stopped;
                info!("Stopped after {} episodes", self.episode);
                return StepOutcome::Stopped;
            }
            Phase::EpisodeStart => self.begin_episode(),
            Phase::Running { act } => act,
        };

        let cell = self.actor;
        let step = self.env.step(&cell, &act);
        let next_act = self
            .agent
            .select_action(step.obs, self.episode, &mut self.rng);
        let delta = self.agent.update(cell, act, &step, next_act);

        self.episode_steps += 1;
        self.episode_return += step.reward;
        self.total_steps += 1;
        trace!(
            "{} {} -> {:?}, reward {}, delta {}",
            cell,
            act,
            step.obs,
            step.reward,
            delta
        );

        if step.is_terminated {
            return StepOutcome::EpisodeEnd(self.end_episode(Termination::from_reward(step.reward)));
        }

        // A step that is not terminal always lands on a cell.
        if let Some(next) = step.obs {
            self.actor = next;
        }
        match self.max_episode_steps {
            Some(max) if self.episode_steps >= max => {
                StepOutcome::EpisodeEnd(self.end_episode(Termination::Truncated))
            }
            _ => {
                self.phase = Phase::Running { act: next_act };
                StepOutcome::Continue
            }
        }
    }

    /// Runs steps until the current episode ends.
    ///
    /// Returns `None` if the engine is stopped.
    pub fn run_one_episode(&mut self) -> Option<EpisodeSummary> {
        loop {
            match self.run_one_step() {
                StepOutcome::Continue => continue,
                StepOutcome::EpisodeEnd(summary) => return Some(summary),
                StepOutcome::Stopped => return None,
            }
        }
    }

    /// Runs as much as the current [`Cadence`] asks for and returns the episodes that
    /// ended meanwhile.
    ///
    /// With [`Cadence::step_by_step`] this is a single step, otherwise
    /// `episodes_per_yield` whole episodes, fewer if the engine stops.
    pub fn run_until_yield(&mut self) -> Vec<EpisodeSummary> {
        if self.cadence.step_by_step {
            return match self.run_one_step() {
                StepOutcome::EpisodeEnd(summary) => vec![summary],
                _ => vec![],
            };
        }

        let n = self.cadence.episodes_per_yield.max(1);
        let mut summaries = Vec::with_capacity(n);
        for _ in 0..n {
            match self.run_one_episode() {
                Some(summary) => summaries.push(summary),
                None => break,
            }
        }
        summaries
    }

    /// Asks the engine to stop at the next episode boundary.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Whether a stop was requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Whether the engine has stopped. A stopped engine does nothing.
    pub fn is_stopped(&self) -> bool {
        self.phase == Phase::Stopped
    }

    /// Position of the actor.
    pub fn actor_cell(&self) -> Cell {
        self.actor
    }

    /// Action values of `cell` in [`Action::ALL`] order.
    pub fn value_row(&self, cell: Cell) -> [f32; Action::COUNT] {
        self.agent.q_table().row(cell).values()
    }

    /// Eligibility traces of `cell` in [`Action::ALL`] order.
    pub fn eligibility_row(&self, cell: Cell) -> [f32; Action::COUNT] {
        self.agent.eligibility_table().row(cell).values()
    }

    /// Largest eligibility trace of `cell`.
    pub fn max_eligibility(&self, cell: Cell) -> f32 {
        self.agent.eligibility_table().row(cell).max().0
    }

    /// Index of the current episode; the number of completed episodes.
    pub fn episode(&self) -> usize {
        self.episode
    }

    /// Current epsilon.
    pub fn epsilon(&self) -> f32 {
        self.agent.epsilon()
    }

    /// Overrides epsilon. Decay continues from the new value.
    pub fn set_epsilon(&mut self, v: f32) {
        self.agent.set_epsilon(v);
    }

    /// Number of steps taken since the engine was built.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Yield cadence of [`Engine::run_until_yield`].
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Changes the yield cadence.
    pub fn set_cadence(&mut self, cadence: Cadence) {
        self.cadence = cadence;
    }

    /// The action-value table.
    pub fn q_table(&self) -> &ActionValueTable {
        self.agent.q_table()
    }

    /// The eligibility table.
    pub fn eligibility_table(&self) -> &EligibilityTable {
        self.agent.eligibility_table()
    }

    /// The environment.
    pub fn env(&self) -> &GridEnv {
        &self.env
    }

    /// The agent.
    pub fn agent(&self) -> &SarsaAgent {
        &self.agent
    }

    /// Mutable access to the agent, e.g. for evaluating its greedy policy.
    pub fn agent_mut(&mut self) -> &mut SarsaAgent {
        &mut self.agent
    }

    /// Takes an owned copy of the observable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            q: self.agent.q_table().clone(),
            e: self.agent.eligibility_table().clone(),
            actor: self.actor,
            episode: self.episode,
            epsilon: self.agent.epsilon(),
            total_steps: self.total_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EpsilonGreedyConfig, GridEnvConfig, SarsaConfig};

    fn config() -> EngineConfig {
        EngineConfig::default().env(
            GridEnvConfig::new(4, 4)
                .reward(Cell::new(3, 3), 1)
                .reward(Cell::new(1, 2), -1),
        )
    }

    #[test]
    fn test_first_step_starts_episode() -> Result<()> {
        let mut engine = Engine::build(&config(), 0)?;
        assert_eq!(engine.episode(), 0);
        assert_eq!(engine.total_steps(), 0);

        engine.run_one_step();
        assert_eq!(engine.total_steps(), 1);
        assert!(engine.env().is_start_cell(engine.actor_cell()));
        Ok(())
    }

    #[test]
    fn test_episode_end_decays_epsilon() -> Result<()> {
        let agent = SarsaConfig::default()
            .explorer(EpsilonGreedyConfig::default().eps_start(0.5).eps_decay(0.1));
        let mut engine = Engine::build(&config().agent(agent), 0)?;

        let summary = engine.run_one_episode().unwrap();
        assert_eq!(summary.episode, 0);
        assert_eq!(summary.epsilon, 0.5);
        assert!(summary.steps >= 1);
        assert_eq!(engine.episode(), 1);
        assert_eq!(engine.epsilon(), 0.5 - 0.1);
        Ok(())
    }

    #[test]
    fn test_termination_matches_reward() -> Result<()> {
        let mut engine = Engine::build(&config(), 3)?;
        for _ in 0..50 {
            let s = engine.run_one_episode().unwrap();
            match s.termination {
                Termination::Goal => assert_eq!(s.total_reward, 1.0),
                Termination::Penalty => assert_eq!(s.total_reward, -1.0),
                Termination::Blocked => assert_eq!(s.total_reward, 0.0),
                Termination::Truncated => panic!("no step limit"),
            }
        }
        Ok(())
    }

    #[test]
    fn test_truncation() -> Result<()> {
        // A large grid without obstacles near the centre rarely ends in one step.
        let env = GridEnvConfig::new(50, 50).reward(Cell::new(49, 49), 1);
        let config = EngineConfig::default().env(env).max_episode_steps(1);
        let mut engine = Engine::build(&config, 0)?;
        for _ in 0..20 {
            let s = engine.run_one_episode().unwrap();
            assert_eq!(s.steps, 1);
            assert_ne!(s.termination, Termination::Penalty);
        }
        Ok(())
    }

    #[test]
    fn test_stop_is_observed_at_episode_boundary() -> Result<()> {
        let env = GridEnvConfig::new(50, 50).reward(Cell::new(49, 49), 1);
        let config = EngineConfig::default().env(env).max_episode_steps(10);
        let mut engine = Engine::build(&config, 1)?;

        while engine.run_one_step() != StepOutcome::Continue {}
        let episode = engine.episode();
        engine.request_stop();
        assert!(!engine.is_stopped());

        // The episode in flight completes.
        let summary = engine.run_one_episode();
        assert_eq!(summary.map(|s| s.episode), Some(episode));
        assert!(engine.is_stopped());
        assert_eq!(engine.episode(), episode + 1);

        let steps = engine.total_steps();
        assert_eq!(engine.run_one_step(), StepOutcome::Stopped);
        assert_eq!(engine.run_one_episode(), None);
        assert!(engine.run_until_yield().is_empty());
        assert_eq!(engine.total_steps(), steps);
        Ok(())
    }

    #[test]
    fn test_stop_before_first_episode() -> Result<()> {
        let mut engine = Engine::build(&config(), 0)?;
        engine.request_stop();
        assert_eq!(engine.run_one_step(), StepOutcome::Stopped);
        assert!(engine.is_stopped());
        assert_eq!(engine.total_steps(), 0);
        Ok(())
    }

    #[test]
    fn test_run_until_yield() -> Result<()> {
        let mut engine = Engine::build(&config().cadence(Cadence::episodes(5)), 0)?;
        assert_eq!(engine.run_until_yield().len(), 5);
        assert_eq!(engine.episode(), 5);

        engine.set_cadence(Cadence::step_by_step());
        let steps = engine.total_steps();
        engine.run_until_yield();
        assert_eq!(engine.total_steps(), steps + 1);

        engine.set_cadence(Cadence::episodes(0));
        let episode = engine.episode();
        let summaries = engine.run_until_yield();
        // zero counts as one
        assert_eq!(summaries.len(), 1);
        assert_eq!(engine.episode(), episode + 1);
        Ok(())
    }

    #[test]
    fn test_set_epsilon() -> Result<()> {
        let mut engine = Engine::build(&config(), 0)?;
        engine.set_epsilon(0.3);
        assert_eq!(engine.epsilon(), 0.3);
        Ok(())
    }

    #[test]
    fn test_snapshot() -> Result<()> {
        let mut engine = Engine::build(&config(), 0)?;
        for _ in 0..3 {
            engine.run_one_step();
        }
        let snapshot = engine.snapshot();
        assert_eq!(&snapshot.q, engine.q_table());
        assert_eq!(&snapshot.e, engine.eligibility_table());
        assert_eq!(snapshot.actor, engine.actor_cell());
        assert_eq!(snapshot.episode, engine.episode());
        assert_eq!(snapshot.total_steps, 3);

        let cell = Cell::new(0, 0);
        assert_eq!(engine.value_row(cell), snapshot.q.row(cell).values());
        assert_eq!(engine.eligibility_row(cell), snapshot.e.row(cell).values());
        assert_eq!(engine.max_eligibility(cell), snapshot.e.row(cell).max().0);
        Ok(())
    }
}
