//! SARSA(λ) agent with accumulating, reverse-cancelled eligibility traces.
use super::SarsaConfig;
use crate::{
    table::sweep, Action, ActionValueTable, Cell, EligibilityTable, EpsilonGreedy, GridEnv, Policy,
    Step,
};
use anyhow::Result;
use rand::Rng;

/// Tabular SARSA(λ) agent on a [`GridEnv`].
///
/// The agent owns the action-value table `Q`, the eligibility table `E` and the
/// explorer. It does not own the episode: the caller feeds it transitions through
/// [`SarsaAgent::update`] and tells it when an episode starts and ends.
#[derive(Debug, Clone)]
pub struct SarsaAgent {
    q: ActionValueTable,
    e: EligibilityTable,
    explorer: EpsilonGreedy,
    learn_rate: f32,
    discount_factor: f32,
    eligibility_factor: f32,
}

impl SarsaAgent {
    /// Constructs an agent for a `width` x `height` grid.
    ///
    /// Initial action values are drawn from `rng`.
    pub fn build<R: Rng + ?Sized>(config: &SarsaConfig, width: i32, height: i32, rng: &mut R) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            q: ActionValueTable::random(width, height, config.q_init_low, config.q_init_high, rng),
            e: EligibilityTable::new(width, height),
            explorer: EpsilonGreedy::build(&config.explorer),
            learn_rate: config.learn_rate,
            discount_factor: config.discount_factor,
            eligibility_factor: config.eligibility_factor,
        })
    }

    /// Replaces the action-value table.
    ///
    /// # Panics
    ///
    /// Panics if the shape of `q` differs from the current table.
    pub fn with_q_table(mut self, q: ActionValueTable) -> Self {
        assert_eq!(
            (q.width(), q.height()),
            (self.q.width(), self.q.height()),
            "action-value table of a different shape"
        );
        self.q = q;
        self
    }

    /// The action-value table.
    pub fn q_table(&self) -> &ActionValueTable {
        &self.q
    }

    /// The eligibility table.
    pub fn eligibility_table(&self) -> &EligibilityTable {
        &self.e
    }

    /// Current epsilon.
    pub fn epsilon(&self) -> f32 {
        self.explorer.epsilon()
    }

    /// Overrides epsilon.
    pub fn set_epsilon(&mut self, v: f32) {
        self.explorer.set_epsilon(v);
    }

    /// Clears the eligibility traces at the start of an episode.
    pub fn begin_episode(&mut self) {
        self.e.reset_all();
    }

    /// Decays epsilon once an episode is completed.
    pub fn end_episode(&mut self) {
        self.explorer.decay();
    }

    /// Selects the action to take from `next`, the successor of the last transition.
    ///
    /// `next` is `None` if the last transition was blocked, in which case the action is
    /// uniformly random and no value is read.
    pub fn select_action<R: Rng + ?Sized>(&self, next: Option<Cell>, episode: usize, rng: &mut R) -> Action {
        let row = next.map(|cell| self.q.row(cell));
        self.explorer.action(row, episode, rng)
    }

    /// Applies the SARSA(λ) update for the transition `(cell, act) -> step` followed by
    /// `next_act`, and returns the TD error.
    ///
    /// 1. `delta = r + gamma * Q(s', a') - Q(s, a)`, with no successor term if the step
    ///    is terminal.
    /// 2. `E(s, a) += 1`.
    /// 3. If the agent moved and the episode continues, `E(s', opposite(a)) -= 1`, so
    ///    that stepping straight back does not reinforce the pair it came from.
    /// 4. For every cell and action, `Q += alpha * delta * E`, then `E *= lambda * gamma`.
    pub fn update(&mut self, cell: Cell, act: Action, step: &Step<GridEnv>, next_act: Action) -> f32 {
        let next = step.next_obs().copied();
        let successor = match next {
            Some(next) => self.q.get(next, next_act),
            None => 0.0,
        };
        let delta = step.reward + self.discount_factor * successor - self.q.get(cell, act);

        self.e.add(cell, act, 1.0);
        if let Some(next) = next {
            self.e.add(next, act.opposite(), -1.0);
        }

        sweep(
            &mut self.q,
            &mut self.e,
            self.learn_rate * delta,
            self.eligibility_factor * self.discount_factor,
        );

        delta
    }
}

impl Policy<GridEnv> for SarsaAgent {
    /// The greedy action of the current action values, with no exploration.
    fn sample(&mut self, obs: &Cell) -> Action {
        self.q.best_action(*obs).1
    }
}
