//! Grid world environment.
use super::{Action, Cell, GridEnvConfig};
use crate::{error::SarsaError, Env, Step};
use anyhow::Result;
use log::debug;
use rand::Rng;

/// A grid world with a reward map and obstacles.
///
/// The environment is immutable after [`Env::build`]. Entering a cell with non-zero
/// reward ends the episode with that reward. Leaving the grid or walking into an
/// obstacle also ends the episode, with zero reward and no successor state.
#[derive(Debug, Clone)]
pub struct GridEnv {
    width: i32,
    height: i32,
    rewards: Vec<i32>,
    obstacles: Vec<bool>,
}

impl GridEnv {
    /// Width of the grid.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the grid.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns `true` if `cell` is on the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        0 <= cell.x && cell.x < self.width && 0 <= cell.y && cell.y < self.height
    }

    /// Returns `true` if `cell` is on the grid and an obstacle.
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.contains(cell) && self.obstacles[self.index(cell)]
    }

    /// Reward for entering `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not on the grid.
    pub fn reward(&self, cell: Cell) -> i32 {
        self.rewards[self.index(cell)]
    }

    /// Returns `true` if an episode may start in `cell`: neutral and traversable.
    pub fn is_start_cell(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_obstacle(cell) && self.reward(cell) == 0
    }

    /// Iterates over all cells, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Cell::new(x, y)))
    }

    fn index(&self, cell: Cell) -> usize {
        assert!(
            self.contains(cell),
            "cell {} is outside of the {}x{} grid",
            cell,
            self.width,
            self.height
        );
        (cell.x * self.height + cell.y) as usize
    }
}

impl Env for GridEnv {
    type Config = GridEnvConfig;
    type Obs = Cell;
    type Act = Action;

    fn build(config: &Self::Config) -> Result<Self> {
        config.validate()?;

        let n = (config.width * config.height) as usize;
        let mut env = Self {
            width: config.width,
            height: config.height,
            rewards: vec![0; n],
            obstacles: vec![false; n],
        };
        for r in config.rewards.iter() {
            let ix = env.index(r.cell);
            env.rewards[ix] = r.reward;
        }
        for cell in config.obstacles.iter() {
            let ix = env.index(*cell);
            env.obstacles[ix] = true;
        }

        if !env.cells().any(|cell| env.is_start_cell(cell)) {
            return Err(SarsaError::NoStartCell.into());
        }

        debug!(
            "Built {}x{} grid with {} reward cells and {} obstacles",
            env.width,
            env.height,
            env.rewards.iter().filter(|r| **r != 0).count(),
            env.obstacles.iter().filter(|o| **o).count()
        );

        Ok(env)
    }

    fn step(&self, obs: &Cell, act: &Action) -> Step<Self> {
        let next = obs.offset(*act);

        // The bounds check precedes any lookup of `next`.
        if !self.contains(next) || self.is_obstacle(next) {
            return Step::blocked(*act);
        }

        let reward = self.reward(next);
        Step::new(*act, Some(next), reward as f32, reward != 0)
    }

    /// Draws a start cell uniformly, rejecting cells with a reward or an obstacle.
    fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        loop {
            let cell = Cell::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if self.is_start_cell(cell) {
                return cell;
            }
        }
    }
}
