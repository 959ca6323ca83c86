//! Configuration of [`GridEnv`](super::GridEnv).
use super::Cell;
use crate::error::SarsaError;
use serde::{Deserialize, Serialize};

/// A cell carrying a non-default reward.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct RewardCell {
    /// The cell.
    pub cell: Cell,

    /// Reward for entering the cell. Positive is a goal, negative a penalty.
    pub reward: i32,
}

/// Configuration of [`GridEnv`](super::GridEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct GridEnvConfig {
    /// Width of the grid.
    pub width: i32,

    /// Height of the grid.
    pub height: i32,

    /// Cells with non-zero reward. A later entry for the same cell overrides an earlier one.
    #[serde(default)]
    pub rewards: Vec<RewardCell>,

    /// Cells that can not be entered.
    #[serde(default)]
    pub obstacles: Vec<Cell>,
}

impl Default for GridEnvConfig {
    fn default() -> Self {
        Self::new(20, 20)
    }
}

impl GridEnvConfig {
    /// An empty grid of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            rewards: vec![],
            obstacles: vec![],
        }
    }

    /// Adds a reward cell.
    pub fn reward(mut self, cell: Cell, reward: i32) -> Self {
        self.rewards.push(RewardCell { cell, reward });
        self
    }

    /// Adds an obstacle cell.
    pub fn obstacle(mut self, cell: Cell) -> Self {
        self.obstacles.push(cell);
        self
    }

    /// Checks the dimensions, including that `width * height` fits in `i32`, and that
    /// every listed cell is on the grid.
    pub fn validate(&self) -> Result<(), SarsaError> {
        if self.width <= 0 || self.height <= 0 || self.width.checked_mul(self.height).is_none() {
            return Err(SarsaError::InvalidGridSize {
                width: self.width,
                height: self.height,
            });
        }

        let cells = self
            .rewards
            .iter()
            .map(|r| &r.cell)
            .chain(self.obstacles.iter());
        for cell in cells {
            if !self.contains(*cell) {
                return Err(SarsaError::CellOutOfGrid {
                    x: cell.x,
                    y: cell.y,
                    width: self.width,
                    height: self.height,
                });
            }
        }

        Ok(())
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        0 <= cell.x && cell.x < self.width && 0 <= cell.y && cell.y < self.height
    }
}
