//! Actions of the grid world.
use crate::error::SarsaError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// A move to one of the four neighbouring cells.
///
/// The declaration order is the scan order of every per-action query, so it decides
/// tie-breaks: `Up` wins over `Down`, which wins over `Right`, which wins over `Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Action {
    /// `y + 1`.
    Up,

    /// `y - 1`.
    Down,

    /// `x + 1`.
    Right,

    /// `x - 1`.
    Left,
}

impl Action {
    /// The number of actions.
    pub const COUNT: usize = 4;

    /// All actions in scan order.
    pub const ALL: [Action; Action::COUNT] = [Action::Up, Action::Down, Action::Right, Action::Left];

    /// Position of the action in [`Action::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The action undoing this one.
    pub fn opposite(self) -> Self {
        match self {
            Action::Up => Action::Down,
            Action::Down => Action::Up,
            Action::Right => Action::Left,
            Action::Left => Action::Right,
        }
    }

    /// Unit displacement `(dx, dy)`.
    pub fn displacement(self) -> (i32, i32) {
        match self {
            Action::Up => (0, 1),
            Action::Down => (0, -1),
            Action::Right => (1, 0),
            Action::Left => (-1, 0),
        }
    }

    /// Draws an action uniformly at random.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::COUNT)]
    }
}

impl TryFrom<usize> for Action {
    type Error = SarsaError;

    fn try_from(ix: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(ix)
            .copied()
            .ok_or(SarsaError::InvalidActionIndex(ix))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Up => "Up",
            Action::Down => "Down",
            Action::Right => "Right",
            Action::Left => "Left",
        };
        f.write_str(s)
    }
}
