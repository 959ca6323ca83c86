use super::Action;
use crate::record::RecordValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell `(x, y)` of the grid.
///
/// Coordinates are signed so that a move off the grid can be represented and then
/// rejected by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct Cell {
    /// Horizontal coordinate.
    pub x: i32,

    /// Vertical coordinate.
    pub y: i32,
}

impl Cell {
    /// Constructs a cell.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell reached by applying the displacement of `act`, possibly off the grid.
    pub fn offset(self, act: Action) -> Self {
        let (dx, dy) = act.displacement();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Cell> for RecordValue {
    fn from(cell: Cell) -> Self {
        RecordValue::Array1(vec![cell.x as f32, cell.y as f32])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        let c = Cell::new(0, 0);
        assert_eq!(c.offset(Action::Up), Cell::new(0, 1));
        assert_eq!(c.offset(Action::Down), Cell::new(0, -1));
        assert_eq!(c.offset(Action::Right), Cell::new(1, 0));
        assert_eq!(c.offset(Action::Left), Cell::new(-1, 0));
    }
}
