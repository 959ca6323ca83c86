use super::{base::Table, ActionRow};
use crate::{Action, Cell};

/// Eligibility traces `E(cell, action)` for every cell of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityTable(Table);

impl EligibilityTable {
    /// A table of zeros.
    pub fn new(width: i32, height: i32) -> Self {
        Self(Table::from_fn(width, height, |_| ActionRow::default()))
    }

    /// Width of the grid.
    pub fn width(&self) -> i32 {
        self.0.width()
    }

    /// Height of the grid.
    pub fn height(&self) -> i32 {
        self.0.height()
    }

    /// `E(cell, act)`.
    pub fn get(&self, cell: Cell, act: Action) -> f32 {
        self.0.row(cell).get(act)
    }

    /// Sets `E(cell, act)`.
    pub fn set(&mut self, cell: Cell, act: Action, value: f32) {
        self.0.row_mut(cell).set(act, value)
    }

    /// Adds `amount` to `E(cell, act)`.
    pub fn add(&mut self, cell: Cell, act: Action, amount: f32) {
        self.0.row_mut(cell)[act] += amount;
    }

    /// All traces of `cell`.
    pub fn row(&self, cell: Cell) -> &ActionRow {
        self.0.row(cell)
    }

    /// Rows of all cells, column by column.
    pub fn rows(&self) -> &[ActionRow] {
        self.0.rows()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [ActionRow] {
        self.0.rows_mut()
    }

    /// Zeroes every entry.
    pub fn reset_all(&mut self) {
        for row in self.0.rows_mut() {
            *row = ActionRow::default();
        }
    }

    /// Multiplies every entry by `factor`.
    pub fn decay_all(&mut self, factor: f32) {
        for row in self.0.rows_mut() {
            for v in row.values_mut().iter_mut() {
                *v *= factor;
            }
        }
    }
}
