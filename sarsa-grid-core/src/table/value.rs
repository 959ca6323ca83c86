use super::{base::Table, ActionRow};
use crate::{Action, Cell};
use rand::Rng;

/// Action-value estimates `Q(cell, action)` for every cell of a grid.
///
/// Every cell has a row, obstacle cells included.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionValueTable(Table);

impl ActionValueTable {
    /// A table with every entry equal to `value`.
    pub fn new(width: i32, height: i32, value: f32) -> Self {
        Self(Table::from_fn(width, height, |_| ActionRow::splat(value)))
    }

    /// A table with entries drawn independently and uniformly from `[low, high]`.
    ///
    /// Entries are drawn cell by cell, column by column, and in the order of
    /// [`Action::ALL`] within a cell.
    pub fn random<R: Rng + ?Sized>(width: i32, height: i32, low: f32, high: f32, rng: &mut R) -> Self {
        Self(Table::from_fn(width, height, |_| {
            let mut row = ActionRow::default();
            for a in Action::ALL.iter() {
                row.set(*a, rng.gen_range(low..=high));
            }
            row
        }))
    }

    /// Width of the grid.
    pub fn width(&self) -> i32 {
        self.0.width()
    }

    /// Height of the grid.
    pub fn height(&self) -> i32 {
        self.0.height()
    }

    /// `Q(cell, act)`.
    pub fn get(&self, cell: Cell, act: Action) -> f32 {
        self.0.row(cell).get(act)
    }

    /// Sets `Q(cell, act)`.
    pub fn set(&mut self, cell: Cell, act: Action, value: f32) {
        self.0.row_mut(cell).set(act, value)
    }

    /// All values of `cell`.
    pub fn row(&self, cell: Cell) -> &ActionRow {
        self.0.row(cell)
    }

    /// The best action of `cell` and its value. Ties go to the earliest action.
    pub fn best_action(&self, cell: Cell) -> (f32, Action) {
        self.row(cell).max()
    }

    /// The worst action of `cell` and its value. Ties go to the earliest action.
    pub fn worst_action(&self, cell: Cell) -> (f32, Action) {
        self.row(cell).min()
    }

    /// Rows of all cells, column by column.
    pub fn rows(&self) -> &[ActionRow] {
        self.0.rows()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [ActionRow] {
        self.0.rows_mut()
    }
}
