use super::ActionRow;
use crate::Cell;

/// Dense storage of one [`ActionRow`] per cell, column by column.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Table {
    width: i32,
    height: i32,
    rows: Vec<ActionRow>,
}

impl Table {
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Cell) -> ActionRow) -> Self {
        assert!(
            width > 0 && height > 0,
            "table size must be positive, got {}x{}",
            width,
            height
        );
        let mut rows = Vec::with_capacity((width * height) as usize);
        for x in 0..width {
            for y in 0..height {
                rows.push(f(Cell::new(x, y)));
            }
        }
        Self {
            width,
            height,
            rows,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn row(&self, cell: Cell) -> &ActionRow {
        &self.rows[self.index(cell)]
    }

    pub fn row_mut(&mut self, cell: Cell) -> &mut ActionRow {
        let ix = self.index(cell);
        &mut self.rows[ix]
    }

    pub fn rows(&self) -> &[ActionRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [ActionRow] {
        &mut self.rows
    }

    fn index(&self, cell: Cell) -> usize {
        // Out-of-range coordinates are a programming error.
        assert!(
            0 <= cell.x && cell.x < self.width && 0 <= cell.y && cell.y < self.height,
            "cell {} is outside of the {}x{} table",
            cell,
            self.width,
            self.height
        );
        (cell.x * self.height + cell.y) as usize
    }
}
