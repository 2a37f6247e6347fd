use crate::tetromino::PieceKind;

pub const ROWS: usize = 18;
pub const COLS: usize = 10;

/// `None` is an empty cell, otherwise the shape that locked there.
pub type Cell = Option<PieceKind>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; COLS]; ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            cells: [[None; COLS]; ROWS],
        }
    }

    pub fn reset(&mut self) {
        self.cells = [[None; COLS]; ROWS];
    }

    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if !Self::in_bounds(row, col) {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    pub fn in_bounds(row: i32, col: i32) -> bool {
        (0..ROWS as i32).contains(&row) && (0..COLS as i32).contains(&col)
    }

    /// Out-of-range coordinates read as occupied, so a fit check can never
    /// index past the array regardless of call order.
    pub fn is_empty(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_some())
    }

    pub fn clear_row(&mut self, row: usize) {
        self.cells[row] = [None; COLS];
    }

    /// Copies `row` into `row + by` and empties the source.
    pub fn shift_row_down(&mut self, row: usize, by: usize) {
        self.cells[row + by] = self.cells[row];
        self.clear_row(row);
    }

    /// Caller guarantees every cell is in bounds and empty.
    pub fn lock_cells(&mut self, cells: &[(i32, i32)], kind: PieceKind) {
        for &(row, col) in cells {
            debug_assert!(self.is_empty(row, col), "locking over ({row}, {col})");
            self.cells[row as usize][col as usize] = Some(kind);
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}
