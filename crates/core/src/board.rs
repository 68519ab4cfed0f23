//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid where each cell is empty or holds the color
//! of the piece that locked there. Uses a flat row-major vector for cache
//! locality; the dimensions are fixed at construction.
//!
//! Coordinates: `row` ranges 0..rows (top to bottom), `col` ranges 0..cols
//! (left to right). Bounds are the caller's responsibility; the collision
//! checker guards every engine access, so an out-of-range index panics.

use crate::types::{Cell, Color, BOARD_COLS, BOARD_ROWS};

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat vector of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} board",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Set cell at (row, col)
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Fill cell at (row, col) with a color
    pub fn fill(&mut self, row: usize, col: usize, color: Color) {
        self.set(row, col, Some(color));
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Borrow a single row
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = self.index(row, 0);
        &self.cells[start..start + self.cols]
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // `max(1)` keeps a zero-width board from tripping `chunks_exact`.
        self.cells.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Remove a row and insert an empty one at the top
    ///
    /// Rows above `row` shift down by one; rows below are untouched.
    pub fn clear_row(&mut self, row: usize) {
        let cols = self.cols;
        let end = self.index(row, 0) + cols;

        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..end - cols, cols);
        self.cells[..cols].fill(None);
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from text rows, `.` empty and any other char filled
    ///
    /// Handy for tests and benches.
    pub fn from_ascii(rows: &[&str], color: Color) -> Self {
        let cols = rows.first().map_or(0, |r| r.chars().count());
        let mut board = Self::new(rows.len(), cols);
        for (r, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), cols, "ragged row {r}");
            for (c, ch) in line.chars().enumerate() {
                if ch != '.' {
                    board.fill(r, c, color);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLS)
    }
}
