// grid.rs - Rectangular cell matrix with copy-on-write editing ops

use std::sync::Arc;

use rand::Rng;

use crate::config::{MIN_DIMENSION, RANDOM_DENSITY};

/// Rectangular matrix of binary cells addressed by `(row, col)`.
///
/// Cells live in a flat buffer indexed `row * cols + col`. The buffer is
/// shared (`Arc`), so every operation that leaves the grid untouched hands
/// back the same storage instead of reallocating; [`Grid::shares_cells`]
/// makes that visible to callers that want to skip a redraw or a state swap.
/// Operations that do change cells allocate a fresh buffer and never write
/// through the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Arc<[bool]>,
}

impl Grid {
    /// All-dead grid. Dimensions are floored at 1; the minimum playable size
    /// is enforced by [`Grid::resized`], not here.
    pub fn empty(rows: usize, cols: usize) -> Grid {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Grid {
            rows,
            cols,
            cells: vec![false; rows * cols].into(),
        }
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Grid {
        debug_assert_eq!(cells.len(), rows * cols);
        Grid {
            rows,
            cols,
            cells: cells.into(),
        }
    }

    /// Grid with each cell alive with probability [`RANDOM_DENSITY`].
    pub fn random(rows: usize, cols: usize) -> Grid {
        Self::random_with(rows, cols, &mut rand::thread_rng())
    }

    pub fn random_with<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Grid {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let cells = (0..rows * cols)
            .map(|_| rng.gen_bool(RANDOM_DENSITY))
            .collect();
        Grid::from_cells(rows, cols, cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Raw cell read. Panics out of bounds; callers bounds-check first (the
    /// editing ops below are the checked wrappers).
    pub fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// True when both grids are backed by the same buffer, i.e. one is an
    /// untouched handle of the other.
    pub fn shares_cells(&self, other: &Grid) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    /// Flip one cell. Out of bounds is a no-op returning a shared handle.
    pub fn toggle_cell(&self, row: usize, col: usize) -> Grid {
        if !self.in_bounds(row, col) {
            return self.clone();
        }
        let idx = self.index(row, col);
        let mut cells = self.cells.to_vec();
        cells[idx] = !cells[idx];
        Grid::from_cells(self.rows, self.cols, cells)
    }

    /// Write one cell. Out of bounds is a no-op; writing the value already
    /// present returns a shared handle without allocating, so drag-painting
    /// over already-painted cells costs nothing.
    pub fn set_cell(&self, row: usize, col: usize, alive: bool) -> Grid {
        if !self.in_bounds(row, col) {
            return self.clone();
        }
        let idx = self.index(row, col);
        if self.cells[idx] == alive {
            return self.clone();
        }
        let mut cells = self.cells.to_vec();
        cells[idx] = alive;
        Grid::from_cells(self.rows, self.cols, cells)
    }

    /// Adapt the grid to new dimensions, clamped up to [`MIN_DIMENSION`].
    /// Identical dimensions return a shared handle. Otherwise the overlapping
    /// top-left rectangle is carried over; growing never loses cells,
    /// shrinking drops everything outside the new bounds.
    pub fn resized(&self, new_rows: usize, new_cols: usize) -> Grid {
        let new_rows = new_rows.max(MIN_DIMENSION);
        let new_cols = new_cols.max(MIN_DIMENSION);
        if new_rows == self.rows && new_cols == self.cols {
            return self.clone();
        }
        let mut cells = vec![false; new_rows * new_cols];
        let copy_rows = self.rows.min(new_rows);
        let copy_cols = self.cols.min(new_cols);
        for row in 0..copy_rows {
            let src = row * self.cols;
            let dst = row * new_cols;
            cells[dst..dst + copy_cols].copy_from_slice(&self.cells[src..src + copy_cols]);
        }
        Grid::from_cells(new_rows, new_cols, cells)
    }

    pub(crate) fn cells(&self) -> &[bool] {
        &self.cells
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}
