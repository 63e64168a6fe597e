// game.rs - Driver-facing simulation state: grid slot, generation counter, run flag

use crate::config::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::engine::{self, StepOutcome};
use crate::grid::Grid;
use crate::patterns;

/// The single owner of the evolving grid, plus the generation counter and the
/// Running/Stopped flag of the auto-play state machine.
///
/// Every mutating operation is a complete read-then-replace of the grid slot:
/// the engine and the editing ops hand back a new (or storage-sharing) grid
/// and never retain their own copy across calls. State-replacing operations
/// (clear, randomize, pattern load, a real resize) stop the run first so a
/// step and a replacement can never apply to the same tick.
pub struct GameOfLife {
    grid: Grid,
    generation: u32,
    running: bool,
}

impl GameOfLife {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: Grid::empty(rows, cols),
            generation: 0,
            running: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one generation. Valid in either run state (manual stepping
    /// happens while stopped). A changed step bumps the generation by exactly
    /// one; a stable or empty step leaves it alone and forces Running to
    /// Stopped.
    pub fn step(&mut self) -> StepOutcome {
        let (next, outcome) = engine::step(&self.grid);
        self.grid = next;
        match outcome {
            StepOutcome::Changed => self.generation += 1,
            StepOutcome::Stable | StepOutcome::Empty => {
                if self.running {
                    log::debug!("auto-play halted after generation {}: {outcome:?}", self.generation);
                }
                self.running = false;
            }
        }
        outcome
    }

    pub fn clear(&mut self) {
        self.stop();
        self.grid = Grid::empty(self.grid.rows(), self.grid.cols());
        self.generation = 0;
    }

    pub fn randomize(&mut self) {
        self.stop();
        self.grid = Grid::random(self.grid.rows(), self.grid.cols());
        self.generation = 0;
    }

    /// Replace the grid with a named pattern. Unknown names leave everything
    /// untouched (grid, generation, run state) and report `false`.
    pub fn load_pattern(&mut self, name: &str) -> bool {
        let Some(grid) = patterns::place(name, self.grid.rows(), self.grid.cols()) else {
            log::warn!("unknown pattern {name:?}");
            return false;
        };
        self.stop();
        self.grid = grid;
        self.generation = 0;
        true
    }

    /// Adapt the grid to new dimensions. Requesting the current (post-clamp)
    /// dimensions is a pure no-op that does not disturb a running simulation;
    /// an actual resize stops the run first and keeps the generation counter.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let next = self.grid.resized(rows, cols);
        if next.shares_cells(&self.grid) {
            return;
        }
        self.stop();
        log::debug!("grid resized to {}x{}", next.rows(), next.cols());
        self.grid = next;
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        self.grid = self.grid.toggle_cell(row, col);
    }

    /// Paint one cell to a fixed state. Returns whether the grid actually
    /// changed, so drag-painting drivers can skip redundant redraws.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> bool {
        let next = self.grid.set_cell(row, col, alive);
        let changed = !next.shares_cells(&self.grid);
        self.grid = next;
        changed
    }
}

impl Default for GameOfLife {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}
