// engine.rs - One-generation evolution with the active-region optimization

use crate::grid::Grid;

/// Relative deltas of the 8-connected (Moore) neighborhood.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
];

/// What a step did to the grid. `Stable` and `Empty` tell the driver to stop
/// auto-play; neither is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// At least one cell changed; the caller increments its generation.
    Changed,
    /// Fixed point of the rule, further stepping is wasted work.
    Stable,
    /// No live cell left to evolve.
    Empty,
}

impl StepOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, StepOutcome::Changed)
    }
}

/// Apply the evolution rule for one generation.
///
/// Only cells inside the live-cell bounding rectangle expanded by one (the
/// active region) can change, so the rule runs over that region alone; the
/// rest of the new grid is a verbatim carry-over. Neighbor counts always read
/// the previous generation's buffer, never partially-updated cells. Edges are
/// hard boundaries, neighbors outside the grid do not count.
///
/// When nothing changes the input grid comes back as a shared handle (see
/// [`Grid::shares_cells`]) rather than the work copy.
pub fn step(grid: &Grid) -> (Grid, StepOutcome) {
    let Some((min_row, max_row, min_col, max_col)) = live_bounds(grid) else {
        return (grid.clone(), StepOutcome::Empty);
    };

    let rows = grid.rows();
    let cols = grid.cols();
    let min_row = min_row.saturating_sub(1);
    let min_col = min_col.saturating_sub(1);
    let max_row = (max_row + 1).min(rows - 1);
    let max_col = (max_col + 1).min(cols - 1);

    let old = grid.cells();
    let mut next = old.to_vec();
    let mut changed = false;

    for row in min_row..=max_row {
        for col in min_col..=max_col {
            let mut neighbors = 0;
            for &(dr, dc) in &NEIGHBOR_OFFSETS {
                let nr = row as isize + dr;
                let nc = col as isize + dc;
                if nr >= 0
                    && nc >= 0
                    && (nr as usize) < rows
                    && (nc as usize) < cols
                    && old[nr as usize * cols + nc as usize]
                {
                    neighbors += 1;
                }
            }

            let idx = row * cols + col;
            let alive = old[idx];
            let next_state = if !(2..=3).contains(&neighbors) {
                false
            } else if !alive && neighbors == 3 {
                true
            } else {
                alive
            };

            // compare values, not rule branches: several branches are no-ops
            if next[idx] != next_state {
                next[idx] = next_state;
                changed = true;
            }
        }
    }

    if !changed {
        return (grid.clone(), StepOutcome::Stable);
    }
    (Grid::from_cells(rows, cols, next), StepOutcome::Changed)
}

/// Minimal bounding rectangle of the live cells as
/// `(min_row, max_row, min_col, max_col)`, or `None` for an all-dead grid.
/// One full scan per generation; this stays the dominant cost on large
/// sparse grids.
fn live_bounds(grid: &Grid) -> Option<(usize, usize, usize, usize)> {
    let cols = grid.cols();
    let mut found = false;
    let (mut min_row, mut max_row, mut min_col, mut max_col) = (0, 0, 0, 0);

    for (row, cells) in grid.cells().chunks_exact(cols).enumerate() {
        let Some(first) = cells.iter().position(|&cell| cell) else {
            continue;
        };
        let last = cells.iter().rposition(|&cell| cell).unwrap_or(first);
        if !found {
            found = true;
            min_row = row;
            min_col = first;
            max_col = last;
        } else {
            min_col = min_col.min(first);
            max_col = max_col.max(last);
        }
        max_row = row;
    }

    found.then_some((min_row, max_row, min_col, max_col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;

    fn grid_of(rows: usize, cols: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::empty(rows, cols);
        for &(row, col) in live {
            grid = grid.set_cell(row, col, true);
        }
        grid
    }

    fn stepped(grid: &Grid, generations: usize) -> Grid {
        let mut current = grid.clone();
        for _ in 0..generations {
            let (next, outcome) = step(&current);
            assert_eq!(outcome, StepOutcome::Changed);
            current = next;
        }
        current
    }

    #[test]
    fn live_bounds_finds_the_minimal_rectangle() {
        let grid = grid_of(10, 10, &[(2, 3), (5, 7), (4, 1)]);
        assert_eq!(live_bounds(&grid), Some((2, 5, 1, 7)));
    }

    #[test]
    fn live_bounds_of_an_all_dead_grid_is_none() {
        assert_eq!(live_bounds(&Grid::empty(4, 4)), None);
    }

    #[test]
    fn step_on_an_all_dead_grid_signals_empty() {
        let grid = Grid::empty(10, 10);
        let (next, outcome) = step(&grid);
        assert_eq!(outcome, StepOutcome::Empty);
        assert_eq!(next, grid);
        // the input comes back, not a copy
        assert!(next.shares_cells(&grid));
    }

    #[test]
    fn block_is_a_fixed_point() {
        let grid = grid_of(6, 6, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let (next, outcome) = step(&grid);
        assert_eq!(outcome, StepOutcome::Stable);
        assert!(next.shares_cells(&grid));
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let blinker = grid_of(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let (vertical, outcome) = step(&blinker);
        assert_eq!(outcome, StepOutcome::Changed);
        assert_eq!(
            vertical,
            grid_of(5, 5, &[(1, 2), (2, 2), (3, 2)]),
            "blinker should flip to vertical"
        );
        assert_eq!(stepped(&blinker, 2), blinker);
    }

    #[test]
    fn toad_returns_after_two_steps() {
        let toad = patterns::place("Toad", 20, 20).unwrap();
        assert_eq!(stepped(&toad, 2), toad);
    }

    #[test]
    fn beacon_returns_after_two_steps() {
        let beacon = patterns::place("Beacon", 20, 20).unwrap();
        assert_eq!(stepped(&beacon, 2), beacon);
    }

    #[test]
    fn pulsar_returns_after_three_steps() {
        let pulsar = patterns::place("Pulsar", 25, 25).unwrap();
        assert_eq!(stepped(&pulsar, 3), pulsar);
    }

    #[test]
    fn glider_translates_one_cell_diagonally_every_four_steps() {
        let glider = grid_of(10, 10, &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
        let translated = grid_of(10, 10, &[(2, 3), (3, 4), (4, 2), (4, 3), (4, 4)]);
        assert_eq!(stepped(&glider, 4), translated);
    }

    #[test]
    fn grid_edges_are_hard_boundaries() {
        // horizontal blinker pressed against the top edge: the upper arm of
        // the oscillation has nowhere to be born
        let grid = grid_of(5, 5, &[(0, 0), (0, 1), (0, 2)]);
        let (next, outcome) = step(&grid);
        assert_eq!(outcome, StepOutcome::Changed);
        assert_eq!(next, grid_of(5, 5, &[(0, 1), (1, 1)]));
    }

    #[test]
    fn distant_structures_evolve_as_one_synchronous_transition() {
        // one bounding box covers both structures; the block must survive
        // the same step that flips the blinker
        let grid = grid_of(
            30,
            30,
            &[(2, 2), (2, 3), (2, 4), (20, 20), (20, 21), (21, 20), (21, 21)],
        );
        let (next, outcome) = step(&grid);
        assert_eq!(outcome, StepOutcome::Changed);
        for (row, col) in [(20, 20), (20, 21), (21, 20), (21, 21)] {
            assert!(next.cell(row, col));
        }
        assert!(next.cell(1, 3) && next.cell(2, 3) && next.cell(3, 3));
        assert_eq!(next.live_cells(), 7);
    }
}
