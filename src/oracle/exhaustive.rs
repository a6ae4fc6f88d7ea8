//! Brute-force oracle for tiny boards

use super::{Bound, Oracle, OracleError, OracleResult};
use crate::game_of_life::Grid;
use crate::reverse::is_predecessor;
use rayon::prelude::*;

/// Which of the admissible predecessors the exhaustive oracle reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Lowest candidate in enumeration order
    First,
    /// Candidate with the most live cells (ties go to the lowest)
    Densest,
}

/// Enumerates every candidate board of the target's size; only usable for a handful of cells
#[derive(Debug, Clone)]
pub struct ExhaustiveOracle {
    max_cells: usize,
    selection: Selection,
    calls: usize,
}

impl ExhaustiveOracle {
    pub fn new(max_cells: usize) -> Self {
        Self {
            max_cells,
            selection: Selection::First,
            calls: 0,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Number of queries answered so far
    pub fn calls(&self) -> usize {
        self.calls
    }
}

fn grid_from_mask(width: usize, height: usize, mask: u32) -> Grid {
    let mut grid = Grid::new(width, height);
    for (idx, cell) in grid.cells.iter_mut().enumerate() {
        *cell = mask & (1 << idx) != 0;
    }
    grid
}

impl Oracle for ExhaustiveOracle {
    fn invoke(&mut self, target: &Grid, bound: Bound) -> Result<OracleResult, OracleError> {
        if target.is_degenerate() {
            return Err(OracleError::EmptyBoard {
                rows: target.rows(),
                columns: target.columns(),
            });
        }

        let cells = target.cells.len();
        if cells > self.max_cells || cells >= u32::BITS as usize {
            return Err(OracleError::TooLarge {
                cells,
                limit: self.max_cells,
            });
        }
        self.calls += 1;

        let (width, height) = (target.width, target.height);
        let admissible = |mask: &u32| {
            bound.admits(mask.count_ones() as usize)
                && is_predecessor(&grid_from_mask(width, height, *mask), target)
        };

        let candidates = 0..(1u32 << cells);
        let found = match self.selection {
            Selection::First => candidates.into_par_iter().find_first(admissible),
            Selection::Densest => candidates
                .into_par_iter()
                .filter(admissible)
                .max_by_key(|mask| (mask.count_ones(), std::cmp::Reverse(*mask))),
        };

        Ok(match found {
            Some(mask) => OracleResult::Satisfiable(grid_from_mask(width, height, mask)),
            None => OracleResult::Unsatisfiable,
        })
    }
}
