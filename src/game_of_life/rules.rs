//! Game of Life rules implementation

use super::Grid;
use rayon::prelude::*;

/// Standard B3/S23 rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Apply Game of Life rules to evolve the grid one generation forward
    pub fn evolve(current: &Grid) -> Grid {
        let width = current.width;
        let cells: Vec<bool> = (0..current.cells.len())
            .into_par_iter()
            .map(|idx| {
                let (row, col) = (idx / width, idx % width);
                Self::should_be_alive(current.cells[idx], current.count_neighbors(row, col))
            })
            .collect();

        Grid {
            width: current.width,
            height: current.height,
            cells,
        }
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}
