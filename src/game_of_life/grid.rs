//! Dense Game of Life board

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-size Game of Life board with dead (non-wrapping) edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
}

impl Grid {
    /// Create a new all-dead grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a board from rows of cells; every row must have the same non-zero length
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if width == 0 {
            anyhow::bail!("Board needs at least one row and one column");
        }

        if let Some((row, bad)) = cells.iter().enumerate().find(|(_, r)| r.len() != width) {
            anyhow::bail!(
                "Row {} has {} cells but the first row has {}",
                row,
                bad.len(),
                width
            );
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Rows of the board
    pub fn rows(&self) -> usize {
        self.height
    }

    /// Columns of the board
    pub fn columns(&self) -> usize {
        self.width
    }

    /// True when the board has no cells at all (zero rows or zero columns)
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn same_shape(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// State of a cell; anything off the board is dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[self.index(row, col)]
    }

    /// Change one cell, failing for coordinates off the board
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        if row >= self.height || col >= self.width {
            anyhow::bail!(
                "Coordinates ({}, {}) out of bounds for {}x{} grid",
                row,
                col,
                self.height,
                self.width
            );
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Count living cells among the 8 Moore neighbors; cells past the edge count as dead
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let rows = row.saturating_sub(1)..=(row + 1).min(self.height.saturating_sub(1));
        let cols = col.saturating_sub(1)..=(col + 1).min(self.width.saturating_sub(1));

        rows.flat_map(|r| cols.clone().map(move |c| (r, c)))
            .filter(|&(r, c)| (r, c) != (row, col) && self.get(r, c))
            .count() as u8
    }

    /// Coordinates `(row, col)` of every live cell in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.width, idx % self.width))
            .collect()
    }

    /// Live-cell count, recomputed on every call
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// True when no cell is alive
    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = if self.get(row, col) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
