//! File I/O operations for Game of Life grids
//!
//! Board files hold the dimensions on the first line (`rows columns`) followed by
//! `rows × columns` whitespace-separated `0`/`1` values.

use super::Grid;
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::Path;

/// Load a grid from a board file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from its `rows columns` + cell values representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let mut tokens = content.split_whitespace();

    let mut dimension = |name: &str| -> Result<usize> {
        let token = tokens
            .next()
            .with_context(|| format!("Missing {} in grid header", name))?;
        token
            .parse::<usize>()
            .with_context(|| format!("Invalid {} '{}' in grid header", name, token))
    };
    let rows = dimension("row count")?;
    let columns = dimension("column count")?;

    if rows == 0 || columns == 0 {
        anyhow::bail!("Grid dimensions must be positive, got {}x{}", rows, columns);
    }

    let mut grid = Grid::new(columns, rows);
    for row in 0..rows {
        for col in 0..columns {
            let token = tokens.next().with_context(|| {
                format!(
                    "Grid ended early: expected {} values, found {}",
                    rows * columns,
                    row * columns + col
                )
            })?;
            let alive = match token {
                "0" => false,
                "1" => true,
                _ => anyhow::bail!(
                    "Invalid value '{}' at position ({}, {}). Only 0 and 1 are allowed",
                    token,
                    row,
                    col
                ),
            };
            grid.set(row, col, alive)?;
        }
    }

    if let Some(extra) = tokens.next() {
        anyhow::bail!("Unexpected trailing value '{}' after {} cells", extra, rows * columns);
    }

    Ok(grid)
}

/// Save a grid to a board file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to the board file representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = format!("{} {}\n", grid.height, grid.width);
    for row in 0..grid.height {
        let line = (0..grid.width)
            .map(|col| if grid.get(row, col) { '1' } else { '0' })
            .join(" ");
        result.push_str(&line);
        result.push('\n');
    }
    result
}

/// Render the oracle's input: a grid of `*` wildcards for the unknown
/// predecessor, a blank line, then the target generation as comma-separated 0/1.
pub fn oracle_input_to_string(target: &Grid) -> String {
    let mut result = String::with_capacity(target.height * target.width * 4 + 1);

    for _ in 0..target.height {
        result.push_str(&std::iter::repeat("*").take(target.width).join(","));
        result.push('\n');
    }

    result.push('\n');

    for row in 0..target.height {
        let line = (0..target.width)
            .map(|col| if target.get(row, col) { "1" } else { "0" })
            .join(",");
        result.push_str(&line);
        result.push('\n');
    }

    result
}

/// Write the oracle's input file for `target`
pub fn write_oracle_input<P: AsRef<Path>>(target: &Grid, path: P) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, oracle_input_to_string(target))
}

/// Create example target boards
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("blinker.txt", "3 3\n0 0 0\n1 1 1\n0 0 0\n"),
        ("block.txt", "4 4\n0 0 0 0\n0 1 1 0\n0 1 1 0\n0 0 0 0\n"),
        ("glider.txt", "5 5\n0 0 1 0 0\n1 0 1 0 0\n0 1 1 0 0\n0 0 0 0 0\n0 0 0 0 0\n"),
        ("empty.txt", "2 2\n0 0\n0 0\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
