//! Minimal Game of Life predecessors
//!
//! This library finds a predecessor of a Game of Life board with as few live
//! cells as an external SAT-backed oracle can certify, then checks the answer
//! by direct simulation.

pub mod config;
pub mod game_of_life;
pub mod oracle;
pub mod reverse;
pub mod utils;

pub use config::Settings;
pub use oracle::{Oracle, UnifiedOracle};
pub use reverse::{ReverseProblem, Solution};

use anyhow::{Context, Result};

/// Main entry point: load the configured target, resolve and minimize it
pub fn solve_minimal_predecessor(settings: Settings) -> Result<Solution> {
    let mut oracle = UnifiedOracle::new(&settings.oracle);
    let problem = ReverseProblem::new(settings)?;
    let solution = problem
        .solve(&mut oracle)
        .context("Failed to find a minimal predecessor")?;
    Ok(solution)
}
