//! Minimal-predecessor problem: resolve, minimize and verify one target board

use super::{minimize, resolve, PredecessorVerifier, SearchError, Solution};
use crate::config::Settings;
use crate::game_of_life::{load_grid_from_file, Grid};
use crate::oracle::Oracle;
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{info, warn};

/// A target board together with the settings for searching its predecessors
pub struct ReverseProblem {
    settings: Settings,
    target_grid: Grid,
    verifier: PredecessorVerifier,
}

impl ReverseProblem {
    /// Create a new problem, loading the target board named in the settings
    pub fn new(settings: Settings) -> Result<Self> {
        let target_grid = load_grid_from_file(&settings.input.target_board_file)
            .context("Failed to load target board file")?;

        Ok(Self::with_target_grid(settings, target_grid))
    }

    /// Create a problem with an explicit target grid
    pub fn with_target_grid(settings: Settings, target_grid: Grid) -> Self {
        Self {
            settings,
            target_grid,
            verifier: PredecessorVerifier::new(),
        }
    }

    /// Find a predecessor, minimize its live cells and check both boards
    pub fn solve<O: Oracle + ?Sized>(&self, oracle: &mut O) -> Result<Solution, SearchError> {
        let start_time = Instant::now();
        info!(
            rows = self.target_grid.rows(),
            columns = self.target_grid.columns(),
            living = self.target_grid.living_count(),
            "searching for a predecessor"
        );

        let predecessor = resolve(oracle, &self.target_grid)?;
        info!(living = predecessor.living_count(), "predecessor found");
        let predecessor_verified = self.check("predecessor", &predecessor);

        let minimized = minimize(oracle, &self.target_grid, predecessor.clone())?;
        let minimized_verified = self.check("minimized predecessor", &minimized.grid);

        Ok(Solution::new(
            self.target_grid.clone(),
            predecessor,
            minimized.grid,
            (predecessor_verified, minimized_verified),
            minimized.probes,
            start_time.elapsed(),
        ))
    }

    fn check(&self, label: &str, candidate: &Grid) -> Option<bool> {
        if !self.settings.search.verify {
            return None;
        }

        let result = self.verifier.verify(candidate, &self.target_grid);
        if !result.is_valid {
            warn!(
                board = label,
                mismatches = result.mismatches.len(),
                "oracle answer failed verification: {}",
                result.error_message.as_deref().unwrap_or("unknown mismatch")
            );
        }
        Some(result.is_valid)
    }

    /// Get the target grid
    pub fn target_grid(&self) -> &Grid {
        &self.target_grid
    }

    /// Get the problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
