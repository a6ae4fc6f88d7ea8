//! Result of a resolve + minimize run

use super::minimizer::Probe;
use crate::game_of_life::Grid;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the presentation layer needs about one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The board whose predecessor was searched for
    pub target: Grid,
    /// First predecessor reported by the unbounded oracle query
    pub predecessor: Grid,
    pub predecessor_living_cells: usize,
    /// Predecessor with the fewest live cells the oracle could certify
    pub minimized: Grid,
    pub minimized_living_cells: usize,
    /// Simulation check of `predecessor`, `None` when verification was disabled
    pub predecessor_verified: Option<bool>,
    /// Simulation check of `minimized`, `None` when verification was disabled
    pub minimized_verified: Option<bool>,
    /// Bounded queries made by the minimizer
    pub probes: Vec<Probe>,
    /// Time taken for the whole run
    #[serde(skip)]
    pub solve_time: Duration,
}

impl Solution {
    pub fn new(
        target: Grid,
        predecessor: Grid,
        minimized: Grid,
        verification: (Option<bool>, Option<bool>),
        probes: Vec<Probe>,
        solve_time: Duration,
    ) -> Self {
        Self {
            predecessor_living_cells: predecessor.living_count(),
            minimized_living_cells: minimized.living_count(),
            target,
            predecessor,
            minimized,
            predecessor_verified: verification.0,
            minimized_verified: verification.1,
            probes,
            solve_time,
        }
    }

    /// Oracle calls made, counting the unbounded one
    pub fn oracle_calls(&self) -> usize {
        self.probes.len() + 1
    }

    /// Live cells removed by minimization
    pub fn cells_saved(&self) -> usize {
        self.predecessor_living_cells
            .saturating_sub(self.minimized_living_cells)
    }

    /// False if either check ran and failed
    pub fn passed_verification(&self) -> bool {
        self.predecessor_verified != Some(false) && self.minimized_verified != Some(false)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}
