//! Search for the smallest live-cell count that still admits a predecessor
//!
//! Two phases drive the oracle:
//! 1. bracketing halves a known-feasible count until a query comes back unsatisfiable;
//! 2. refinement bisects between that infeasible bound and the best feasible count.
//!
//! A satisfiable answer tightens `high` to the live count of the returned board,
//! which is never above the bound that was asked for.

use super::resolver::query;
use super::SearchError;
use crate::game_of_life::Grid;
use crate::oracle::{Bound, Oracle};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Bracketing,
    Refinement,
}

/// One bounded oracle query made during the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    pub phase: Phase,
    pub bound: usize,
    /// Live cells of the returned predecessor, `None` when unsatisfiable
    pub live_cells: Option<usize>,
}

impl Probe {
    pub fn is_satisfiable(&self) -> bool {
        self.live_cells.is_some()
    }
}

/// `low` is a bound the oracle rejected, `high` the live count of `best`
#[derive(Debug, Clone)]
pub struct SearchState {
    pub low: Option<usize>,
    pub high: usize,
    pub best: Grid,
}

impl SearchState {
    pub fn new(seed: Grid) -> Self {
        Self {
            low: None,
            high: seed.living_count(),
            best: seed,
        }
    }

    /// Bound to try next, or `None` once the minimum is isolated
    pub fn next_bound(&self) -> Option<usize> {
        match self.low {
            None if self.high == 0 => None,
            None => Some(self.high / 2),
            Some(low) if self.high - low <= 1 => None,
            Some(low) => Some(low + (self.high - low).div_ceil(2)),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.low.is_none() {
            Phase::Bracketing
        } else {
            Phase::Refinement
        }
    }

    fn accept(&mut self, grid: Grid) -> Result<(), SearchError> {
        let live_cells = grid.living_count();
        if let Some(low) = self.low {
            if live_cells <= low {
                return Err(SearchError::InconsistentOracle {
                    infeasible: low,
                    live_cells,
                });
            }
        }
        self.high = live_cells;
        self.best = grid;
        Ok(())
    }
}

/// Outcome of a minimization run
#[derive(Debug, Clone)]
pub struct Minimized {
    pub grid: Grid,
    pub live_cells: usize,
    /// Every bounded query in the order it was made
    pub probes: Vec<Probe>,
}

/// Find the minimal live-cell predecessor of `target`, starting from a known one.
///
/// `seed` must be a predecessor obtained from the same oracle (typically through
/// [`resolve`](super::resolve)); its live count is the first feasible bound. On
/// success the oracle accepted a query at the returned count and, unless it is 0,
/// rejected a query at one less. A seed with one live cell therefore still
/// costs a query at bound 0; only an all-dead seed makes no queries.
pub fn minimize<O: Oracle + ?Sized>(
    oracle: &mut O,
    target: &Grid,
    seed: Grid,
) -> Result<Minimized, SearchError> {
    if !seed.same_shape(target) {
        return Err(SearchError::ShapeMismatch {
            found_columns: seed.columns(),
            found_rows: seed.rows(),
            expected_columns: target.columns(),
            expected_rows: target.rows(),
        });
    }

    let mut state = SearchState::new(seed);
    let mut probes = Vec::new();
    info!(initial_live_cells = state.high, "minimizing predecessor");

    while let Some(bound) = state.next_bound() {
        let phase = state.phase();
        let answer = query(oracle, target, Bound::AtMost(bound))?;

        probes.push(Probe {
            phase,
            bound,
            live_cells: answer.as_ref().map(Grid::living_count),
        });

        match answer {
            Some(grid) => state.accept(grid)?,
            None => state.low = Some(bound),
        }
        info!(?phase, bound, low = ?state.low, high = state.high, "probe finished");
    }

    info!(
        minimal_live_cells = state.high,
        queries = probes.len(),
        "minimization finished"
    );

    Ok(Minimized {
        live_cells: state.high,
        grid: state.best,
        probes,
    })
}
