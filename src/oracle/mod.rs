//! Predecessor oracles
//!
//! An oracle answers one question: does the target board have a predecessor with at
//! most `bound` live cells, and if so, which one? Everything above this module talks
//! to oracles only through [`Oracle::invoke`].

pub mod error;
pub mod exhaustive;
pub mod factory;
pub mod lls;
pub mod protocol;

pub use error::{OracleError, ProtocolError};
pub use exhaustive::ExhaustiveOracle;
pub use factory::UnifiedOracle;
pub use lls::LlsOracle;
pub use protocol::ResponseLayout;

use crate::game_of_life::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Inclusive upper limit on the live-cell count of the requested predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Unbounded,
    AtMost(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundError {
    #[error("live-cell bound must be non-negative, got {0}")]
    Negative(i64),
}

impl Bound {
    /// Whether a board with `live_cells` live cells satisfies this bound
    pub fn admits(&self, live_cells: usize) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::AtMost(limit) => live_cells <= *limit,
        }
    }

    /// The oracle's population constraint, e.g. `<=7`
    pub fn constraint(&self) -> Option<String> {
        match self {
            Bound::Unbounded => None,
            Bound::AtMost(limit) => Some(format!("<={}", limit)),
        }
    }
}

impl TryFrom<i64> for Bound {
    type Error = BoundError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .map(Bound::AtMost)
            .map_err(|_| BoundError::Negative(value))
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Unbounded => write!(f, "unbounded"),
            Bound::AtMost(limit) => write!(f, "<={}", limit),
        }
    }
}

/// Outcome of a single oracle query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleResult {
    Unsatisfiable,
    Satisfiable(Grid),
}

impl OracleResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, OracleResult::Satisfiable(_))
    }

    pub fn into_grid(self) -> Option<Grid> {
        match self {
            OracleResult::Satisfiable(grid) => Some(grid),
            OracleResult::Unsatisfiable => None,
        }
    }

    /// Live cells of the returned predecessor, if there is one
    pub fn live_cells(&self) -> Option<usize> {
        match self {
            OracleResult::Satisfiable(grid) => Some(grid.living_count()),
            OracleResult::Unsatisfiable => None,
        }
    }
}

/// A decision procedure for bounded predecessor existence
pub trait Oracle {
    fn invoke(&mut self, target: &Grid, bound: Bound) -> Result<OracleResult, OracleError>;
}

impl<O: Oracle + ?Sized> Oracle for &mut O {
    fn invoke(&mut self, target: &Grid, bound: Bound) -> Result<OracleResult, OracleError> {
        (**self).invoke(target, bound)
    }
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn invoke(&mut self, target: &Grid, bound: Bound) -> Result<OracleResult, OracleError> {
        (**self).invoke(target, bound)
    }
}
