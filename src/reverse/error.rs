use crate::oracle::{Bound, OracleError};
use thiserror::Error;

/// Why a resolve or minimize run stopped without a result
#[derive(Debug, Error)]
pub enum SearchError {
    /// The target is a Garden of Eden: the unbounded query was unsatisfiable
    #[error("target board has no predecessor")]
    NoPredecessor,

    #[error("oracle query with bound {bound} failed")]
    Oracle {
        bound: Bound,
        #[source]
        source: OracleError,
    },

    #[error("oracle returned a predecessor with {live_cells} live cells for bound {bound}")]
    BoundViolated { bound: Bound, live_cells: usize },

    #[error(
        "oracle found {live_cells} live cells sufficient after reporting bound {infeasible} unsatisfiable"
    )]
    InconsistentOracle { infeasible: usize, live_cells: usize },

    #[error(
        "oracle returned a {found_columns}x{found_rows} board for a {expected_columns}x{expected_rows} target"
    )]
    ShapeMismatch {
        found_columns: usize,
        found_rows: usize,
        expected_columns: usize,
        expected_rows: usize,
    },
}
