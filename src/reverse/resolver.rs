//! Unbounded predecessor lookup

use super::SearchError;
use crate::game_of_life::Grid;
use crate::oracle::{Bound, Oracle, OracleResult};
use tracing::debug;

/// Ask the oracle for any predecessor of `target`.
///
/// An unsatisfiable answer means the target has no predecessor at all; it is
/// reported as [`SearchError::NoPredecessor`] and is not worth retrying.
pub fn resolve<O: Oracle + ?Sized>(oracle: &mut O, target: &Grid) -> Result<Grid, SearchError> {
    query(oracle, target, Bound::Unbounded)?.ok_or(SearchError::NoPredecessor)
}

/// Run one oracle query and reject answers that contradict the question asked
pub(crate) fn query<O: Oracle + ?Sized>(
    oracle: &mut O,
    target: &Grid,
    bound: Bound,
) -> Result<Option<Grid>, SearchError> {
    let result = oracle
        .invoke(target, bound)
        .map_err(|source| SearchError::Oracle { bound, source })?;

    let grid = match result {
        OracleResult::Unsatisfiable => {
            debug!(%bound, "unsatisfiable");
            return Ok(None);
        }
        OracleResult::Satisfiable(grid) => grid,
    };

    if !grid.same_shape(target) {
        return Err(SearchError::ShapeMismatch {
            found_columns: grid.columns(),
            found_rows: grid.rows(),
            expected_columns: target.columns(),
            expected_rows: target.rows(),
        });
    }

    let live_cells = grid.living_count();
    if !bound.admits(live_cells) {
        return Err(SearchError::BoundViolated { bound, live_cells });
    }

    debug!(%bound, live_cells, "satisfiable");
    Ok(Some(grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{ExhaustiveOracle, OracleError, ProtocolError};
    use crate::reverse::is_predecessor;

    /// Replies with a fixed answer regardless of the question
    struct FixedOracle(Option<OracleResult>);

    impl Oracle for FixedOracle {
        fn invoke(&mut self, _target: &Grid, _bound: Bound) -> Result<OracleResult, OracleError> {
            self.0.clone().ok_or(OracleError::Protocol(ProtocolError::Truncated {
                line: 14,
                available: 0,
            }))
        }
    }

    #[test]
    fn test_empty_target_end_to_end() {
        let target = Grid::new(2, 2);
        let mut oracle = ExhaustiveOracle::new(16);

        let t0 = resolve(&mut oracle, &target).unwrap();
        assert!(is_predecessor(&t0, &target));
    }

    #[test]
    fn test_garden_of_eden_is_terminal() {
        let target = Grid::from_cells(vec![vec![true, true, true]]).unwrap();
        let mut oracle = ExhaustiveOracle::new(16);

        let err = resolve(&mut oracle, &target).unwrap_err();
        assert!(matches!(err, SearchError::NoPredecessor));
        assert_eq!(oracle.calls(), 1);
    }

    #[test]
    fn test_protocol_error_is_not_unsatisfiable() {
        let mut oracle = FixedOracle(None);
        let err = resolve(&mut oracle, &Grid::new(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Oracle {
                bound: Bound::Unbounded,
                source: OracleError::Protocol(_)
            }
        ));
    }

    #[test]
    fn test_bogus_answers_rejected() {
        let mut oracle = FixedOracle(Some(OracleResult::Satisfiable(Grid::new(3, 2))));
        let err = resolve(&mut oracle, &Grid::new(2, 2)).unwrap_err();
        assert!(matches!(err, SearchError::ShapeMismatch { found_columns: 3, .. }));

        let mut full = Grid::new(2, 2);
        full.cells = vec![true; 4];
        let mut oracle = FixedOracle(Some(OracleResult::Satisfiable(full)));
        let err = query(&mut oracle, &Grid::new(2, 2), Bound::AtMost(3)).unwrap_err();
        assert!(matches!(err, SearchError::BoundViolated { live_cells: 4, .. }));
    }
}
