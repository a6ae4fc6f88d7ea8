//! Factory for creating oracle instances based on configuration

use super::{Bound, ExhaustiveOracle, LlsOracle, Oracle, OracleError, OracleResult};
use crate::config::{OracleBackend, OracleConfig};
use crate::game_of_life::Grid;

/// Unified oracle interface over the available backends
pub enum UnifiedOracle {
    Lls(LlsOracle),
    Exhaustive(ExhaustiveOracle),
}

impl UnifiedOracle {
    /// Create a new oracle instance based on the configured backend
    pub fn new(config: &OracleConfig) -> Self {
        match config.backend {
            OracleBackend::Lls => UnifiedOracle::Lls(LlsOracle::new(config)),
            OracleBackend::Exhaustive => {
                UnifiedOracle::Exhaustive(ExhaustiveOracle::new(config.exhaustive_max_cells))
            }
        }
    }

    /// Get the backend type being used
    pub fn backend(&self) -> OracleBackend {
        match self {
            UnifiedOracle::Lls(_) => OracleBackend::Lls,
            UnifiedOracle::Exhaustive(_) => OracleBackend::Exhaustive,
        }
    }
}

impl Oracle for UnifiedOracle {
    fn invoke(&mut self, target: &Grid, bound: Bound) -> Result<OracleResult, OracleError> {
        match self {
            UnifiedOracle::Lls(oracle) => oracle.invoke(target, bound),
            UnifiedOracle::Exhaustive(oracle) => oracle.invoke(target, bound),
        }
    }
}
