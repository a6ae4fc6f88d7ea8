//! Predecessor verification by direct simulation

use crate::game_of_life::{GameOfLifeRules, Grid};
use serde::{Deserialize, Serialize};

/// True iff one generation of `predecessor` is exactly `target`.
///
/// Boards of different shapes are never predecessors of each other.
pub fn is_predecessor(predecessor: &Grid, target: &Grid) -> bool {
    predecessor.same_shape(target)
        && (0..predecessor.height).all(|row| {
            (0..predecessor.width).all(|col| {
                GameOfLifeRules::should_be_alive(
                    predecessor.get(row, col),
                    predecessor.count_neighbors(row, col),
                ) == target.get(row, col)
            })
        })
}

/// Checks candidate predecessors and explains where they go wrong
#[derive(Debug, Clone, Copy, Default)]
pub struct PredecessorVerifier;

/// Result of verifying a predecessor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub mismatches: Vec<CellMismatch>,
    pub error_message: Option<String>,
}

/// A cell whose next state differs from the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMismatch {
    pub cell_position: (usize, usize),
    /// State required by the target
    pub expected_state: bool,
    /// State produced by evolving the predecessor
    pub actual_state: bool,
    pub neighbor_count: u8,
}

impl PredecessorVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Quick boolean check, see [`is_predecessor`]
    pub fn is_predecessor(&self, predecessor: &Grid, target: &Grid) -> bool {
        is_predecessor(predecessor, target)
    }

    /// Evolve `predecessor` once and list every cell that disagrees with `target`
    pub fn verify(&self, predecessor: &Grid, target: &Grid) -> VerificationResult {
        if !predecessor.same_shape(target) {
            return VerificationResult {
                is_valid: false,
                mismatches: vec![],
                error_message: Some(format!(
                    "Grid dimension mismatch: predecessor {}x{}, target {}x{}",
                    predecessor.width, predecessor.height, target.width, target.height
                )),
            };
        }

        let evolved = GameOfLifeRules::evolve(predecessor);
        let mut mismatches = Vec::new();
        for row in 0..target.height {
            for col in 0..target.width {
                let actual_state = evolved.get(row, col);
                let expected_state = target.get(row, col);
                if actual_state != expected_state {
                    mismatches.push(CellMismatch {
                        cell_position: (row, col),
                        expected_state,
                        actual_state,
                        neighbor_count: predecessor.count_neighbors(row, col),
                    });
                }
            }
        }

        let error_message = if mismatches.is_empty() {
            None
        } else {
            Some(Self::describe(&mismatches))
        };

        VerificationResult {
            is_valid: mismatches.is_empty(),
            mismatches,
            error_message,
        }
    }

    fn describe(mismatches: &[CellMismatch]) -> String {
        let mut message = format!("{} cell(s) do not evolve into the target. ", mismatches.len());

        for (i, mismatch) in mismatches.iter().take(3).enumerate() {
            if i == 0 {
                message.push_str("Examples: ");
            }
            message.push_str(&format!("{}; ", mismatch));
        }

        if mismatches.len() > 3 {
            message.push_str(&format!("... and {} more", mismatches.len() - 3));
        }

        message
    }
}

impl std::fmt::Display for CellMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = |alive: bool| if alive { "alive" } else { "dead" };
        write!(
            f,
            "cell ({}, {}) becomes {} with {} neighbors but the target has it {}",
            self.cell_position.0,
            self.cell_position.1,
            state(self.actual_state),
            self.neighbor_count,
            state(self.expected_state)
        )
    }
}

impl std::fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Verification Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;

        if let Some(ref error) = self.error_message {
            writeln!(f, "Error: {}", error)?;
        }

        writeln!(f, "Mismatched cells: {}", self.mismatches.len())?;
        Ok(())
    }
}
