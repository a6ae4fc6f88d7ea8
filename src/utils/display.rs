//! Console and file rendering of search reports

use crate::config::OutputFormat;
use crate::game_of_life::Grid;
use crate::reverse::{Phase, Solution};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Renders a [`Solution`] for the terminal or a report file
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a solution for console output
    pub fn format_solution(solution: &Solution, show_probes: bool) -> String {
        let mut output = String::new();

        output.push_str("=== Minimal Predecessor ===\n");
        output.push_str(&format!("Elapsed: {:.3}s\n", solution.solve_time.as_secs_f64()));
        output.push_str(&format!("Oracle Calls: {}\n", solution.oracle_calls()));
        output.push_str(&format!(
            "Living Cells: {} → {} (target has {})\n",
            solution.predecessor_living_cells,
            solution.minimized_living_cells,
            solution.target.living_count()
        ));
        output.push_str(&format!(
            "Verified: predecessor {}, minimized {}\n",
            Self::verdict(solution.predecessor_verified),
            Self::verdict(solution.minimized_verified)
        ));
        output.push('\n');

        output.push_str("Target:\n");
        output.push_str(&Self::format_grid_compact(&solution.target));
        output.push('\n');
        output.push_str(&format!(
            "Predecessor ({} living):\n",
            solution.predecessor_living_cells
        ));
        output.push_str(&Self::format_grid_compact(&solution.predecessor));
        output.push('\n');
        output.push_str(&format!(
            "Minimized Predecessor ({} living):\n",
            solution.minimized_living_cells
        ));
        output.push_str(&Self::format_grid_compact(&solution.minimized));

        if show_probes {
            output.push('\n');
            output.push_str(&Self::format_probes(solution));
        }

        output
    }

    fn verdict(result: Option<bool>) -> &'static str {
        match result {
            Some(true) => "valid",
            Some(false) => "INVALID",
            None => "skipped",
        }
    }

    /// Format the minimizer's queries as a table
    pub fn format_probes(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str("Oracle Queries:\n");
        output.push_str("#   | Phase      | Bound  | Result\n");
        output.push_str("----|------------|--------|----------\n");

        for (i, probe) in solution.probes.iter().enumerate() {
            let phase = match probe.phase {
                Phase::Bracketing => "bracketing",
                Phase::Refinement => "refinement",
            };
            let result = match probe.live_cells {
                Some(living) => format!("sat ({})", living),
                None => "unsat".to_string(),
            };
            output.push_str(&format!(
                "{:3} | {:10} | {:6} | {}\n",
                i + 1,
                phase,
                format!("<={}", probe.bound),
                result
            ));
        }

        output
    }

    /// One line per board row, `█` alive and `·` dead
    pub fn format_grid_compact(grid: &Grid) -> String {
        (0..grid.rows())
            .map(|row| {
                let mut line: String = (0..grid.columns())
                    .map(|col| if grid.get(row, col) { '█' } else { '·' })
                    .collect();
                line.push('\n');
                line
            })
            .collect()
    }

    /// Save a solution in the configured format, returning the written path
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join("solution.txt");
                std::fs::write(&path, Self::format_solution(solution, true))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join("solution.json");
                solution.save_to_file(&path)?;
                path
            }
        };

        Ok(path)
    }
}

/// ANSI-colored status lines, plain when `NO_COLOR` is set or the terminal is dumb
pub struct ColorOutput;

impl ColorOutput {
    pub fn success(text: &str) -> String {
        Color::Green.paint(text)
    }

    pub fn error(text: &str) -> String {
        Color::Red.paint(text)
    }

    pub fn warning(text: &str) -> String {
        Color::Yellow.paint(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
}

impl Color {
    pub fn paint(self, text: &str) -> String {
        let plain = std::env::var_os("NO_COLOR").is_some()
            || std::env::var("TERM").is_ok_and(|term| term == "dumb");
        if plain {
            return text.to_string();
        }
        let code = match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
        };
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reverse::Probe;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample_solution() -> Solution {
        let mut predecessor = Grid::new(3, 3);
        for row in 0..3 {
            predecessor.set(row, 1, true).unwrap();
        }
        let target = Grid::from_cells(vec![
            vec![false, false, false],
            vec![true, true, true],
            vec![false, false, false],
        ])
        .unwrap();
        let probes = vec![Probe {
            phase: Phase::Bracketing,
            bound: 1,
            live_cells: None,
        }];
        Solution::new(
            target,
            predecessor.clone(),
            predecessor,
            (Some(true), None),
            probes,
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_grid_formatting() {
        let cells = vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ];
        let grid = Grid::from_cells(cells).unwrap();

        let compact = SolutionFormatter::format_grid_compact(&grid);
        assert_eq!(compact, "█·█\n·█·\n█·█\n");
    }

    #[test]
    fn test_solution_formatting() {
        let text = SolutionFormatter::format_solution(&sample_solution(), true);
        assert!(text.contains("Living Cells: 3 → 3"));
        assert!(text.contains("predecessor valid, minimized skipped"));
        assert!(text.contains("bracketing | <=1    | unsat"));
    }

    #[test]
    fn test_save_solution_formats() {
        let temp_dir = tempdir().unwrap();
        let solution = sample_solution();

        let text_path =
            SolutionFormatter::save_solution(&solution, temp_dir.path(), OutputFormat::Text).unwrap();
        assert!(std::fs::read_to_string(text_path).unwrap().contains("Oracle Queries"));

        let json_path =
            SolutionFormatter::save_solution(&solution, temp_dir.path(), OutputFormat::Json).unwrap();
        let loaded = Solution::load_from_file(json_path).unwrap();
        assert_eq!(loaded.minimized_living_cells, 3);
    }

    #[test]
    fn test_color_output_keeps_text() {
        assert!(Color::Red.paint("mismatch").contains("mismatch"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
