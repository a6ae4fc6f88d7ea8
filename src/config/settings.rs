//! Configuration settings for the predecessor minimizer

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest board the exhaustive backend will enumerate (2^24 candidates).
pub const EXHAUSTIVE_CELL_LIMIT: usize = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub oracle: OracleConfig,
    pub search: SearchConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// How the external predecessor oracle is invoked and how its output is laid out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    pub backend: OracleBackend,
    /// Executable of the oracle
    pub program: PathBuf,
    /// Arguments placed before the input file (e.g. when the oracle is a script run by an interpreter)
    #[serde(default)]
    pub program_args: Vec<String>,
    /// Where the oracle's input file is written before each call
    pub input_file: PathBuf,
    /// Arguments placed after the input file, before the bound constraint
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// 1-indexed output line that carries the `Unsatisfiable` marker
    pub unsat_line: usize,
    /// 1-indexed output line that carries the `x = W, y = H` header
    pub header_line: usize,
    pub exhaustive_max_cells: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OracleBackend {
    Lls,
    Exhaustive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Check both the resolved and the minimized board by simulation
    pub verify: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub target_board_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_report: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            oracle: OracleConfig::default(),
            search: SearchConfig { verify: true },
            input: InputConfig {
                target_board_file: PathBuf::from("patterns/blinker.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_report: false,
                output_directory: PathBuf::from("output/reports"),
            },
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            backend: OracleBackend::Lls,
            program: PathBuf::from("./logic-life-search-master/lls"),
            program_args: Vec::new(),
            input_file: PathBuf::from("temp/sat_solver_file.txt"),
            extra_args: Vec::new(),
            unsat_line: 14,
            header_line: 15,
            exhaustive_max_cells: 16,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file; call [`Settings::validate`] once overrides are applied
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.oracle.unsat_line == 0 || self.oracle.header_line == 0 {
            anyhow::bail!("Oracle output line indices are 1-based and must be positive");
        }

        if self.oracle.header_line <= self.oracle.unsat_line {
            anyhow::bail!(
                "Header line ({}) must come after the unsatisfiable marker line ({})",
                self.oracle.header_line,
                self.oracle.unsat_line
            );
        }

        if self.oracle.backend == OracleBackend::Lls && self.oracle.program.as_os_str().is_empty() {
            anyhow::bail!("Oracle program must not be empty");
        }

        if self.oracle.exhaustive_max_cells > EXHAUSTIVE_CELL_LIMIT {
            anyhow::bail!(
                "exhaustive_max_cells is {}, at most {} is supported",
                self.oracle.exhaustive_max_cells,
                EXHAUSTIVE_CELL_LIMIT
            );
        }

        if !self.input.target_board_file.exists() {
            anyhow::bail!(
                "Target board file does not exist: {}",
                self.input.target_board_file.display()
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref target_file) = cli_overrides.target_file {
            self.input.target_board_file = target_file.clone();
        }
        if let Some(ref program) = cli_overrides.oracle_program {
            self.oracle.program = program.clone();
        }
        if let Some(backend) = cli_overrides.backend {
            self.oracle.backend = backend;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save_report = true;
        }
        if cli_overrides.no_verify {
            self.search.verify = false;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub target_file: Option<PathBuf>,
    pub oracle_program: Option<PathBuf>,
    pub backend: Option<OracleBackend>,
    pub output_dir: Option<PathBuf>,
    pub no_verify: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn settings_with_target(dir: &std::path::Path) -> Settings {
        let target = dir.join("target.txt");
        std::fs::write(&target, "1 1\n0\n").unwrap();
        let mut settings = Settings::default();
        settings.input.target_board_file = target;
        settings
    }

    #[test]
    fn test_defaults_follow_lls_layout() {
        let settings = Settings::default();
        assert_eq!(settings.oracle.unsat_line, 14);
        assert_eq!(settings.oracle.header_line, 15);
        assert_eq!(settings.oracle.backend, OracleBackend::Lls);
        assert!(settings.search.verify);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let mut settings = settings_with_target(temp_dir.path());
        settings.oracle.extra_args = vec!["--solver".to_string(), "cadical".to_string()];
        settings.output.format = OutputFormat::Json;

        let path = temp_dir.path().join("config/default.yaml");
        settings.to_file(&path).unwrap();
        let loaded = Settings::from_file(&path).unwrap();

        assert_eq!(loaded.oracle.extra_args, settings.oracle.extra_args);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.input.target_board_file, settings.input.target_board_file);
    }

    #[test]
    fn test_validate_rejects_bad_line_layout() {
        let temp_dir = tempdir().unwrap();
        let mut settings = settings_with_target(temp_dir.path());
        assert!(settings.validate().is_ok());

        settings.oracle.header_line = settings.oracle.unsat_line;
        assert!(settings.validate().is_err());

        settings.oracle.unsat_line = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_target_and_huge_enumeration() {
        let mut settings = Settings::default();
        settings.input.target_board_file = PathBuf::from("does/not/exist.txt");
        assert!(settings.validate().is_err());

        let temp_dir = tempdir().unwrap();
        let mut settings = settings_with_target(temp_dir.path());
        settings.oracle.exhaustive_max_cells = EXHAUSTIVE_CELL_LIMIT + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_target_can_be_overridden_after_loading() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("stale.yaml");
        let mut stale = Settings::default();
        stale.input.target_board_file = temp_dir.path().join("gone.txt");
        stale.to_file(&path).unwrap();

        let mut loaded = Settings::from_file(&path).unwrap();
        assert!(loaded.validate().is_err());

        let replacement = settings_with_target(temp_dir.path()).input.target_board_file;
        loaded.merge_with_cli(&CliOverrides {
            target_file: Some(replacement),
            ..CliOverrides::default()
        });
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            target_file: Some(PathBuf::from("patterns/glider.txt")),
            oracle_program: Some(PathBuf::from("/opt/lls/lls")),
            backend: Some(OracleBackend::Exhaustive),
            output_dir: Some(PathBuf::from("out")),
            no_verify: true,
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.input.target_board_file, PathBuf::from("patterns/glider.txt"));
        assert_eq!(settings.oracle.program, PathBuf::from("/opt/lls/lls"));
        assert_eq!(settings.oracle.backend, OracleBackend::Exhaustive);
        assert!(settings.output.save_report);
        assert!(!settings.search.verify);
    }
}
