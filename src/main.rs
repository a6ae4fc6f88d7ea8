//! Command line front end for the minimal predecessor search

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use game_of_life_minimizer::{
    config::{CliOverrides, OracleBackend, Settings},
    game_of_life::{create_example_grids, load_grid_from_file},
    reverse::{PredecessorVerifier, SearchError},
    solve_minimal_predecessor,
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "game_of_life_minimizer")]
#[command(about = "Find Game of Life predecessors with as few live cells as possible")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a predecessor of the target board and minimize its live cells
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Target board file (overrides config)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Oracle executable (overrides config)
        #[arg(long)]
        oracle: Option<PathBuf>,

        /// Oracle backend (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<BackendArg>,

        /// Save a report to this directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the simulation check of the oracle's answers
        #[arg(long)]
        no_verify: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check that one board evolves into another in a single generation
    Verify {
        /// Predecessor board file
        #[arg(short, long)]
        predecessor: PathBuf,

        /// Target board file
        #[arg(short, long)]
        target: PathBuf,
    },

    /// Create a default configuration and example target boards
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    Lls,
    Exhaustive,
}

impl From<BackendArg> for OracleBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Lls => OracleBackend::Lls,
            BackendArg::Exhaustive => OracleBackend::Exhaustive,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Solve { verbose: true, .. });
    init_tracing(verbose);

    match cli.command {
        Commands::Solve {
            config,
            target,
            oracle,
            backend,
            output,
            no_verify,
            verbose,
        } => {
            let overrides = CliOverrides {
                target_file: target,
                oracle_program: oracle,
                backend: backend.map(Into::into),
                output_dir: output,
                no_verify,
            };
            solve_command(&config, overrides, verbose)
        }
        Commands::Verify { predecessor, target } => verify_command(&predecessor, &target),
        Commands::Setup { directory, force } => setup_command(&directory, force),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(&config_path.to_path_buf())
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(config_path: &Path, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(&overrides);

    if verbose {
        println!("Configuration:");
        println!("  Backend: {:?}", settings.oracle.backend);
        println!("  Oracle: {}", settings.oracle.program.display());
        println!("  Target file: {}", settings.input.target_board_file.display());
        println!("  Verify: {}", settings.search.verify);
        println!();
    }

    settings
        .validate()
        .context("Configuration validation failed")?;

    let output = settings.output.clone();
    let solution = match solve_minimal_predecessor(settings) {
        Ok(solution) => solution,
        Err(err) => {
            if let Some(SearchError::NoPredecessor) = err.downcast_ref::<SearchError>() {
                println!(
                    "{}",
                    ColorOutput::warning("No predecessor exists: the target is a Garden of Eden")
                );
                return Ok(());
            }
            return Err(err);
        }
    };

    println!("{}", SolutionFormatter::format_solution(&solution, verbose));

    if solution.passed_verification() {
        println!("{}", ColorOutput::success("Oracle answers agree with simulation"));
    } else {
        println!(
            "{}",
            ColorOutput::error("Oracle answers failed verification, see the log for details")
        );
    }

    if output.save_report {
        let path = SolutionFormatter::save_solution(&solution, &output.output_directory, output.format)
            .context("Failed to save report")?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

fn verify_command(predecessor_path: &Path, target_path: &Path) -> Result<()> {
    let predecessor = load_grid_from_file(predecessor_path).with_context(|| {
        format!("Failed to load predecessor from {}", predecessor_path.display())
    })?;
    let target = load_grid_from_file(target_path)
        .with_context(|| format!("Failed to load target from {}", target_path.display()))?;

    let result = PredecessorVerifier::new().verify(&predecessor, &target);
    println!("{}", result);
    for mismatch in &result.mismatches {
        println!("  {}", mismatch);
    }

    if result.is_valid {
        println!("{}", ColorOutput::success("Board is a predecessor of the target"));
    } else {
        println!("{}", ColorOutput::error("Board is not a predecessor of the target"));
    }

    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    create_example_grids(&patterns_dir).context("Failed to create example boards")?;
    println!("Created example target boards in: {}", patterns_dir.display());

    let mut default_settings = Settings::default();
    default_settings.input.target_board_file = patterns_dir.join("blinker.txt");
    let config_path = config_dir.join("default.yaml");
    write_config(&default_settings, &config_path, force)
        .context("Failed to create default configuration")?;

    // The exhaustive backend only handles boards up to `exhaustive_max_cells`
    let mut offline = Settings::default();
    offline.oracle.backend = OracleBackend::Exhaustive;
    offline.input.target_board_file = patterns_dir.join("block.txt");
    let offline_path = config_dir.join("exhaustive.yaml");
    write_config(&offline, &offline_path, force)
        .context("Failed to create exhaustive configuration")?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Point oracle.program in {} at your lls binary", config_path.display());
    println!("2. Run: game_of_life_minimizer solve --config {}", config_path.display());
    println!(
        "3. Or without an oracle: game_of_life_minimizer solve --config {}",
        offline_path.display()
    );

    Ok(())
}

fn write_config(settings: &Settings, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Skipped: {} (already exists)", path.display());
        return Ok(());
    }
    settings.to_file(&path.to_path_buf())?;
    println!("Created: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parses_solve_overrides() {
        let cli = Cli::try_parse_from([
            "game_of_life_minimizer",
            "solve",
            "--target",
            "patterns/block.txt",
            "--backend",
            "exhaustive",
            "--no-verify",
        ])
        .unwrap();

        match cli.command {
            Commands::Solve {
                target,
                backend,
                no_verify,
                config,
                ..
            } => {
                assert_eq!(target, Some(PathBuf::from("patterns/block.txt")));
                assert_eq!(backend, Some(BackendArg::Exhaustive));
                assert!(no_verify);
                assert_eq!(config, PathBuf::from("config/default.yaml"));
            }
            _ => panic!("expected solve command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_backend() {
        let result =
            Cli::try_parse_from(["game_of_life_minimizer", "solve", "--backend", "minisat"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_setup_creates_files() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path(), false).unwrap();

        let config_path = temp_dir.path().join("config/default.yaml");
        assert!(config_path.exists());
        assert!(temp_dir.path().join("patterns/blinker.txt").exists());

        let settings = Settings::from_file(&config_path).unwrap();
        assert_eq!(settings.oracle.backend, OracleBackend::Lls);
        assert_eq!(
            settings.input.target_board_file,
            temp_dir.path().join("patterns/blinker.txt")
        );
        settings.validate().unwrap();
    }

    #[test]
    fn test_setup_offline_config_solves() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path(), false).unwrap();

        let settings =
            Settings::from_file(&temp_dir.path().join("config/exhaustive.yaml")).unwrap();
        assert_eq!(settings.oracle.backend, OracleBackend::Exhaustive);
        settings.validate().unwrap();

        let solution = solve_minimal_predecessor(settings).unwrap();
        assert_eq!(solution.minimized_verified, Some(true));
        assert_eq!(solution.minimized_living_cells, 3);
    }

    #[test]
    fn test_setup_keeps_existing_configs_without_force() {
        let temp_dir = tempdir().unwrap();
        let offline_path = temp_dir.path().join("config/exhaustive.yaml");
        std::fs::create_dir_all(offline_path.parent().unwrap()).unwrap();
        std::fs::write(&offline_path, "edited by hand\n").unwrap();

        setup_command(temp_dir.path(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&offline_path).unwrap(), "edited by hand\n");

        setup_command(temp_dir.path(), true).unwrap();
        let settings = Settings::from_file(&offline_path).unwrap();
        assert_eq!(settings.oracle.backend, OracleBackend::Exhaustive);
    }

    #[test]
    fn test_verify_command_accepts_files() {
        let temp_dir = tempdir().unwrap();
        let predecessor = temp_dir.path().join("vertical.txt");
        let target = temp_dir.path().join("horizontal.txt");
        std::fs::write(&predecessor, "3 3\n0 1 0\n0 1 0\n0 1 0\n").unwrap();
        std::fs::write(&target, "3 3\n0 0 0\n1 1 1\n0 0 0\n").unwrap();

        verify_command(&predecessor, &target).unwrap();
        assert!(verify_command(&predecessor, &temp_dir.path().join("missing.txt")).is_err());
    }
}
