//! Configuration management for the predecessor minimizer

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OracleBackend, OracleConfig, OutputConfig, OutputFormat,
    SearchConfig, Settings, EXHAUSTIVE_CELL_LIMIT,
};
