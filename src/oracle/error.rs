//! Error types for oracle calls

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// The oracle's output did not follow the expected line layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("oracle output ended after {available} lines, expected line {line}")]
    Truncated { line: usize, available: usize },

    #[error("malformed dimension header on line {line}: {text:?}")]
    MalformedHeader { line: usize, text: String },

    #[error(
        "oracle declared a {declared_columns}x{declared_rows} pattern, expected {expected_columns}x{expected_rows} (target plus border)"
    )]
    DimensionMismatch {
        declared_columns: usize,
        declared_rows: usize,
        expected_columns: usize,
        expected_rows: usize,
    },

    #[error("pattern row {row} has {found} cells and no terminator, expected {expected}")]
    ShortRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unexpected character {ch:?} at pattern row {row}, column {column}")]
    UnexpectedCharacter { row: usize, column: usize, ch: char },

    #[error("oracle output is not valid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Failure of a single oracle invocation
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("target board must be non-empty, got {rows}x{columns}")]
    EmptyBoard { rows: usize, columns: usize },

    #[error("board has {cells} cells, exhaustive search is limited to {limit}")]
    TooLarge { cells: usize, limit: usize },

    #[error("failed to write oracle input file {}", .path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start oracle `{}`", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read output of oracle `{}`", .program.display())]
    Io {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("oracle exited with {status}: {stderr}")]
    Failed {
        status: ExitStatus,
        stderr: String,
        #[source]
        source: ProtocolError,
    },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
