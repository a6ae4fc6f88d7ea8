//! Subprocess adapter for logic-life-search style oracles

use super::{Bound, Oracle, OracleError, OracleResult, ProtocolError, ResponseLayout};
use crate::config::OracleConfig;
use crate::game_of_life::{write_oracle_input, Grid};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, warn};

/// Runs the external oracle once per query and decodes its stdout
#[derive(Debug, Clone)]
pub struct LlsOracle {
    program: PathBuf,
    program_args: Vec<String>,
    input_file: PathBuf,
    extra_args: Vec<String>,
    layout: ResponseLayout,
}

impl LlsOracle {
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            program: config.program.clone(),
            program_args: config.program_args.clone(),
            input_file: config.input_file.clone(),
            extra_args: config.extra_args.clone(),
            layout: ResponseLayout {
                unsat_line: config.unsat_line,
                header_line: config.header_line,
            },
        }
    }

    /// `<program> [program_args] <input_file> [extra_args] [-p <=N]`
    pub fn command(&self, bound: Bound) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.program_args)
            .arg(&self.input_file)
            .args(&self.extra_args);
        if let Some(constraint) = bound.constraint() {
            command.arg("-p").arg(constraint);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    pub fn layout(&self) -> ResponseLayout {
        self.layout
    }
}

impl Oracle for LlsOracle {
    fn invoke(&mut self, target: &Grid, bound: Bound) -> Result<OracleResult, OracleError> {
        if target.is_degenerate() {
            return Err(OracleError::EmptyBoard {
                rows: target.rows(),
                columns: target.columns(),
            });
        }

        write_oracle_input(target, &self.input_file).map_err(|source| {
            OracleError::InputFile {
                path: self.input_file.clone(),
                source,
            }
        })?;

        debug!(program = %self.program.display(), %bound, "invoking oracle");
        let start = Instant::now();

        let child = self
            .command(bound)
            .spawn()
            .map_err(|source| OracleError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        // wait_with_output reaps the child on every path, including read failures
        let output = child.wait_with_output().map_err(|source| OracleError::Io {
            program: self.program.clone(),
            source,
        })?;

        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            status = %output.status,
            "oracle finished"
        );

        let parsed = String::from_utf8(output.stdout)
            .map_err(|err| ProtocolError::InvalidUtf8 {
                valid_up_to: err.utf8_error().valid_up_to(),
            })
            .and_then(|stdout| self.layout.parse(&stdout, target));
        match parsed {
            Ok(result) => {
                if !output.status.success() {
                    warn!(status = %output.status, "oracle exited unsuccessfully but produced a response");
                }
                Ok(result)
            }
            Err(source) if !output.status.success() => Err(OracleError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                source,
            }),
            Err(err) => Err(err.into()),
        }
    }
}
