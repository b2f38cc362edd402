//! Engine adapter that runs the monitor as a separate program.
//!
//! The resolved configuration is written to the program's stdin as one JSON
//! object. A zero exit status means success and stdout is the result;
//! anything else is an engine failure carrying stderr.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::ResolvedConfig;
use crate::infrastructure::traits::{CommandRunner, Engine, EngineOutput};
use crate::infrastructure::{InfraError, InfraResult};

/// Program started when neither `--engine` nor `LANE_ENGINE` is given.
pub const DEFAULT_ENGINE: &str = "lane-engine";

/// Starts the engine program once per run. Trailing newlines are trimmed
/// from its stdout since the result printer adds its own.
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    runner: Arc<dyn CommandRunner>,
}

impl CommandEngine {
    /// `command` is split on whitespace: the first word is the program, the
    /// rest are its arguments.
    pub fn new(command: &str, runner: Arc<dyn CommandRunner>) -> Self {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().unwrap_or_else(|| DEFAULT_ENGINE.to_string());
        Self {
            program,
            args: words.collect(),
            runner,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Engine for CommandEngine {
    #[instrument(level = "debug", skip_all, fields(program = %self.program))]
    fn run(&self, config: &ResolvedConfig) -> InfraResult<EngineOutput> {
        let payload = serde_json::to_string(config)?;
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        debug!(%payload, "starting engine");

        let output = self
            .runner
            .run_with_stdin(&self.program, &args, &payload)
            .map_err(|e| InfraError::engine(&self.program, format!("cannot start: {e}")))?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Ok(EngineOutput(stdout.trim_end().to_string()));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match stderr.trim() {
            "" => format!("exited with {}", output.status),
            msg => msg.to_string(),
        };
        Err(InfraError::engine(&self.program, message))
    }
}
