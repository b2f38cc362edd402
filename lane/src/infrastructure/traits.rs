//! I/O boundary traits for testability
//!
//! These traits abstract the collaborators the CLI talks to, allowing the
//! dispatcher to be tested with in-memory implementations.

use std::fmt;
use std::io;
use std::process::Output;

use crate::application::ApplicationResult;
use crate::domain::{PersistedConfig, ResolvedConfig};
use crate::infrastructure::InfraResult;

/// Source of persisted defaults.
pub trait ConfigStore: Send + Sync {
    /// Load the persisted configuration. Called at most once per invocation.
    fn load(&self) -> ApplicationResult<PersistedConfig>;
}

/// Text produced by a finished engine run, printed verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput(pub String);

impl fmt::Display for EngineOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The monitoring engine: fetches, scans, notifies and repeats.
pub trait Engine: Send + Sync {
    /// Run with the given configuration. Blocks until the engine is done,
    /// which in continuous mode is when the engine decides to stop.
    fn run(&self, config: &ResolvedConfig) -> InfraResult<EngineOutput>;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command, feeding `stdin`, and capture its output.
    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner using std::process.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output> {
        use std::io::Write;
        use std::process::Stdio;

        let mut child = std::process::Command::new(cmd)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut child_stdin) = child.stdin.take() {
            // engines that ignore stdin may exit before reading it
            match child_stdin.write_all(stdin.as_bytes()) {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
                _ => {}
            }
        }

        child.wait_with_output()
    }
}
