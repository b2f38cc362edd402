//! Dispatcher: decides what one invocation does and reports the outcome.
//!
//! Order is fixed: version, help, config-file utilities, resolve, run the
//! engine once. Nothing is loaded before it is needed, so `help` and
//! `--version` work with a broken config file.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, info, instrument};

use crate::application::services::Resolver;
use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::EngineOutput;
use crate::infrastructure::InfraError;

/// Where an invocation ended up.
#[derive(Debug)]
pub enum Outcome {
    Version(String),
    Usage(String),
    Completions(Shell),
    Template(String),
    ShowConfig(String),
    Succeeded(EngineOutput),
    Failed(InfraError),
}

impl Outcome {
    /// Every outcome exits 0; an engine failure leaves the status untouched.
    pub fn exit_code(&self) -> i32 {
        exitcode::OK
    }

    /// Print the outcome to stdout/stderr and return the exit code.
    pub fn report(self) -> i32 {
        let code = self.exit_code();
        match self {
            Outcome::Version(v) => output::info(&v),
            Outcome::Usage(text) => output::info(&text),
            Outcome::Completions(shell) => {
                let mut cmd = Cli::command();
                let name = cmd.get_name().to_string();
                generate(shell, &mut cmd, name, &mut io::stdout());
            }
            Outcome::Template(text) | Outcome::ShowConfig(text) => output::info(&text),
            Outcome::Succeeded(result) => output::info(&result),
            Outcome::Failed(err) => output::error(&err),
        }
        code
    }
}

/// Installed version string.
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Usage text, same as `--help`.
pub fn usage() -> String {
    Cli::command().render_long_help().to_string()
}

/// Run one invocation up to (and including) the single engine call.
///
/// Errors returned here happen before the engine is touched; engine failures
/// come back as [`Outcome::Failed`].
#[instrument(level = "debug", skip_all)]
pub fn dispatch(cli: &Cli, services: &ServiceContainer) -> CliResult<Outcome> {
    let raw = cli.invocation();

    if raw.version {
        return Ok(Outcome::Version(version()));
    }
    if raw.is_help_request() {
        return Ok(Outcome::Usage(usage()));
    }
    if let Some(shell) = cli.completions {
        return Ok(Outcome::Completions(shell));
    }
    if cli.template {
        return Ok(Outcome::Template(config::template()));
    }

    let persisted = services.store.load()?;
    if cli.show_config {
        return Ok(Outcome::ShowConfig(config::to_toml(&persisted)?));
    }

    let resolved = Resolver::new(persisted).resolve(&raw)?;
    info!(
        uri = resolved.uri(),
        keywords = ?resolved.keywords(),
        continuous = resolved.is_continuous(),
        "starting engine"
    );

    let outcome = match services.engine.run(&resolved) {
        Ok(result) => Outcome::Succeeded(result),
        Err(e) => Outcome::Failed(e),
    };
    debug!(?outcome, "engine returned");
    Ok(outcome)
}
