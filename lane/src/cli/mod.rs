//! CLI layer: argument parsing and dispatch

pub mod args;
pub mod dispatch;
pub mod error;
pub mod output;

pub use args::{parse_from, Cli};
pub use dispatch::{dispatch, Outcome};
pub use error::{CliError, CliResult};
