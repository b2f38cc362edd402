//! CLI argument definitions using clap

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::domain::{IntervalSpec, RawInvocation};
use crate::infrastructure::engine::DEFAULT_ENGINE;

/// Watch a website for keywords
#[derive(Parser, Debug)]
#[command(name = "lane")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "Example:\n  $ lane https://google.com -k search -c 5m\n\n\
    Without -c the site is checked only once.")]
pub struct Cli {
    /// Url to watch; `help` prints this text
    #[arg(value_name = "URL", value_hint = ValueHint::Url)]
    pub positional: Vec<String>,

    /// Print installed version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Comma separated list of keywords; repeat to add more
    #[arg(short, long, value_name = "CSV", action = ArgAction::Append)]
    pub keywords: Vec<String>,

    /// Notification target, passed to the engine
    #[arg(short, long, overrides_with = "notify")]
    pub notify: Option<String>,

    /// Interval between checks: milliseconds or shorthand like `1h`, `5m`
    #[arg(
        short,
        long,
        value_name = "INTERVAL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_interval,
        overrides_with = "continuous"
    )]
    pub continuous: Option<IntervalSpec>,

    /// Config file to use instead of ./lane.toml or ./config.json
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Monitoring engine command
    #[arg(long, env = "LANE_ENGINE", default_value = DEFAULT_ENGINE)]
    pub engine: String,

    /// Print the effective config file settings and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print a config file template and exit
    #[arg(long)]
    pub template: bool,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,
}

impl Cli {
    /// The syntactic part of the command line the resolver works with.
    pub fn invocation(&self) -> RawInvocation {
        RawInvocation {
            positional: self.positional.clone(),
            version: self.version,
            keywords: (!self.keywords.is_empty()).then(|| self.keywords.join(",")),
            notify: self.notify.clone(),
            continuous: self.continuous.clone(),
        }
    }
}

/// Parse process-style arguments (program name first).
pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

fn parse_interval(s: &str) -> Result<IntervalSpec, Infallible> {
    s.parse()
}
