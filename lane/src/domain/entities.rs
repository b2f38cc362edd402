//! Invocation and configuration values shared by every layer.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Interval between engine checks, kept exactly as the user wrote it.
///
/// The engine interprets the unit (`60000` is milliseconds, `"5m"` is a
/// shorthand duration); this crate only decides whether it is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntervalSpec {
    Flag(bool),
    Millis(u64),
    Shorthand(String),
}

impl IntervalSpec {
    /// Whether this value switches continuous mode on.
    pub fn is_truthy(&self) -> bool {
        match self {
            IntervalSpec::Flag(on) => *on,
            IntervalSpec::Millis(ms) => *ms != 0,
            IntervalSpec::Shorthand(s) => !s.is_empty(),
        }
    }
}

impl FromStr for IntervalSpec {
    type Err = Infallible;

    /// `true`/`false` become flags, all-digit input becomes milliseconds,
    /// anything else is passed through as a shorthand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = match s {
            "true" => IntervalSpec::Flag(true),
            "false" => IntervalSpec::Flag(false),
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => digits
                .parse()
                .map(IntervalSpec::Millis)
                .unwrap_or_else(|_| IntervalSpec::Shorthand(digits.to_string())),
            other => IntervalSpec::Shorthand(other.to_string()),
        };
        Ok(spec)
    }
}

impl fmt::Display for IntervalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalSpec::Flag(on) => write!(f, "{on}"),
            IntervalSpec::Millis(ms) => write!(f, "{ms}"),
            IntervalSpec::Shorthand(s) => f.write_str(s),
        }
    }
}

/// Keywords as found in a config file: a comma separated string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    Csv(String),
    List(Vec<String>),
}

impl Keywords {
    /// Flatten to a single comma separated string.
    pub fn to_csv(&self) -> String {
        match self {
            Keywords::Csv(s) => s.clone(),
            Keywords::List(items) => items.join(","),
        }
    }

    /// Only an empty string counts as unset. An empty list still flattens
    /// to `""` and resolves to `[""]`.
    pub fn is_unset(&self) -> bool {
        matches!(self, Keywords::Csv(s) if s.is_empty())
    }
}

/// Flags and positionals exactly as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInvocation {
    pub positional: Vec<String>,
    pub version: bool,
    pub keywords: Option<String>,
    pub notify: Option<String>,
    pub continuous: Option<IntervalSpec>,
}

impl RawInvocation {
    /// First positional argument, if any.
    pub fn command(&self) -> Option<&str> {
        self.positional.first().map(String::as_str)
    }

    /// `help` as first positional, in any letter case.
    pub fn is_help_request(&self) -> bool {
        self.command()
            .is_some_and(|cmd| cmd.eq_ignore_ascii_case("help"))
    }
}

/// Defaults loaded from configuration files and the environment.
///
/// Keys this crate does not know about are kept in `extra` and forwarded to
/// the engine untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Keywords>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous: Option<IntervalSpec>,

    #[serde(
        default,
        rename = "runEvery",
        alias = "run_every",
        skip_serializing_if = "Option::is_none"
    )]
    pub run_every: Option<IntervalSpec>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Fully validated configuration handed to the engine.
///
/// Only [`crate::domain::ResolvedConfigBuilder`] creates one; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub(crate) uri: String,
    pub(crate) keywords: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notify: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) continuous: Option<IntervalSpec>,

    #[serde(rename = "runEvery", skip_serializing_if = "Option::is_none")]
    pub(crate) run_every: Option<IntervalSpec>,

    #[serde(flatten)]
    pub(crate) extra: BTreeMap<String, Value>,
}

impl ResolvedConfig {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn notify(&self) -> Option<&Value> {
        self.notify.as_ref()
    }

    pub fn continuous(&self) -> Option<&IntervalSpec> {
        self.continuous.as_ref()
    }

    /// True when the engine is expected to repeat its check.
    pub fn is_continuous(&self) -> bool {
        self.continuous.as_ref().is_some_and(IntervalSpec::is_truthy)
    }

    pub fn run_every(&self) -> Option<&IntervalSpec> {
        self.run_every.as_ref()
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}

/// Split a comma separated keyword string and trim each entry.
///
/// Empty entries are kept: `"a,b,"` yields `["a", "b", ""]`.
pub fn normalize_keywords(csv: &str) -> Vec<String> {
    csv.split(',').map(|k| k.trim().to_string()).collect()
}

/// Syntactic URL check: must parse, carry a host and contain no whitespace.
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    Url::parse(candidate).is_ok_and(|url| url.has_host())
}
