//! Builder turning persisted defaults plus named overrides into a [`ResolvedConfig`].

use serde_json::Value;

use crate::domain::entities::{
    is_valid_url, normalize_keywords, IntervalSpec, PersistedConfig, ResolvedConfig,
};
use crate::domain::error::{DomainError, DomainResult};

/// Collects overrides on top of a [`PersistedConfig`] and validates them in one step.
///
/// Nothing is applied until [`build`](Self::build) succeeds, so a failed
/// resolution never leaves a half-merged value behind.
#[derive(Debug, Clone)]
pub struct ResolvedConfigBuilder {
    base: PersistedConfig,
    uri: Option<String>,
    keywords: Option<String>,
    notify: Option<Value>,
    run_every: Option<IntervalSpec>,
}

impl ResolvedConfigBuilder {
    pub fn new(base: PersistedConfig) -> Self {
        Self {
            base,
            uri: None,
            keywords: None,
            notify: None,
            run_every: None,
        }
    }

    /// Comma separated keyword source, normalized during `build`.
    pub fn keywords(mut self, csv: Option<String>) -> Self {
        self.keywords = csv;
        self
    }

    pub fn uri(mut self, uri: Option<String>) -> Self {
        self.uri = uri;
        self
    }

    /// Replace `notify`; `None` keeps the persisted value.
    pub fn notify(mut self, notify: Option<Value>) -> Self {
        self.notify = notify;
        self
    }

    /// Switch continuous mode on with this interval; `None` or a falsy value
    /// keeps the persisted `continuous`/`runEvery` pair.
    pub fn run_every(mut self, interval: Option<IntervalSpec>) -> Self {
        self.run_every = interval.filter(IntervalSpec::is_truthy);
        self
    }

    /// Validate and assemble. Keywords are checked before the URI.
    pub fn build(self) -> DomainResult<ResolvedConfig> {
        let csv = self.keywords.ok_or(DomainError::MissingKeywords)?;

        let uri = match self.uri {
            Some(uri) if is_valid_url(&uri) => uri,
            other => return Err(DomainError::InvalidUri { uri: other }),
        };

        let PersistedConfig {
            notify,
            continuous,
            run_every,
            extra,
            ..
        } = self.base;

        let (continuous, run_every) = match self.run_every {
            Some(interval) => (Some(IntervalSpec::Flag(true)), Some(interval)),
            None => (continuous, run_every),
        };

        Ok(ResolvedConfig {
            uri,
            keywords: normalize_keywords(&csv),
            notify: self.notify.or(notify),
            continuous,
            run_every,
            extra,
        })
    }
}
