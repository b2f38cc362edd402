//! Merges command line flags over persisted defaults.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{PersistedConfig, RawInvocation, ResolvedConfig, ResolvedConfigBuilder};

/// Turns one [`RawInvocation`] into the [`ResolvedConfig`] the engine runs with.
///
/// Owns its copy of the persisted defaults; resolving is a pure function of
/// that copy and the invocation, so the same input always yields the same
/// value.
#[derive(Debug, Clone)]
pub struct Resolver {
    persisted: PersistedConfig,
}

impl Resolver {
    pub fn new(persisted: PersistedConfig) -> Self {
        Self { persisted }
    }

    /// Flag wins over config file for every field. Empty strings count as
    /// not given, on either side.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve(&self, raw: &RawInvocation) -> ApplicationResult<ResolvedConfig> {
        let keywords = non_empty(raw.keywords.clone()).or_else(|| {
            self.persisted
                .keywords
                .as_ref()
                .filter(|kw| !kw.is_unset())
                .map(|kw| kw.to_csv())
        });

        let uri = non_empty(raw.command().map(str::to_string))
            .or_else(|| non_empty(self.persisted.uri.clone()));

        let notify = non_empty(raw.notify.clone()).map(Value::String);

        let interval = [raw.continuous.as_ref(), self.persisted.continuous.as_ref()]
            .into_iter()
            .flatten()
            .find(|spec| spec.is_truthy())
            .cloned();

        debug!(?keywords, ?uri, ?interval, "merged sources");

        let resolved = ResolvedConfigBuilder::new(self.persisted.clone())
            .keywords(keywords)
            .uri(uri)
            .notify(notify)
            .run_every(interval)
            .build()?;

        Ok(resolved)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::{DomainError, IntervalSpec, Keywords};

    fn invocation(args: &[&str]) -> RawInvocation {
        RawInvocation {
            positional: args.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn given_empty_keyword_flag_when_resolving_then_falls_back_to_config() {
        let resolver = Resolver::new(PersistedConfig {
            keywords: Some(Keywords::Csv("from-config".into())),
            ..Default::default()
        });
        let raw = RawInvocation {
            keywords: Some(String::new()),
            ..invocation(&["https://example.com"])
        };

        let resolved = resolver.resolve(&raw).unwrap();

        assert_eq!(resolved.keywords(), ["from-config"]);
    }

    #[test]
    fn given_empty_keyword_list_in_config_when_resolving_then_single_empty_keyword() {
        let resolver = Resolver::new(PersistedConfig {
            keywords: Some(Keywords::List(vec![])),
            ..Default::default()
        });

        let resolved = resolver
            .resolve(&invocation(&["https://example.com"]))
            .unwrap();

        assert_eq!(resolved.keywords(), [""]);
    }

    #[test]
    fn given_empty_keyword_string_in_config_when_resolving_then_missing_keywords() {
        let resolver = Resolver::new(PersistedConfig {
            keywords: Some(Keywords::Csv(String::new())),
            ..Default::default()
        });

        let err = resolver
            .resolve(&invocation(&["https://example.com"]))
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingKeywords)
        ));
    }

    #[test]
    fn given_falsy_cli_interval_when_config_is_truthy_then_config_interval_used() {
        let resolver = Resolver::new(PersistedConfig {
            keywords: Some(Keywords::Csv("a".into())),
            continuous: Some(IntervalSpec::Millis(60_000)),
            ..Default::default()
        });
        let raw = RawInvocation {
            continuous: Some(IntervalSpec::Millis(0)),
            ..invocation(&["https://example.com"])
        };

        let resolved = resolver.resolve(&raw).unwrap();

        assert!(resolved.is_continuous());
        assert_eq!(resolved.run_every(), Some(&IntervalSpec::Millis(60_000)));
    }
}
