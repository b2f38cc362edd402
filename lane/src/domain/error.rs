//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Validation failures raised while resolving a run configuration.
///
/// Both are terminal: the engine is never started when one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("keywords are required: pass -k/--keywords or set `keywords` in the config file")]
    MissingKeywords,

    #[error(
        "the first argument (or `uri` in the config file) must be a valid url, got: {}",
        .uri.as_deref().unwrap_or("nothing")
    )]
    InvalidUri { uri: Option<String> },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
