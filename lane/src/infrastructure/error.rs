//! Infrastructure-level errors: failures at the engine boundary

use thiserror::Error;

/// Errors raised while handing a resolved configuration to the engine.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("engine `{program}` failed: {message}")]
    Engine { program: String, message: String },

    #[error("cannot encode config for engine: {0}")]
    Encode(#[from] serde_json::Error),
}

impl InfraError {
    pub fn engine(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Engine {
            program: program.into(),
            message: message.into(),
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
