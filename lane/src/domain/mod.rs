//! Domain layer: invocation and configuration values
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;

pub use builder::ResolvedConfigBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
