//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic; persisted defaults arrive through
//! the `ConfigStore` trait and are passed in by value.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
