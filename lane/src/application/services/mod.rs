//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod resolver;

pub use resolver::Resolver;
