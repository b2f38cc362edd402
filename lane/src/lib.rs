//! lane: resolve command line flags and config files into one run
//! configuration, then hand it to the monitoring engine.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
