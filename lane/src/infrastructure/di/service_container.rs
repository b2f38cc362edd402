//! Service container for dependency injection
//!
//! Wires the config store and the engine the dispatcher works with.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::LayeredConfigStore;
use crate::infrastructure::engine::CommandEngine;
use crate::infrastructure::traits::{CommandRunner, ConfigStore, Engine, RealCommandRunner};

/// Container holding the collaborators of one invocation.
pub struct ServiceContainer {
    /// Source of persisted defaults
    pub store: Arc<dyn ConfigStore>,

    /// Monitoring engine
    pub engine: Arc<dyn Engine>,
}

impl ServiceContainer {
    /// Create a container with real implementations.
    pub fn new(config_file: Option<PathBuf>, engine_command: &str) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(RealCommandRunner);
        Self::with_deps(
            Arc::new(LayeredConfigStore::new(config_file)),
            Arc::new(CommandEngine::new(engine_command, runner)),
        )
    }

    /// Create a container with custom dependencies (for testing).
    pub fn with_deps(store: Arc<dyn ConfigStore>, engine: Arc<dyn Engine>) -> Self {
        Self { store, engine }
    }
}
