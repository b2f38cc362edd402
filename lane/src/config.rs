//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Global config: `$XDG_CONFIG_HOME/lane/config.toml`
//! 2. Local config: `./lane.toml` or `./config.json`, or the file given with `--config`
//! 3. Environment variables: `LANE_*` prefix
//!
//! A higher layer replaces whole top-level keys of a lower one. Keys lane does
//! not know about are kept and passed on to the engine.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{IntervalSpec, Keywords, PersistedConfig};
use crate::infrastructure::traits::ConfigStore;

/// Prefix for environment overrides (`LANE_URI`, `LANE_KEYWORDS`, ...).
pub const ENV_PREFIX: &str = "LANE";

/// Local file names looked up in the working directory, first match wins.
pub const LOCAL_CONFIG_FILES: [&str; 2] = ["lane.toml", "config.json"];

/// Get the XDG config directory for lane.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lane").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Find the first local config file present in `dir`.
pub fn local_config_path(dir: &Path) -> Option<PathBuf> {
    LOCAL_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Parse one config file; JSON by `.json` extension, TOML otherwise.
pub fn load_file(path: &Path) -> ApplicationResult<PersistedConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", path.display(), e),
        })
    } else {
        toml::from_str(&content).map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", path.display(), e),
        })
    }
}

/// Lay `overlay` over `base`: every key set in `overlay` wins.
pub fn merge_layers(base: PersistedConfig, overlay: PersistedConfig) -> PersistedConfig {
    let mut extra = base.extra;
    extra.extend(overlay.extra);

    PersistedConfig {
        uri: overlay.uri.or(base.uri),
        keywords: overlay.keywords.or(base.keywords),
        notify: overlay.notify.or(base.notify),
        continuous: overlay.continuous.or(base.continuous),
        run_every: overlay.run_every.or(base.run_every),
        extra,
    }
}

/// Which local file to read.
#[derive(Debug, Clone)]
enum LocalSource {
    /// Search the directory for one of [`LOCAL_CONFIG_FILES`].
    Search(PathBuf),
    /// Explicit file, must exist.
    Explicit(PathBuf),
}

/// [`ConfigStore`] reading global file, local file and environment, in that order.
#[derive(Debug, Clone)]
pub struct LayeredConfigStore {
    global: Option<PathBuf>,
    local: Option<LocalSource>,
    env_prefix: String,
    env_source: Option<HashMap<String, String>>,
}

impl LayeredConfigStore {
    /// Default locations; `explicit` replaces the working directory lookup.
    pub fn new(explicit: Option<PathBuf>) -> Self {
        let local = match explicit {
            Some(path) => Some(LocalSource::Explicit(path)),
            None => std::env::current_dir().ok().map(LocalSource::Search),
        };
        Self {
            global: global_config_path(),
            local,
            env_prefix: ENV_PREFIX.to_string(),
            env_source: None,
        }
    }

    /// Store without any default location. Layers are added with the
    /// `with_*` methods.
    pub fn empty() -> Self {
        Self {
            global: None,
            local: None,
            env_prefix: ENV_PREFIX.to_string(),
            env_source: None,
        }
    }

    pub fn with_global(mut self, path: impl Into<PathBuf>) -> Self {
        self.global = Some(path.into());
        self
    }

    pub fn with_local_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local = Some(LocalSource::Search(dir.into()));
        self
    }

    pub fn with_local_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.local = Some(LocalSource::Explicit(path.into()));
        self
    }

    /// Read environment overrides from `vars` instead of the process environment.
    pub fn with_env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Apply `LANE_*` environment variables as explicit overrides.
    fn apply_env_overrides(&self, mut settings: PersistedConfig) -> ApplicationResult<PersistedConfig> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .source(self.env_source.clone()),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("uri") {
            settings.uri = Some(val);
        }
        if let Ok(val) = config.get_string("keywords") {
            settings.keywords = Some(Keywords::Csv(val));
        }
        if let Ok(val) = config.get_string("notify") {
            settings.notify = Some(Value::String(val));
        }
        if let Ok(val) = config.get_string("continuous") {
            settings.continuous = Some(parse_interval(&val));
        }
        if let Ok(val) = config.get_string("run_every") {
            settings.run_every = Some(parse_interval(&val));
        }

        Ok(settings)
    }
}

impl ConfigStore for LayeredConfigStore {
    #[instrument(level = "debug", skip(self))]
    fn load(&self) -> ApplicationResult<PersistedConfig> {
        let mut current = PersistedConfig::default();

        if let Some(global) = self.global.as_deref().filter(|p| p.is_file()) {
            debug!(path = %global.display(), "loading global config");
            current = merge_layers(current, load_file(global)?);
        }

        let local = match &self.local {
            Some(LocalSource::Explicit(path)) => Some(path.clone()),
            Some(LocalSource::Search(dir)) => local_config_path(dir),
            None => None,
        };
        if let Some(path) = local {
            debug!(path = %path.display(), "loading local config");
            current = merge_layers(current, load_file(&path)?);
        }

        self.apply_env_overrides(current)
    }
}

fn parse_interval(val: &str) -> IntervalSpec {
    match val.parse() {
        Ok(spec) => spec,
        Err(never) => match never {},
    }
}

/// Show the effective configuration as TOML.
pub fn to_toml(config: &PersistedConfig) -> ApplicationResult<String> {
    toml::to_string_pretty(config).map_err(|e| ApplicationError::Config {
        message: format!("serialize config: {e}"),
    })
}

/// Generate a template config file.
pub fn template() -> String {
    r#"# lane configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/lane/config.toml
#   Local:  ./lane.toml or ./config.json (or --config <path>)
#   Env:    LANE_URI, LANE_KEYWORDS, LANE_NOTIFY, LANE_CONTINUOUS, LANE_RUN_EVERY
#
# Command line flags override everything here.

# Page to watch (used when no url is given on the command line)
# uri = "https://example.com"

# Keywords to look for: comma separated string or list
# keywords = ["release", "sold out"]

# Notification target, passed to the engine as is
# notify = "desktop"

# Repeat the check: milliseconds or a shorthand like "5m" or "1h"
# continuous = "5m"

# Any other key is passed on to the engine unchanged
"#
    .to_string()
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_overlay_with_some_keys_when_merging_then_only_those_replace_base() {
        let base = PersistedConfig {
            uri: Some("https://base.example".into()),
            keywords: Some(Keywords::Csv("a".into())),
            extra: [("timeout".to_string(), Value::from(10))].into(),
            ..Default::default()
        };
        let overlay = PersistedConfig {
            keywords: Some(Keywords::List(vec!["b".into()])),
            extra: [("agent".to_string(), Value::from("lane"))].into(),
            ..Default::default()
        };

        let merged = merge_layers(base, overlay);

        assert_eq!(merged.uri.as_deref(), Some("https://base.example"));
        assert_eq!(merged.keywords, Some(Keywords::List(vec!["b".into()])));
        assert_eq!(merged.extra.len(), 2);
    }

    #[test]
    fn given_env_source_when_loading_then_overrides_apply() {
        let vars: HashMap<String, String> = [
            ("LANE_KEYWORDS".to_string(), "x, y".to_string()),
            ("LANE_CONTINUOUS".to_string(), "30000".to_string()),
        ]
        .into();
        let store = LayeredConfigStore::empty().with_env_source(vars);

        let config = store.load().expect("load");

        assert_eq!(config.keywords, Some(Keywords::Csv("x, y".into())));
        assert_eq!(config.continuous, Some(IntervalSpec::Millis(30_000)));
        assert_eq!(config.uri, None);
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_empty_config() {
        let parsed: PersistedConfig = toml::from_str(&template()).expect("template parses");
        assert_eq!(parsed, PersistedConfig::default());
    }
}
