//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/avltrace/avltrace.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `AVLTRACE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// How trees and traces are rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Append `h:<height>` to node labels
    pub show_height: bool,
    /// Append `b:<balance>` to node labels
    pub show_balance: bool,
    /// Print a before/after sketch for every rotation
    pub diagrams: bool,
    /// Colored terminal output
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_height: true,
            show_balance: true,
            diagrams: true,
            color: true,
        }
    }
}

/// Raw display config for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub show_height: Option<bool>,
    pub show_balance: Option<bool>,
    pub diagrams: Option<bool>,
    pub color: Option<bool>,
}

impl DisplayConfig {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawDisplayConfig) -> Self {
        Self {
            show_height: overlay.show_height.unwrap_or(self.show_height),
            show_balance: overlay.show_balance.unwrap_or(self.show_balance),
            diagrams: overlay.diagrams.unwrap_or(self.diagrams),
            color: overlay.color.unwrap_or(self.color),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub log_capacity: Option<usize>,
    pub display: RawDisplayConfig,
}

/// Effective settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Number of entries kept in the event log
    pub log_capacity: usize,
    pub display: DisplayConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_capacity: 20,
            display: DisplayConfig::default(),
        }
    }
}

/// Get the XDG config directory for avltrace.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "avltrace").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("avltrace.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            log_capacity: overlay.log_capacity.unwrap_or(self.log_capacity),
            display: self.display.merge(&overlay.display),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = explicit {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Load from a single file on top of the defaults, ignoring global config and env.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Apply AVLTRACE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("AVLTRACE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<usize>("log_capacity") {
            settings.log_capacity = val;
        }
        if let Ok(val) = config.get_bool("display.show_height") {
            settings.display.show_height = val;
        }
        if let Ok(val) = config.get_bool("display.show_balance") {
            settings.display.show_balance = val;
        }
        if let Ok(val) = config.get_bool("display.diagrams") {
            settings.display.diagrams = val;
        }
        if let Ok(val) = config.get_bool("display.color") {
            settings.display.color = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# avltrace configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/avltrace/avltrace.toml
#   Explicit: --config <FILE>
#   Env:      AVLTRACE_* environment variables, e.g. AVLTRACE_DISPLAY__DIAGRAMS=false

# Entries kept in the event log (--log)
# log_capacity = 20

[display]
# Show cached subtree height next to each node
# show_height = true

# Show balance factor next to each node
# show_balance = true

# Print a before/after sketch for every rotation
# diagrams = true

# Colored output (NO_COLOR is respected as well)
# color = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
