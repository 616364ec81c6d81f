//! User settings
//!
//! Read from ~/.sqlpane/config.toml. Every field has a default, so a missing
//! file or a partial one is fine.

use crate::config::ConnectionConfig;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Width of the schema pane in columns
    #[serde(default = "default_tree_width")]
    pub tree_width: u16,

    #[serde(default = "default_true")]
    pub syntax_highlighting: bool,

    /// Default tracing filter; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_tree_width() -> u16 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_width: default_tree_width(),
            syntax_highlighting: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    fn validate(self) -> ConfigResult<Self> {
        if self.tree_width < 10 {
            return Err(ConfigError::Invalid(format!(
                "tree_width must be at least 10, got {}",
                self.tree_width
            )));
        }
        Ok(self)
    }
}

/// Load settings from ~/.sqlpane/config.toml
pub fn load_settings() -> ConfigResult<Settings> {
    load_settings_from(&ConnectionConfig::config_dir()?.join("config.toml"))
}

/// Load settings from `path`, falling back to defaults when it is absent
pub fn load_settings_from(path: &Path) -> ConfigResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::NotFound(format!("{}: {}", path.display(), e)))?;
    let settings: Settings = toml::from_str(&content)?;
    settings.validate()
}
