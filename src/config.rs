//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/votenav/votenav.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `VOTENAV_*` prefix
//!
//! The `--tree-file` CLI flag is applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_path;

/// Unified configuration for votenav.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// TOML tree file to load instead of the built-in questionnaire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_file: Option<PathBuf>,
    /// Print outcome ids when a terminal node is reached
    pub show_outcome_ids: bool,
    /// Height of the interactive selector (skim syntax, e.g. "50%" or "20")
    pub selector_height: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_file: None,
            show_outcome_ids: true,
            selector_height: "50%".to_string(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub show_outcome_ids: Option<bool>,
    pub selector_height: Option<String>,
}

/// Get the XDG config directory for votenav.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "votenav").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("votenav.toml"))
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
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_file: overlay
                .tree_file
                .clone()
                .or_else(|| self.tree_file.clone()),
            show_outcome_ids: overlay.show_outcome_ids.unwrap_or(self.show_outcome_ids),
            selector_height: overlay
                .selector_height
                .clone()
                .unwrap_or_else(|| self.selector_height.clone()),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the tree file path.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.tree_file {
            self.tree_file = Some(expand_path(path));
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), config_file)
    }

    /// Load with an explicit global config location (None skips it).
    pub fn load_from(
        global: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply VOTENAV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("VOTENAV")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("show_outcome_ids") {
            settings.show_outcome_ids = val;
        }
        if let Ok(val) = config.get_string("selector_height") {
            settings.selector_height = val;
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
        r#"# votenav configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/votenav/votenav.toml
#   File:   votenav --config <path>
#   Env:    VOTENAV_* environment variables (e.g. VOTENAV_TREE_FILE)
#   Flag:   votenav --tree-file <path>

# TOML decision tree to use instead of the built-in questionnaire
# tree_file = "~/trees/voters.toml"

# Print the outcome id when a final answer is reached
# show_outcome_ids = true

# Height of the interactive selector
# selector_height = "50%"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
