//! User configuration for newplus.
//!
//! The configuration file lives at `~/.newplus/config.toml`
//! (`%LOCALAPPDATA%\newplus\config.toml` on Windows). Its location can be
//! overridden with `--config` or the `NEWPLUS_CONFIG` environment variable.
//! A missing file is not an error; defaults are used instead.
//!
//! # File Format
//!
//! ```toml
//! # Where templates are discovered (supports ~ and $VARS)
//! templates_dir = "~/.newplus/templates"
//!
//! # Resolve $NAME$ tokens in created file and folder names
//! replace_variables_in_filenames = true
//!
//! # Display options for `newplus list`
//! hide_file_extensions = false
//! hide_starting_digits = true
//! show_hidden = false
//!
//! # Extra variables available to every template
//! [variables]
//! AUTHOR = "Jane Doe"
//! COMPANY = "Acme"
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use newplus_cli::config::GlobalConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let path = GlobalConfig::default_path()?;
//! let mut config = GlobalConfig::load_or_default(&path).await?;
//! config.set_variable("AUTHOR", "Jane Doe")?;
//! config.save_to(&path).await?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::NewPlusError;
use crate::templates::DiscoveryOptions;
use crate::utils::platform::resolve_path;
use crate::variables::is_valid_variable_name;

/// Default templates directory, before `~` expansion.
pub const DEFAULT_TEMPLATES_DIR: &str = "~/.newplus/templates";

/// Keys accepted by [`GlobalConfig::set_option`].
pub const OPTION_KEYS: &[&str] = &[
    "templates_dir",
    "replace_variables_in_filenames",
    "hide_file_extensions",
    "hide_starting_digits",
    "show_hidden",
];

fn default_templates_dir() -> String {
    DEFAULT_TEMPLATES_DIR.to_string()
}

const fn default_true() -> bool {
    true
}

/// Persistent user configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Directory scanned for templates. Tilde and environment references are expanded.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Whether `$NAME$` tokens in file and folder names are resolved.
    #[serde(default = "default_true")]
    pub replace_variables_in_filenames: bool,

    /// Hide file extensions in template display names.
    #[serde(default)]
    pub hide_file_extensions: bool,

    /// Strip leading ordering digits (`01. `, `2 - `) from display names.
    #[serde(default = "default_true")]
    pub hide_starting_digits: bool,

    /// Include dot-prefixed entries of the templates directory.
    #[serde(default)]
    pub show_hidden: bool,

    /// User-defined variables, layered over the built-ins.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            replace_variables_in_filenames: true,
            hide_file_extensions: false,
            hide_starting_digits: true,
            show_hidden: false,
            variables: BTreeMap::new(),
        }
    }
}

impl GlobalConfig {
    /// Load from `path`, or return defaults if the file does not exist.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path).await
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load and validate the configuration at `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;

        tracing::debug!(
            "Loaded config from {} ({} user variables)",
            path.display(),
            config.variables.len()
        );
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Platform default location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("newplus")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".newplus")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// The templates directory with `~` and environment references expanded.
    pub fn templates_dir(&self) -> Result<PathBuf> {
        resolve_path(&self.templates_dir)
    }

    /// Discovery options derived from the display settings.
    #[must_use]
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            show_hidden: self.show_hidden,
            hide_file_extensions: self.hide_file_extensions,
            hide_starting_digits: self.hide_starting_digits,
        }
    }

    /// Check that every user variable has a usable name.
    pub fn validate(&self) -> Result<(), NewPlusError> {
        if let Some(bad) = self.variables.keys().find(|k| !is_valid_variable_name(k)) {
            return Err(NewPlusError::ConfigError {
                message: format!(
                    "variable '{bad}' in [variables] is not a valid name \
                     (expected [A-Z_][A-Z0-9_]*)"
                ),
            });
        }
        Ok(())
    }

    /// Add or replace a user variable.
    pub fn set_variable(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), NewPlusError> {
        let name = name.into();
        if !is_valid_variable_name(&name) {
            return Err(NewPlusError::InvalidVariableName {
                name,
            });
        }
        self.variables.insert(name, value.into());
        Ok(())
    }

    /// Remove a user variable. Returns whether it existed.
    pub fn remove_variable(&mut self, name: &str) -> bool {
        self.variables.remove(name).is_some()
    }

    /// Set one of the scalar options listed in [`OPTION_KEYS`] from text.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), NewPlusError> {
        match key {
            "templates_dir" => {
                if value.trim().is_empty() {
                    return Err(NewPlusError::ConfigError {
                        message: "templates_dir cannot be empty".to_string(),
                    });
                }
                self.templates_dir = value.to_string();
            }
            "replace_variables_in_filenames" => {
                self.replace_variables_in_filenames = parse_bool(key, value)?;
            }
            "hide_file_extensions" => self.hide_file_extensions = parse_bool(key, value)?,
            "hide_starting_digits" => self.hide_starting_digits = parse_bool(key, value)?,
            "show_hidden" => self.show_hidden = parse_bool(key, value)?,
            _ => {
                return Err(NewPlusError::ConfigError {
                    message: format!(
                        "unknown option '{key}' (expected one of: {})",
                        OPTION_KEYS.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }

    /// A starter configuration written by `newplus init`.
    #[must_use]
    pub fn init_example() -> Self {
        let mut config = Self::default();
        config.variables.insert("AUTHOR".to_string(), "$USER$".to_string());
        config
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, NewPlusError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(NewPlusError::ConfigError {
            message: format!("option '{key}' expects true or false, got '{value}'"),
        }),
    }
}
