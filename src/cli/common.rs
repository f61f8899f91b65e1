//! Common context and helpers for CLI commands

use anyhow::Result;
use clap::ValueEnum;
use std::path::PathBuf;

use super::CliConfig;
use crate::config::GlobalConfig;
use crate::templates::{DiscoveryOptions, Template, discover};
use crate::variables::VariableSet;

/// Output format for commands that print structured data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// Everything a command needs after global flags and the config file are applied.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// The loaded (or default) configuration
    pub config: GlobalConfig,
    /// Where the configuration lives, whether or not it exists yet
    pub config_path: PathBuf,
    /// Templates directory after flag, env, and config precedence
    pub templates_dir: PathBuf,
    pub show_progress: bool,
    pub quiet: bool,
}

impl CommandContext {
    /// Load the configuration selected by `cli` and resolve the templates directory.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed, or if
    /// no config location can be determined.
    pub async fn load(cli: &CliConfig) -> Result<Self> {
        let config_path = cli.config_path()?;
        let config = GlobalConfig::load_or_default(&config_path).await?;

        let templates_dir = match &cli.templates_dir {
            Some(dir) => dir.clone(),
            None => config.templates_dir()?,
        };
        tracing::debug!("Using templates directory {}", templates_dir.display());

        Ok(Self {
            config,
            config_path,
            templates_dir,
            show_progress: !cli.no_progress && !cli.quiet,
            quiet: cli.quiet,
        })
    }

    #[must_use]
    pub fn discovery_options(&self) -> DiscoveryOptions {
        self.config.discovery_options()
    }

    /// Discover the templates in the effective templates directory.
    pub fn templates(&self) -> Result<Vec<Template>> {
        discover(&self.templates_dir, &self.discovery_options())
    }

    /// Built-in variables layered with the `[variables]` table of the config.
    ///
    /// # Errors
    /// Returns an error if a configured variable has an invalid name.
    pub fn base_variables(&self) -> Result<VariableSet> {
        Ok(VariableSet::new().with_user_variables(&self.config.variables)?)
    }
}
