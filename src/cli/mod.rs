//! Command-line interface for newplus.
//!
//! Each subcommand lives in its own module with a clap `Args` struct and an
//! async `execute` method taking the shared [`CommandContext`].
//!
//! # Available Commands
//!
//! - `list` - List templates in the templates directory
//! - `new` - Create a file or folder from a template
//! - `render` - Resolve `$NAME$` tokens in a file or stdin
//! - `vars` - Show the variables available to templates
//! - `init` - Create the templates directory and a starter config
//! - `config` - Inspect and change the configuration file
//!
//! # Examples
//!
//! ```bash
//! newplus init
//! newplus list
//! newplus new Readme.md ./docs --name CHANGELOG --var VERSION=1.2.0
//! echo 'Built $DATE$' | newplus render
//! newplus config set-var AUTHOR "Jane Doe"
//! ```
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - Log level (`RUST_LOG` takes precedence)
//! - `--config` - Path to the config file (`NEWPLUS_CONFIG`)
//! - `--templates-dir` - Override the templates directory (`NEWPLUS_TEMPLATES_DIR`)
//! - `--no-progress` - Disable progress bars (`NEWPLUS_NO_PROGRESS`)

pub mod common;
mod config;
mod init;
mod list;
mod new;
mod render;
mod vars;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use common::{CommandContext, OutputFormat};

use crate::config::GlobalConfig;
use crate::utils::platform::resolve_path;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests and library users can run commands
/// against an isolated config file and templates directory.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Filter directive for the log subscriber when `RUST_LOG` is unset.
    pub log_level: String,
    /// Disable progress bars.
    pub no_progress: bool,
    /// Suppress informational output.
    pub quiet: bool,
    /// Explicit config file location.
    pub config_path: Option<PathBuf>,
    /// Explicit templates directory, taking precedence over the config file.
    pub templates_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            no_progress: false,
            quiet: false,
            config_path: None,
            templates_dir: None,
        }
    }
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The config file to use: the explicit path, else the platform default.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => GlobalConfig::default_path(),
        }
    }
}

/// Create files and folders from templates with `$VARIABLE$` substitution
#[derive(Parser, Debug)]
#[command(
    name = "newplus",
    about = "Create files and folders from templates with $VARIABLE$ substitution",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file
    #[arg(long, global = true, env = "NEWPLUS_CONFIG", value_name = "PATH")]
    config: Option<String>,

    /// Templates directory, overriding the config file
    #[arg(long, global = true, env = "NEWPLUS_TEMPLATES_DIR", value_name = "PATH")]
    templates_dir: Option<String>,

    /// Disable progress bars
    #[arg(long, global = true, env = "NEWPLUS_NO_PROGRESS")]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available templates
    #[command(visible_alias = "ls")]
    List(list::ListCommand),

    /// Create a file or folder from a template
    New(new::NewCommand),

    /// Resolve variables in a file or stdin and print the result
    Render(render::RenderCommand),

    /// Show the variables available to templates
    Vars(vars::VarsCommand),

    /// Create the templates directory with sample templates
    Init(init::InitCommand),

    /// Inspect and change the configuration file
    Config(config::ConfigCommand),
}

impl Cli {
    /// Translate the global flags into a [`CliConfig`].
    ///
    /// `--config` and `--templates-dir` go through `~` and `$VAR` expansion.
    ///
    /// ```rust
    /// use clap::Parser;
    /// use newplus_cli::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["newplus", "--verbose", "list"]);
    /// assert_eq!(cli.build_config().log_level, "debug");
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            no_progress: self.no_progress,
            quiet: self.quiet,
            config_path: self.config.as_deref().map(expand_or_raw),
            templates_dir: self.templates_dir.as_deref().map(expand_or_raw),
        }
    }

    /// Run the command with flags taken from the command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Run the command with an explicit [`CliConfig`].
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            // these work on a config file that may not parse yet
            Commands::Init(cmd) => cmd.execute(&config).await,
            Commands::Config(cmd) => cmd.execute(&config).await,
            Commands::List(cmd) => cmd.execute(&CommandContext::load(&config).await?).await,
            Commands::New(cmd) => cmd.execute(&CommandContext::load(&config).await?).await,
            Commands::Render(cmd) => cmd.execute(&CommandContext::load(&config).await?).await,
            Commands::Vars(cmd) => cmd.execute(&CommandContext::load(&config).await?).await,
        }
    }
}

fn expand_or_raw(path: &str) -> PathBuf {
    resolve_path(path).unwrap_or_else(|_| PathBuf::from(path))
}
