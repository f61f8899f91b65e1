//! Inspect and change the newplus configuration file.
//!
//! The config file (`~/.newplus/config.toml` by default) holds display
//! options, the templates directory, and user variables that every template
//! can reference.
//!
//! # Examples
//!
//! ```bash
//! newplus config                  # same as `config show`
//! newplus config path
//! newplus config set hide_file_extensions true
//! newplus config set templates_dir ~/Templates
//! newplus config set-var AUTHOR "Jane Doe"
//! newplus config unset-var AUTHOR
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use super::CliConfig;
use crate::config::GlobalConfig;

/// Command to manage the configuration file.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommands {
    /// Print the config file location
    Path,

    /// Show the effective configuration (default)
    Show,

    /// Set an option (templates_dir, replace_variables_in_filenames,
    /// hide_file_extensions, hide_starting_digits, show_hidden)
    Set {
        key: String,
        value: String,
    },

    /// Define or replace a user variable
    SetVar {
        name: String,
        value: String,
    },

    /// Remove a user variable
    UnsetVar {
        name: String,
    },
}

impl ConfigCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let path = cli.config_path()?;
        match self.command {
            Some(ConfigSubcommands::Path) => {
                println!("{}", path.display());
                Ok(())
            }
            Some(ConfigSubcommands::Show) | None => Self::show(&path).await,
            Some(ConfigSubcommands::Set {
                key,
                value,
            }) => Self::set(&path, &key, &value, cli.quiet).await,
            Some(ConfigSubcommands::SetVar {
                name,
                value,
            }) => Self::set_var(&path, name, value, cli.quiet).await,
            Some(ConfigSubcommands::UnsetVar {
                name,
            }) => Self::unset_var(&path, &name, cli.quiet).await,
        }
    }

    async fn show(path: &Path) -> Result<()> {
        let config = GlobalConfig::load_or_default(path).await?;

        println!("{}", "Configuration".bold());
        if path.exists() {
            println!("Location: {}\n", path.display());
        } else {
            let note = "(not created, showing defaults)".dimmed();
            println!("Location: {} {}\n", path.display(), note);
        }
        println!("{}", toml::to_string_pretty(&config)?);

        if config.variables.is_empty() {
            println!("{}", "Tip:".yellow());
            println!("  Add a variable with: newplus config set-var AUTHOR \"Your Name\"");
        }
        Ok(())
    }

    async fn set(path: &Path, key: &str, value: &str, quiet: bool) -> Result<()> {
        let mut config = GlobalConfig::load_or_default(path).await?;
        config.set_option(key, value)?;
        config.save_to(path).await?;

        if !quiet {
            println!("✅ Set {} = {}", key.cyan(), value);
        }
        Ok(())
    }

    async fn set_var(path: &Path, name: String, value: String, quiet: bool) -> Result<()> {
        let mut config = GlobalConfig::load_or_default(path).await?;
        let replaced = config.variables.contains_key(&name);
        let shown = format!("${name}$");
        config.set_variable(name, value.clone())?;
        config.save_to(path).await?;

        if !quiet {
            let verb = if replaced { "Updated" } else { "Added" };
            println!("✅ {verb} variable {} = {}", shown.green(), value);
        }
        Ok(())
    }

    async fn unset_var(path: &Path, name: &str, quiet: bool) -> Result<()> {
        let mut config = GlobalConfig::load_or_default(path).await?;
        if config.remove_variable(name) {
            config.save_to(path).await?;
            if !quiet {
                println!("✅ Removed variable {}", format!("${name}$").red());
            }
        } else if !quiet {
            println!("❌ Variable '{name}' is not defined in {}", path.display());
        }
        Ok(())
    }
}
