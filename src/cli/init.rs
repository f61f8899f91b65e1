//! Create the templates directory with sample templates.
//!
//! `init` makes the configured templates directory, seeds it with a few
//! sample templates, and writes a starter config file if none exists.
//!
//! # Examples
//!
//! ```bash
//! newplus init
//! newplus init --templates-dir ~/Templates
//! newplus init --force   # rewrite samples and config
//! ```
//!
//! # Samples
//!
//! ```text
//! 01. Readme.md
//! 02. Notes.txt
//! 03. Project/
//!     README.md
//!     $FILE_NAME$.code-workspace
//! ```
//!
//! # Safety
//!
//! Existing files are left untouched unless `--force` is given.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::CliConfig;
use crate::config::GlobalConfig;
use crate::utils::fs::{ensure_dir, safe_write};

const SAMPLES: &[(&str, &str)] = &[
    ("01. Readme.md", "# $FILE_BASENAME$\n\nCreated by $AUTHOR$ on $DATE$.\n"),
    ("02. Notes.txt", "Notes - $DATE$ $TIME$\n\n"),
    (
        "03. Project/README.md",
        "# $FILE_NAME$\n\nAuthor: $AUTHOR$\nCreated: $DATETIME$ on $PLATFORM$\n",
    ),
    (
        "03. Project/$FILE_NAME$.code-workspace",
        "{\n  \"folders\": [{ \"path\": \".\" }]\n}\n",
    ),
];

/// Command to set up the templates directory and config.
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Overwrite existing samples and config
    #[arg(short, long)]
    force: bool,

    /// Only create the directory, without sample templates
    #[arg(long)]
    no_samples: bool,
}

impl InitCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config_path = cli.config_path()?;
        let existing = config_path.exists();
        let config = if existing && !self.force {
            GlobalConfig::load_from(&config_path).await?
        } else {
            GlobalConfig::init_example()
        };

        let templates_dir = match &cli.templates_dir {
            Some(dir) => dir.clone(),
            None => config.templates_dir()?,
        };

        ensure_dir(&templates_dir)?;
        let written = if self.no_samples {
            0
        } else {
            self.write_samples(&templates_dir)?
        };

        let config_written = !existing || self.force;
        if config_written {
            config.save_to(&config_path).await?;
        }

        if !cli.quiet {
            println!("✅ Templates directory: {}", templates_dir.display().to_string().green());
            if written > 0 {
                println!("   Added {written} sample template files");
            }
            if config_written {
                println!("✅ Wrote config: {}", config_path.display());
            } else {
                println!("   Kept existing config: {}", config_path.display());
            }
            println!("\n{}", "Next steps:".cyan());
            println!("  {}  see what's available", "newplus list".bright_white());
            println!("  {}  create one here", "newplus new Readme.md".bright_white());
        }
        Ok(())
    }

    fn write_samples(&self, dir: &Path) -> Result<usize> {
        let mut written = 0;
        for (relative, content) in SAMPLES {
            let path = dir.join(relative);
            if path.exists() && !self.force {
                tracing::debug!("Keeping existing sample {}", path.display());
                continue;
            }
            safe_write(&path, content)?;
            written += 1;
        }
        Ok(written)
    }
}
