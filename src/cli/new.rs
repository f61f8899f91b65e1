//! Create a file or folder from a template.
//!
//! # Examples
//!
//! ```bash
//! # Create ./Readme.md from the "Readme.md" template
//! newplus new Readme.md
//!
//! # Create ./docs/CHANGELOG.md, extension inherited from the template
//! newplus new Readme.md docs --name CHANGELOG
//!
//! # Folder template with extra variables
//! newplus new "Rust crate" --name '$PROJECT$' --var PROJECT=demo
//!
//! # Show what would be created
//! newplus new "Rust crate" --dry-run
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::CommandContext;
use crate::templates::{MaterializeOptions, MaterializeReport, Materializer, find_template};
use crate::variables::parse_assignment;

/// Command to materialize a template.
#[derive(Args, Debug)]
pub struct NewCommand {
    /// Template file name or display name
    template: String,

    /// Directory to create the item in
    #[arg(default_value = ".")]
    dest: PathBuf,

    /// Name of the created file or folder (may contain $VARIABLES$)
    #[arg(short, long)]
    name: Option<String>,

    /// Set a variable, overriding built-ins and config (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    vars: Vec<(String, String)>,

    /// Replace the target if it already exists
    #[arg(short, long)]
    force: bool,

    /// Keep $VARIABLES$ in file and folder names as written
    #[arg(long)]
    no_filename_vars: bool,

    /// Show what would be created without writing anything
    #[arg(long)]
    dry_run: bool,
}

impl NewCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let templates = ctx.templates()?;
        let template = find_template(&templates, &self.template)?;

        let dest: PathBuf = if self.dest.is_absolute() {
            self.dest.clone()
        } else {
            std::env::current_dir()
                .context("Failed to determine current directory")?
                .join(&self.dest)
        }
        // drops `.` components
        .components()
        .collect();

        let variables = ctx
            .base_variables()?
            .with_target_dir(&dest)
            .with_template_name(&template.display_name)
            .with_overrides(self.vars.iter().cloned())?;

        let options = MaterializeOptions {
            replace_in_filenames: ctx.config.replace_variables_in_filenames
                && !self.no_filename_vars,
            strip_starting_digits: ctx.config.hide_starting_digits,
            overwrite: self.force,
            dry_run: self.dry_run,
            show_progress: ctx.show_progress,
        };

        let report = Materializer::new(options)
            .materialize(template, &dest, self.name.as_deref(), variables)
            .await?;

        if !ctx.quiet {
            print_report(&report);
        }
        Ok(())
    }
}

fn print_report(report: &MaterializeReport) {
    if report.dry_run {
        println!("{} {}", "Would create".yellow().bold(), report.target.display());
        for dir in &report.directories {
            println!("  {} {}/", "dir ".dimmed(), dir.display());
        }
        for file in &report.files {
            println!("  {} {}", "file".dimmed(), file.display());
        }
    } else {
        println!("✅ Created {}", report.target.display().to_string().green());
        if report.files.len() > 1 {
            println!(
                "   {} files, {} with substitutions",
                report.files.len(),
                report.substituted
            );
        }
    }

    if !report.unresolved.is_empty() {
        println!(
            "{} unresolved variables left as written: {}",
            "⚠️ ".yellow(),
            report.unresolved.join(", ").yellow()
        );
        println!("   Define them with --var NAME=VALUE or 'newplus config set-var'");
    }
}
