//! List the templates in the templates directory.
//!
//! # Examples
//!
//! ```bash
//! newplus list
//! newplus list --folders
//! newplus list --format json
//! ```
//!
//! # Output
//!
//! ```text
//! Templates in /home/jane/.newplus/templates
//!
//!   Readme.md      file    01. Readme.md
//!   Rust crate     folder  02. Rust crate
//!
//! Total: 2 templates
//! ```

mod formatters;

use anyhow::Result;
use clap::Args;

use super::{CommandContext, OutputFormat};
use crate::templates::{Template, TemplateKind};

/// Command to list available templates.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Show only file templates
    #[arg(long, conflicts_with = "folders")]
    files: bool,

    /// Show only folder templates
    #[arg(long)]
    folders: bool,

    /// Show the full path of each template
    #[arg(long)]
    paths: bool,
}

impl ListCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let templates = ctx.templates()?;
        let items = self.filter(templates);

        match self.format {
            OutputFormat::Json => formatters::output_json(&items),
            OutputFormat::Text => {
                formatters::output_text(&items, &ctx.templates_dir, self.paths);
                Ok(())
            }
        }
    }

    fn filter(&self, templates: Vec<Template>) -> Vec<Template> {
        templates
            .into_iter()
            .filter(|t| match t.kind {
                TemplateKind::File => !self.folders,
                TemplateKind::Folder => !self.files,
            })
            .collect()
    }
}
