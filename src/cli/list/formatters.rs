use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::templates::{Template, TemplateKind};

/// Output templates as a JSON array.
pub fn output_json(items: &[Template]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(items)?);
    Ok(())
}

/// Output templates as an aligned, colored listing.
pub fn output_text(items: &[Template], templates_dir: &Path, show_paths: bool) {
    if items.is_empty() {
        println!("No templates found in {}", templates_dir.display());
        println!("\n{}", "Tip:".yellow());
        println!("  Run 'newplus init' to create sample templates");
        return;
    }

    println!("{} {}", "Templates in".bold(), templates_dir.display().to_string().bold());
    println!();

    let width = items.iter().map(|t| t.display_name.chars().count()).max().unwrap_or(0);
    for item in items {
        let name = format!("{:<width$}", item.display_name);
        let name = match item.kind {
            TemplateKind::File => name.cyan(),
            TemplateKind::Folder => name.blue().bold(),
        };
        let origin = if show_paths {
            item.path.display().to_string()
        } else {
            item.name.clone()
        };
        println!("  {}  {:<6}  {}", name, item.kind.to_string(), origin.dimmed());
    }

    println!();
    let noun = if items.len() == 1 { "template" } else { "templates" };
    println!("{}: {} {}", "Total".green().bold(), items.len(), noun);
}
