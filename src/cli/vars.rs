//! Show the variables available to templates.
//!
//! Lists the built-in variables with their current values and the
//! `[variables]` table of the config file. Per-operation variables such as
//! `FILE_NAME` only exist while a template is materialized and are listed
//! without values.
//!
//! ```bash
//! newplus vars
//! newplus vars --resolve --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{CommandContext, OutputFormat};
use crate::variables::context::{FILE_BASENAME, FILE_NAME, TARGET_DIR, TARGET_PATH, TEMPLATE_NAME};
use crate::variables::{BUILTIN_NAMES, resolve};

const CONTEXT_NAMES: &[&str] = &[TARGET_DIR, TARGET_PATH, TEMPLATE_NAME, FILE_NAME, FILE_BASENAME];

/// Command to print the variable table.
#[derive(Args, Debug)]
pub struct VarsCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Show configured values with their own $TOKENS$ resolved
    #[arg(long)]
    resolve: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct VariableRow {
    name: String,
    value: Option<String>,
    source: &'static str,
}

impl VarsCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let rows = self.rows(ctx)?;
        match self.format {
            OutputFormat::Json => {
                let map: BTreeMap<&str, Option<&str>> =
                    rows.iter().map(|r| (r.name.as_str(), r.value.as_deref())).collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            }
            OutputFormat::Text => print_rows(&rows),
        }
        Ok(())
    }

    fn rows(&self, ctx: &CommandContext) -> Result<Vec<VariableRow>> {
        let merged = ctx.base_variables()?.build();
        let mut rows = Vec::new();

        for name in BUILTIN_NAMES {
            // config may shadow a built-in
            if ctx.config.variables.contains_key(*name) {
                continue;
            }
            rows.push(VariableRow {
                name: (*name).to_string(),
                value: merged.get(*name).cloned(),
                source: "builtin",
            });
        }

        for name in CONTEXT_NAMES {
            rows.push(VariableRow {
                name: (*name).to_string(),
                value: None,
                source: "context",
            });
        }

        for (name, raw) in &ctx.config.variables {
            let value = if self.resolve { resolve(raw, &merged) } else { raw.clone() };
            rows.push(VariableRow {
                name: name.clone(),
                value: Some(value),
                source: "config",
            });
        }

        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

fn print_rows(rows: &[VariableRow]) {
    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for row in rows {
        let value = match &row.value {
            Some(v) => v.normal(),
            None => "(set per operation)".dimmed(),
        };
        println!(
            "  {}  {:<7}  {}",
            format!("${:<width$}$", row.name, width = width).cyan(),
            row.source.dimmed(),
            value
        );
    }
}
