//! Resolve `$NAME$` tokens in a file or stdin and print the result.
//!
//! ```bash
//! newplus render header.txt --var PROJECT=demo
//! echo 'Today is $DATE$' | newplus render
//! newplus render config.in --strict > config
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use super::CommandContext;
use crate::core::NewPlusError;
use crate::variables::{VariableSet, parse_assignment, resolve_with_report};

/// Command to resolve variables in text.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// File to render; reads stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Set a variable, overriding built-ins and config (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    vars: Vec<(String, String)>,

    /// Only use variables from the config file and --var
    #[arg(long)]
    no_builtins: bool,

    /// Fail if any $TOKEN$ is left unresolved
    #[arg(long)]
    strict: bool,
}

impl RenderCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let input = self.read_input().await?;
        let output = self.render(ctx, &input)?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes()).context("Failed to write to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
        Ok(())
    }

    fn render(&self, ctx: &CommandContext, input: &str) -> Result<String> {
        let base = if self.no_builtins {
            VariableSet::empty()
        } else {
            VariableSet::new()
        };
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let variables = base
            .with_target_dir(&cwd)
            .with_user_variables(&ctx.config.variables)?
            .with_overrides(self.vars.iter().cloned())?
            .build();

        let resolution = resolve_with_report(input, &variables);
        if !resolution.cycles.is_empty() {
            tracing::warn!(
                "Self-referencing variables left as written: {}",
                resolution.cycles.join(", ")
            );
        }
        if !resolution.unresolved.is_empty() {
            if self.strict {
                return Err(NewPlusError::UnresolvedVariables {
                    names: resolution.unresolved,
                }
                .into());
            }
            tracing::warn!("Unresolved variables: {}", resolution.unresolved.join(", "));
        }
        Ok(resolution.text)
    }

    async fn read_input(&self) -> Result<String> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            _ => {
                let mut input = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut input)
                    .await
                    .context("Failed to read stdin")?;
                Ok(input)
            }
        }
    }
}
