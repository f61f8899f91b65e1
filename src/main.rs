//! newplus CLI entry point
//!
//! Parses arguments, installs the log subscriber, runs the selected command,
//! and turns failures into a readable message with an exit code of 1.
//!
//! - `list` - List available templates
//! - `new` - Create a file or folder from a template
//! - `render` - Resolve variables in a file or stdin
//! - `vars` - Show the variables a template would see
//! - `init` - Create a templates directory and starter config
//! - `config` - Inspect and edit the configuration file

use anyhow::Result;
use clap::Parser;
use newplus_cli::cli;
use newplus_cli::core::error::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = cli.build_config();

    // RUST_LOG wins over -v / -q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    // only fails when a global subscriber is already installed
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute_with_config(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
