//! Test utilities for newplus
//!
//! Helpers for writing tests against isolated templates directories and
//! config files, plus opt-in logging.
//!
//! # Example
//!
//! ```rust,ignore
//! use newplus_cli::test_utils::TestEnvironment;
//!
//! let env = TestEnvironment::with_samples().unwrap();
//! assert!(env.templates_dir.join("01. Readme.md").exists());
//! ```

pub mod builder;

pub use builder::{TestEnvironment, TestEnvironmentBuilder};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize test logging based on `RUST_LOG` or an explicit level.
///
/// Without either, logging stays off so test output is clean.
///
/// ```rust,ignore
/// newplus_cli::test_utils::init_test_logging(None);
/// newplus_cli::test_utils::init_test_logging(Some(tracing::Level::DEBUG));
/// ```
///
/// ```bash
/// RUST_LOG=newplus_cli=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
