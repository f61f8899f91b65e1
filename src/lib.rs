//! newplus - create files and folders from templates
//!
//! A command-line port of the "New+" workflow: keep a directory of template
//! files and folders, pick one, and get a copy in the place you are working,
//! with `$VARIABLE$` tokens in content and names replaced on the way.
//!
//! # Architecture Overview
//!
//! ```text
//! templates dir ──discover──> [Template] ──find_template──> Template
//!                                                              │
//! builtins + context + [variables] + --var ──VariableSet──> Materializer
//!                                                              │
//!                                          resolve (≤10 passes) per file and name
//!                                                              │
//!                                                   target file / folder tree
//! ```
//!
//! # Core Modules
//!
//! - [`variables`] - `$NAME$` resolution, built-in variables, layered variable sets
//! - [`templates`] - Template discovery, lookup, and materialization
//! - [`config`] - The user configuration file (`~/.newplus/config.toml`)
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `newplus` command-line interface
//! - [`utils`] - Atomic writes, path expansion, progress bars
//!
//! # Variable Syntax
//!
//! A token is `$` followed by an upper-case name (`[A-Z_][A-Z0-9_]*`) and a
//! closing `$`. Values may themselves contain tokens; resolution repeats up to
//! ten passes. Unknown tokens and self-referencing chains are left as written.
//!
//! ```rust
//! use newplus_cli::variables::{resolve, VariableMap};
//!
//! let mut vars = VariableMap::new();
//! vars.insert("GREETING".to_string(), "Hello, $NAME$".to_string());
//! vars.insert("NAME".to_string(), "World".to_string());
//!
//! assert_eq!(resolve("$GREETING$!", &vars), "Hello, World!");
//! assert_eq!(resolve("$UNKNOWN$ stays", &vars), "$UNKNOWN$ stays");
//! ```
//!
//! # Built-in Variables
//!
//! `DATE`, `TIME`, `DATETIME`, `YEAR`, `MONTH`, `DAY`, `TIMESTAMP`, `USER`,
//! `HOME`, `PLATFORM`, `UUID`, and `RANDOM`, plus per-operation context such
//! as `TARGET_DIR`, `TEMPLATE_NAME`, `FILE_NAME`, and `FILE_BASENAME`.

pub mod cli;
pub mod config;
pub mod core;
pub mod templates;
pub mod utils;
pub mod variables;

// Test utilities (only available in tests or with the test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
