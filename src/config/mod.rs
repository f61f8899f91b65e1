//! Configuration loading and persistence.
//!
//! See [`global`] for the file format and location rules.

pub mod global;

pub use global::{DEFAULT_TEMPLATES_DIR, GlobalConfig, OPTION_KEYS};
