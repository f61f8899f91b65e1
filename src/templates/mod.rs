//! Template discovery and materialization.
//!
//! A template is any top-level entry of the templates directory: a single
//! file, or a folder whose whole tree is copied. Text content (and, when
//! enabled, file and folder names) goes through `$NAME$` substitution on the
//! way out.
//!
//! ```text
//! ~/.newplus/templates/
//! ├── 01. Readme.md          -> File template "Readme.md"
//! ├── 02. Rust crate/        -> Folder template "Rust crate"
//! │   ├── Cargo.toml
//! │   └── src/main.rs
//! └── .git/                  -> skipped (hidden)
//! ```

pub mod discovery;
pub mod materialize;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub use discovery::{DiscoveryOptions, discover, find_template};
pub use materialize::{MaterializeOptions, MaterializeReport, Materializer};

/// Whether a template is a single file or a folder tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    File,
    Folder,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Folder => f.write_str("folder"),
        }
    }
}

/// A discovered template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    /// File name of the entry in the templates directory, lossily decoded.
    ///
    /// `path` keeps the exact name; created items use that when no name is given.
    pub name: String,
    /// Name shown to the user after display rules are applied.
    pub display_name: String,
    /// Full path of the entry.
    pub path: PathBuf,
    pub kind: TemplateKind,
}

impl Template {
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == TemplateKind::Folder
    }

    /// The default name of the created item: the template's file name,
    /// optionally without its ordering digits.
    #[must_use]
    pub fn default_target_name(&self, strip_starting_digits: bool) -> String {
        if strip_starting_digits {
            discovery::strip_starting_digits(&self.name).to_string()
        } else {
            self.name.clone()
        }
    }
}
