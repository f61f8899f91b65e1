//! One-level discovery of templates in the templates directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use strsim::levenshtein;

use super::{Template, TemplateKind};
use crate::core::NewPlusError;

/// Entries that are never templates, whatever the settings.
const IGNORED_NAMES: &[&str] = &["desktop.ini", "Thumbs.db", ".DS_Store"];

/// Maximum Levenshtein distance, as a percentage of the query length, for
/// a template to be suggested.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Settings controlling which entries are listed and how they are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    pub show_hidden: bool,
    pub hide_file_extensions: bool,
    pub hide_starting_digits: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            hide_file_extensions: false,
            hide_starting_digits: true,
        }
    }
}

/// List the templates directly inside `dir`.
///
/// Only the top level is enumerated; a folder is one template regardless of
/// its contents. Results are sorted case-insensitively by file name, so
/// numeric prefixes such as `01.` control the order.
///
/// # Errors
///
/// - [`NewPlusError::TemplatesDirNotFound`] if `dir` does not exist
/// - [`NewPlusError::FileSystemError`] if `dir` is not a directory
/// - I/O errors while reading the directory
///
/// # Examples
///
/// ```rust,no_run
/// use newplus_cli::templates::{discover, DiscoveryOptions};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// for template in discover(Path::new("templates"), &DiscoveryOptions::default())? {
///     println!("{} ({})", template.display_name, template.kind);
/// }
/// # Ok(())
/// # }
/// ```
pub fn discover(dir: &Path, options: &DiscoveryOptions) -> Result<Vec<Template>> {
    if !dir.exists() {
        return Err(NewPlusError::TemplatesDirNotFound {
            path: dir.display().to_string(),
        }
        .into());
    }
    if !dir.is_dir() {
        return Err(NewPlusError::FileSystemError {
            operation: "templates directory is not a directory".to_string(),
            path: dir.display().to_string(),
        }
        .into());
    }

    let mut templates = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read templates directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if IGNORED_NAMES.contains(&name.as_str()) {
            continue;
        }
        if !options.show_hidden && name.starts_with('.') {
            tracing::trace!("Skipping hidden entry {}", name);
            continue;
        }

        let path = entry.path();
        // fs::metadata follows symlinks; broken links are skipped
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry {}: {}", path.display(), e);
                continue;
            }
        };

        let kind = if metadata.is_dir() {
            TemplateKind::Folder
        } else if metadata.is_file() {
            TemplateKind::File
        } else {
            continue;
        };

        templates.push(Template {
            display_name: display_name(&name, kind, options),
            name,
            path,
            kind,
        });
    }

    templates.sort_by(|a, b| {
        a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.name.cmp(&b.name))
    });

    tracing::debug!("Discovered {} templates in {}", templates.len(), dir.display());
    Ok(templates)
}

/// Compute the name shown for an entry.
#[must_use]
pub fn display_name(name: &str, kind: TemplateKind, options: &DiscoveryOptions) -> String {
    let mut shown = name;
    if options.hide_starting_digits {
        shown = strip_starting_digits(shown);
    }
    if options.hide_file_extensions && kind == TemplateKind::File {
        shown = strip_extension(shown);
    }
    shown.to_string()
}

/// Remove leading ordering characters (digits, spaces, `.`, `-`, `_`).
///
/// Names made only of such characters are returned unchanged, as are names
/// that do not start with a digit.
///
/// ```rust
/// use newplus_cli::templates::discovery::strip_starting_digits;
///
/// assert_eq!(strip_starting_digits("01. Readme.md"), "Readme.md");
/// assert_eq!(strip_starting_digits("2 - Notes"), "Notes");
/// assert_eq!(strip_starting_digits("2025"), "2025");
/// assert_eq!(strip_starting_digits(".env"), ".env");
/// ```
#[must_use]
pub fn strip_starting_digits(name: &str) -> &str {
    if !name.starts_with(|c: char| c.is_ascii_digit()) {
        return name;
    }
    let stripped =
        name.trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, ' ' | '.' | '-' | '_'));
    if stripped.is_empty() { name } else { stripped }
}

/// Remove the final extension, keeping dotfiles like `.gitignore` intact.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Find the template matching `query`.
///
/// Tried in order: exact file name, exact display name, then a
/// case-insensitive match on either.
///
/// # Errors
///
/// [`NewPlusError::TemplateNotFound`] with up to three close matches.
pub fn find_template<'a>(templates: &'a [Template], query: &str) -> Result<&'a Template> {
    let lower = query.to_lowercase();
    let found = templates
        .iter()
        .find(|t| t.name == query)
        .or_else(|| templates.iter().find(|t| t.display_name == query))
        .or_else(|| {
            templates.iter().find(|t| {
                t.name.to_lowercase() == lower || t.display_name.to_lowercase() == lower
            })
        });

    match found {
        Some(template) => Ok(template),
        None => Err(NewPlusError::TemplateNotFound {
            name: query.to_string(),
            suggestions: suggest(templates, query),
        }
        .into()),
    }
}

fn suggest(templates: &[Template], query: &str) -> Vec<String> {
    let lower = query.to_lowercase();
    let mut scored: Vec<(usize, &str)> = templates
        .iter()
        .map(|t| (levenshtein(&lower, &t.display_name.to_lowercase()), t.display_name.as_str()))
        .collect();
    scored.sort_by_key(|(dist, _)| *dist);

    let max = query.chars().count().max(1) * SIMILARITY_THRESHOLD_PERCENT / 100;
    scored
        .into_iter()
        .filter(|(dist, _)| *dist <= max.max(1))
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}
