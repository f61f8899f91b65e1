//! Atomic file writes using a temp-file-and-rename strategy.
//!
//! A created file either has its complete content or does not exist; an
//! interrupted materialization never leaves half-written files behind.

use crate::utils::fs::dirs::ensure_dir;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Safely writes a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`].
///
/// # Examples
///
/// ```rust,no_run
/// use newplus_cli::utils::fs::safe_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// safe_write(Path::new("notes.md"), "# Notes\n")?;
/// # Ok(())
/// # }
/// ```
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file.
///
/// 1. Writes content to a uniquely named temporary file in the same directory
/// 2. Syncs the temporary file to disk
/// 3. Renames the temporary file onto the target path
///
/// Parent directories are created when missing. An existing file at `path`
/// is replaced.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let safe_path = crate::utils::platform::windows_long_path(path);

    let parent = match safe_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir().context("Failed to determine current directory")?,
    };
    ensure_dir(&parent)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".newplus-")
        .suffix(".tmp")
        .tempfile_in(&parent)
        .with_context(|| {
            let platform_help = if crate::utils::platform::is_windows() {
                "On Windows: Check file permissions, path length, and that directory exists"
            } else {
                "Check file permissions and that directory exists"
            };
            format!("Failed to create temp file in: {}\n\n{}", parent.display(), platform_help)
        })?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    temp.persist(&safe_path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", safe_path.display()))?;

    Ok(())
}
