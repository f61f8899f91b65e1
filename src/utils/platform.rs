//! Platform-specific utilities and cross-platform compatibility helpers
//!
//! Handles home directory lookup, `~`/environment expansion in configured
//! paths, and Windows long path prefixes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use newplus_cli::utils::platform::{get_home_dir, resolve_path};
//!
//! # fn example() -> anyhow::Result<()> {
//! let home = get_home_dir()?;
//! let templates = resolve_path("~/.newplus/templates")?;
//! assert!(templates.starts_with(&home));
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Gets the home directory path for the current user.
///
/// # Errors
///
/// Fails when the home directory cannot be determined (e.g. `HOME` unset).
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references in a configured path.
///
/// # Errors
///
/// Fails when the home directory is unknown or a referenced environment
/// variable is undefined.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full_with_context(
        path,
        || dirs::home_dir().map(|h| h.to_string_lossy().into_owned()),
        |var| std::env::var(var).map(Some),
    )
    .with_context(|| {
        let platform_vars = if is_windows() {
            "Common Windows variables: $USERPROFILE, $APPDATA, $TEMP"
        } else {
            "Common Unix variables: $HOME, $USER, $TMPDIR"
        };

        format!(
            "Failed to expand path: {path}\n\n\
            Common issues:\n\
            - Undefined environment variable (e.g., $UNDEFINED_VAR)\n\
            - Invalid variable syntax (use $VAR or ${{VAR}})\n\n\
            {platform_vars}"
        )
    })?;

    Ok(windows_long_path(Path::new(expanded.as_ref())))
}

/// Convert paths longer than 260 characters to the `\\?\` form on Windows.
#[cfg(windows)]
pub fn windows_long_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if path_str.len() > 260 && !path_str.starts_with(r"\\?\") {
        let absolute_path = if path.is_relative() {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(path)
        } else {
            path.to_path_buf()
        };

        let absolute_str = absolute_path.to_string_lossy();
        if absolute_str.len() > 260 {
            if let Some(stripped) = absolute_str.strip_prefix(r"\\") {
                PathBuf::from(format!(r"\\?\UNC\{}", stripped))
            } else {
                PathBuf::from(format!(r"\\?\{}", absolute_str))
            }
        } else {
            absolute_path
        }
    } else {
        path.to_path_buf()
    }
}

/// No-op on non-Windows platforms.
#[cfg(not(windows))]
#[must_use]
pub fn windows_long_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}
