//! Cross-platform utilities: file system helpers, path expansion and progress bars.

pub mod fs;
pub mod platform;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, safe_write};
pub use platform::{get_home_dir, is_windows, resolve_path};
pub use progress::ProgressBar;
