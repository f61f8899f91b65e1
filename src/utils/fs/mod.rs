//! File system helpers used by template materialization and config I/O.

pub mod atomic;
pub mod dirs;
pub mod text;

// Directory operations
pub use dirs::{copy_permissions, ensure_dir, ensure_parent_dir};

// Atomic write operations
pub use atomic::{atomic_write, safe_write};

// Content inspection
pub use text::as_template_text;
