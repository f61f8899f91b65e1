//! Progress reporting for template materialization.
//!
//! Thin wrapper around [`indicatif`] that renders nothing when progress is
//! disabled (`--no-progress`, `NEWPLUS_NO_PROGRESS`) so callers never have to
//! branch on it.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// A progress bar that may be hidden.
///
/// Cloning shares the underlying bar, so clones can be moved into worker
/// tasks and advanced concurrently.
#[derive(Clone, Debug)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Create a bar of `len` steps, or a hidden one when `enabled` is false.
    #[must_use]
    pub fn new(len: u64, enabled: bool) -> Self {
        let bar = if enabled {
            let bar = IndicatifBar::new(len);
            bar.set_style(default_style());
            bar
        } else {
            IndicatifBar::hidden()
        };
        Self {
            inner: bar,
        }
    }

    /// A bar that never renders.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn default_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸━")
}
