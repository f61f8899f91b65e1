//! Text vs. binary detection for template content.

/// Interpret `bytes` as template text.
///
/// Returns `None` for content that should be copied verbatim: anything that
/// is not valid UTF-8 or contains a NUL byte.
#[must_use]
pub fn as_template_text(bytes: &[u8]) -> Option<&str> {
    if bytes.contains(&0) {
        return None;
    }
    std::str::from_utf8(bytes).ok()
}
