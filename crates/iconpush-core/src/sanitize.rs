//! Icon name sanitization for device-side filenames.

/// Token used when a name has no usable characters left.
pub const FALLBACK_NAME: &str = "icon";

/// Reduces an arbitrary icon label to `[A-Za-z0-9_-]+`.
///
/// - Replaces every other character (including `/`, `.`, spaces and non-ASCII) with `_`
/// - Strips leading/trailing underscores
/// - Falls back to [`FALLBACK_NAME`] when nothing is left
pub fn sanitize_icon_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
