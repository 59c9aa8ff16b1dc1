//! Path normalization helpers

use std::path::Path;

/// Render a path with `/` separators regardless of platform.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Normalize a user-supplied relative path so it compares equal to the
/// walker's relative paths: `/` separators, no leading `./`.
pub fn normalize_relative(raw: &str) -> String {
    let mut s = raw.trim().replace('\\', "/");
    while let Some(rest) = s.strip_prefix("./") {
        s = rest.to_string();
    }
    s
}
