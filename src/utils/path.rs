//! Lexical page-path helpers.
//!
//! Page paths are compared by exact string equality across the whole corpus, so
//! every path that enters the graph goes through [`normalize_page_path`]: `/`
//! separators on every platform, no `.` segments, `..` folded into its parent,
//! no repeated separators. None of these helpers touch the file system.

use std::path::Path;

/// Normalize a page path lexically.
///
/// Backslashes are treated as separators. On absolute paths `..` never climbs
/// above the root; on relative paths unmatched leading `..` segments are kept.
///
/// # Examples
///
/// ```
/// use jsp_insights::utils::normalize_page_path;
///
/// assert_eq!(normalize_page_path("/a/./b/../c//d.jsp"), "/a/c/d.jsp");
/// assert_eq!(normalize_page_path(r"C:\Stores\WebContent\..\x.jsp"), "C:/Stores/x.jsp");
/// assert_eq!(normalize_page_path("../x/../y.jsp"), "../y.jsp");
/// ```
#[must_use]
pub fn normalize_page_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                let pinned_drive = segments.len() == 1 && is_drive(segments[0]);
                match segments.last() {
                    Some(&last) if last != ".." && !pinned_drive => {
                        segments.pop();
                    }
                    _ if absolute || pinned_drive => {}
                    _ => segments.push(".."),
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join `relative` onto `base` and normalize the result.
///
/// Leading separators on `relative` are ignored, so `/x` is joined like `x`.
#[must_use]
pub fn join_page_path(base: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches(['/', '\\']);
    if base.is_empty() {
        return normalize_page_path(relative);
    }
    normalize_page_path(&format!("{base}/{relative}"))
}

/// Directory part of a normalized page path (`/` for top-level files).
#[must_use]
pub fn page_dir(path: &str) -> String {
    match path.rsplit_once('/') {
        Some(("", _)) => "/".to_string(),
        Some((dir, _)) => dir.to_string(),
        None => ".".to_string(),
    }
}

/// Convert a file system path into the normalized string form used as node key.
///
/// Windows extended-length prefixes produced by `canonicalize()` are stripped.
#[must_use]
pub fn page_path_from(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let cleaned = if let Some(stripped) = raw.strip_prefix(r"\\?\UNC\") {
        format!("//{stripped}")
    } else if let Some(stripped) = raw.strip_prefix(r"\\?\") {
        stripped.to_string()
    } else {
        raw.into_owned()
    };
    normalize_page_path(&cleaned)
}

fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
