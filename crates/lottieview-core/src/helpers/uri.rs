// crates/lottieview-core/src/helpers/uri.rs
//
// Source URI normalization.
//
// The picker, the command line and drag-and-drop all hand us plain paths; the
// store keeps sources as `file://` URIs. Filesystem access (size lookup, load)
// needs the path back, so `to_fs_path` undoes the prefix and tolerates the
// one/two/three-slash variants different hosts produce.

use std::path::{Path, PathBuf};

pub const FILE_SCHEME: &str = "file://";

/// Path or URI → `file://` URI. Empty input (a cancelled pick) yields None.
///
/// | Input            | Output               |
/// |------------------|----------------------|
/// | `file://…`       | unchanged            |
/// | `/abs/a.json`    | `file:///abs/a.json` |
/// | `C:\x\a.json`    | `file:///C:\x\a.json`|
/// | `rel/a.json`     | `file:///rel/a.json` |
///
/// ```
/// use lottieview_core::helpers::uri::normalize_source;
/// assert_eq!(normalize_source("/tmp/a.json").as_deref(), Some("file:///tmp/a.json"));
/// assert_eq!(normalize_source("file:///tmp/a.json").as_deref(), Some("file:///tmp/a.json"));
/// assert_eq!(normalize_source("  "), None);
/// ```
pub fn normalize_source(path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with(FILE_SCHEME) {
        return Some(path.to_string());
    }
    if path.starts_with('/') {
        return Some(format!("{FILE_SCHEME}{path}"));
    }
    Some(format!("{FILE_SCHEME}/{path}"))
}

/// `file://` URI (any slash count) → filesystem path. Plain paths pass through.
pub fn to_fs_path(uri: &str) -> PathBuf {
    let Some(rest) = uri.strip_prefix(FILE_SCHEME).or_else(|| uri.strip_prefix("file:")) else {
        return PathBuf::from(uri);
    };
    // `file:///C:/x` → `C:/x`; POSIX keeps its single leading slash.
    let trimmed = rest.trim_start_matches('/');
    if has_drive_prefix(trimmed) {
        return PathBuf::from(trimmed);
    }
    PathBuf::from(format!("/{trimmed}"))
}

/// `C:\` / `C:/` drive-letter prefix.
fn has_drive_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 3 && b[0].is_ascii_alphabetic() && b[1] == b':' && (b[2] == b'/' || b[2] == b'\\')
}

/// Human label for a source: the file name, or the whole URI if it has none.
pub fn display_name(uri: &str) -> String {
    let path = to_fs_path(uri);
    Path::new(&path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| uri.to_string())
}

/// Only Lottie JSON and dotLottie containers are accepted by the picker.
pub fn is_lottie_path(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|e| e == "json" || e == "lottie")
}
