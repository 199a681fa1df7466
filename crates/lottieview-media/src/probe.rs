// crates/lottieview-media/src/probe.rs
//
// File-size lookup. Failure is never fatal: it degrades to "unknown" and the
// load proceeds regardless.

use std::path::Path;

/// Size in bytes of the file at `path`, or None if it cannot be stat'ed or is
/// not a regular file.
pub fn probe_file_size(path: &Path) -> Option<u64> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {
            tracing::debug!("[media] size {} bytes ← {}", meta.len(), path.display());
            Some(meta.len())
        }
        Ok(_) => {
            tracing::warn!("[media] size lookup: {} is not a regular file", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("[media] size lookup failed for {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reports_bytes_for_regular_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[0u8; 2048]).unwrap();
        assert_eq!(probe_file_size(f.path()), Some(2048));
    }

    #[test]
    fn missing_file_and_directory_are_unknown() {
        assert_eq!(probe_file_size(Path::new("/no/such/file.json")), None);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(probe_file_size(dir.path()), None);
    }
}
