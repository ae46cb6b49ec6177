//! Whole-file read and atomic whole-file write for configuration files

use crate::exceptions::{InstallerError, Result};
use log::{debug, trace};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read the full text of a configuration file
pub fn read_config(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| InstallerError::file(path, e))?;
    trace!("📖 Read {} bytes from {:?}", content.len(), path);
    Ok(content)
}

/// Replace the file's content with `content`.
///
/// The new content is written to a temporary file in the same directory and
/// renamed over the target, so readers never observe a partial file. The
/// target's permissions are carried over.
pub fn write_config(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| InstallerError::file(path, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| InstallerError::file(path, e))?;

    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())
            .map_err(|e| InstallerError::file(path, e))?;
    }

    tmp.persist(path)
        .map_err(|e| InstallerError::file(path, e.error))?;
    debug!("💾 Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

/// Write `updated` only when it differs from `original`; returns whether a write happened
pub fn write_if_changed(path: &Path, original: &str, updated: &str) -> Result<bool> {
    if original == updated {
        trace!("No change for {:?}, skipping write", path);
        return Ok(false);
    }
    write_config(path, updated)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, "old\n").unwrap();

        write_config(&path, "new\ncontent\n").unwrap();
        assert_eq!(read_config(&path).unwrap(), "new\ncontent\n");

        // No stray temporary files left next to the target
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, "a\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_config(&path, "b\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, InstallerError::FileError { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_write_if_changed_skips_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, "same\n").unwrap();

        assert!(!write_if_changed(&path, "same\n", "same\n").unwrap());
        assert!(write_if_changed(&path, "same\n", "other\n").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "other\n");
    }
}
