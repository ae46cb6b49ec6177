//! Static files the installer drops onto the system

use super::defaults::{FBCP_UNIT, UDEV_RULES};
use super::paths::SystemPaths;
use crate::exceptions::{InstallerError, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Write `content` to `path`, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| InstallerError::file(parent, e))?;
    }
    debug!("📝 Writing file: {}", path.display());
    fs::write(path, content).map_err(|e| InstallerError::file(path, e))
}

/// Symlink touch controllers to /dev/input/touchscreen
pub fn write_udev_rules(paths: &SystemPaths) -> Result<()> {
    for (name, rule) in UDEV_RULES {
        write_file(&paths.udev_rule(name), rule)?;
    }
    Ok(())
}

pub fn write_fbcp_unit(paths: &SystemPaths) -> Result<()> {
    write_file(&paths.fbcp_unit(), FBCP_UNIT)
}

/// X11 libinput calibration section
pub fn write_xorg_calibration(paths: &SystemPaths, section: &str) -> Result<()> {
    write_file(&paths.xorg_calibration(), section)
}

/// tslib calibration
pub fn write_pointercal(paths: &SystemPaths, calibration: &str) -> Result<()> {
    write_file(&paths.pointercal(), calibration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_udev_rules_written_under_root() {
        let root = TempDir::new().unwrap();
        let paths = SystemPaths::new(root.path());

        write_udev_rules(&paths).unwrap();

        let ft = fs::read_to_string(paths.udev_rule("95-ftcaptouch.rules")).unwrap();
        assert!(ft.contains(r#"ATTRS{name}=="EP0110M09""#));
        assert!(ft.contains(r#"SYMLINK+="input/touchscreen""#));
        assert!(paths.udev_rule("95-touchmouse.rules").exists());
        assert!(paths.udev_rule("95-stmpe.rules").exists());
    }

    #[test]
    fn test_unit_and_calibration_files() {
        let root = TempDir::new().unwrap();
        let paths = SystemPaths::new(root.path());

        write_fbcp_unit(&paths).unwrap();
        write_pointercal(&paths, "1 2 3").unwrap();
        write_xorg_calibration(&paths, "Section \"InputClass\"\nEndSection\n").unwrap();

        let unit = fs::read_to_string(paths.fbcp_unit()).unwrap();
        assert!(unit.contains("ExecStart=/usr/local/bin/fbcp"));
        assert_eq!(fs::read_to_string(paths.pointercal()).unwrap(), "1 2 3");
        assert!(paths.xorg_calibration().exists());
    }

    #[test]
    fn test_write_file_overwrites() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("a/b/c.txt");
        write_file(&path, "one").unwrap();
        write_file(&path, "two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }
}
