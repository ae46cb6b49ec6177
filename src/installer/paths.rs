//! Filesystem locations touched by the installer

use super::defaults::{
    BOOT_CONFIG_FILE, FBCP_BINARY, FBCP_SERVICE, OVERLAYS_DIR, POINTERCAL_FILE, SYSTEMD_UNIT_DIR,
    UDEV_RULES_DIR, XORG_CALIBRATION_FILE,
};
use std::path::{Path, PathBuf};

/// All target paths, resolved under one root directory
#[derive(Debug, Clone)]
pub struct SystemPaths {
    root: PathBuf,
}

impl Default for SystemPaths {
    fn default() -> Self {
        Self::new("/")
    }
}

impl SystemPaths {
    /// Paths under `root` (`/` on a live system)
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ==================== Boot partition ====================

    pub fn boot_config(&self) -> PathBuf {
        self.root.join(BOOT_CONFIG_FILE)
    }

    pub fn overlays_dir(&self) -> PathBuf {
        self.root.join(OVERLAYS_DIR)
    }

    /// Installed location of a compiled overlay
    pub fn overlay(&self, overlay_file: &str) -> PathBuf {
        self.overlays_dir().join(format!("{overlay_file}.dtbo"))
    }

    // ==================== System configuration ====================

    pub fn udev_rule(&self, name: &str) -> PathBuf {
        self.root.join(UDEV_RULES_DIR).join(name)
    }

    pub fn fbcp_unit(&self) -> PathBuf {
        self.root.join(SYSTEMD_UNIT_DIR).join(FBCP_SERVICE)
    }

    pub fn xorg_calibration(&self) -> PathBuf {
        self.root.join(XORG_CALIBRATION_FILE)
    }

    pub fn pointercal(&self) -> PathBuf {
        self.root.join(POINTERCAL_FILE)
    }

    pub fn fbcp_binary(&self) -> PathBuf {
        self.root.join(FBCP_BINARY)
    }
}
