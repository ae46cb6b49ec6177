//! High-level API for installing and removing the display driver

use crate::exceptions::Result;
use crate::installer::command::SystemRunner;
use crate::installer::paths::SystemPaths;
use crate::installer::{InstallPlan, Installer, InstallerConfig};
use std::path::PathBuf;

/// Options for an install run
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Display profile identifier
    pub display: String,
    /// Rotation in degrees
    pub rotation: u32,
    /// Show output of external commands
    pub verbose: bool,
    /// Directory holding the overlay `.dts` sources
    pub overlay_dir: Option<PathBuf>,
}

/// Options for an uninstall run
#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    pub verbose: bool,
}

fn system_installer(config: InstallerConfig) -> Installer<SystemRunner> {
    let runner = SystemRunner::new(config.verbose);
    Installer::new(config, SystemPaths::default(), runner)
}

/// Fail early when the process lacks the privileges an install or uninstall needs
pub fn check_privileges() -> Result<()> {
    InstallerConfig::default().check_privileges()
}

/// Validate the request, then install on the running system.
///
/// Returns the installer so the caller can decide whether to reboot.
pub fn install(options: &InstallOptions) -> Result<Installer<SystemRunner>> {
    let plan = InstallPlan::resolve(&options.display, options.rotation)?;

    let mut config = InstallerConfig::from_env();
    config.verbose = options.verbose;
    if let Some(dir) = &options.overlay_dir {
        config.overlay_source_dir = dir.clone();
    }

    let installer = system_installer(config);
    installer.install(&plan)?;
    Ok(installer)
}

/// Remove the installer's changes from the running system
pub fn uninstall(options: &UninstallOptions) -> Result<()> {
    let config = InstallerConfig {
        verbose: options.verbose,
        ..InstallerConfig::from_env()
    };
    system_installer(config).uninstall()
}
