//! Install and uninstall sequencing
//!
//! Validation happens before anything on the system is touched. After that,
//! steps run in order and the first fatal failure aborts the rest; nothing
//! already written is rolled back. Rerunning the installer is the recovery
//! path.

pub mod assets;
pub mod command;
pub mod defaults;
pub mod fbcp;
pub mod paths;

use crate::config_text::{BlockLocation, RemoveOutcome, read_config};
use crate::display::boot_config::{installer_block, render_payload};
use crate::display::{DisplayProfile, Rotation, lookup};
use crate::exceptions::{InstallerError, Result};
use crate::utils::is_root;
use command::CommandRunner;
use defaults::{DEFAULT_FBCP_ARCHIVE_URL, FBCP_URL_ENV, PREREQUISITE_PACKAGES};
use log::{debug, info};
use paths::SystemPaths;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Runtime settings for an installer run
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Show output of external commands
    pub verbose: bool,
    /// Refuse to run unless effective uid is 0
    pub require_root: bool,
    /// Directory holding the `<overlay>.dts` sources
    pub overlay_source_dir: PathBuf,
    /// Where the fbcp source archive is downloaded from
    pub fbcp_archive_url: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            require_root: true,
            overlay_source_dir: PathBuf::from("."),
            fbcp_archive_url: DEFAULT_FBCP_ARCHIVE_URL.to_string(),
        }
    }
}

impl InstallerConfig {
    /// Defaults, with the fbcp archive URL taken from `TFT_FBCP_URL` when set
    pub fn from_env() -> Self {
        Self::default().with_fbcp_url(env::var(FBCP_URL_ENV).ok())
    }

    /// Override the fbcp archive URL; `None` and blank values keep the current one
    pub fn with_fbcp_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            debug!("Using fbcp archive from {url}");
            self.fbcp_archive_url = url;
        }
        self
    }

    /// Fail with a privilege error when root is required but not held
    pub fn check_privileges(&self) -> Result<()> {
        if self.require_root && !is_root() {
            return Err(InstallerError::PrivilegeError(
                "Must be run with sudo".to_string(),
            ));
        }
        Ok(())
    }
}

/// A validated install request
#[derive(Debug, Clone, Copy)]
pub struct InstallPlan {
    pub profile: &'static DisplayProfile,
    pub rotation: Rotation,
}

impl InstallPlan {
    /// Validate the display identifier and rotation
    pub fn resolve(display: &str, rotation_degrees: u32) -> Result<Self> {
        let profile = lookup(display)?;
        let rotation = Rotation::try_from(rotation_degrees)?;
        Ok(Self { profile, rotation })
    }
}

/// Drives installation and removal against a system root
#[derive(Debug)]
pub struct Installer<R: CommandRunner> {
    config: InstallerConfig,
    paths: SystemPaths,
    runner: R,
}

impl<R: CommandRunner> Installer<R> {
    pub fn new(config: InstallerConfig, paths: SystemPaths, runner: R) -> Self {
        Self {
            config,
            paths,
            runner,
        }
    }

    pub fn paths(&self) -> &SystemPaths {
        &self.paths
    }

    /// Install drivers, services and boot configuration for `plan`
    pub fn install(&self, plan: &InstallPlan) -> Result<()> {
        self.config.check_privileges()?;
        self.verify_boot_config()?;
        info!(
            "🔧 Installing {} with rotation {}",
            plan.profile.id, plan.rotation
        );

        self.install_packages()?;
        self.install_overlay(plan.profile)?;
        info!("Installing udev rules...");
        assets::write_udev_rules(&self.paths)?;
        fbcp::install(
            &self.runner,
            &self.paths,
            &self.config.fbcp_archive_url,
            plan.rotation,
        )?;
        self.update_boot_config(plan)?;

        if let Some(section) = plan.profile.xorg {
            assets::write_xorg_calibration(&self.paths, section)?;
        }
        if let Some(calibration) = plan.profile.calibration {
            assets::write_pointercal(&self.paths, calibration)?;
        }

        info!("Installation complete. Settings take effect on next boot.");
        Ok(())
    }

    /// Remove the boot configuration block and undo the fbcp/HDMI setup
    pub fn uninstall(&self) -> Result<()> {
        self.config.check_privileges()?;

        let config = self.paths.boot_config();
        match installer_block().remove_block(&config)? {
            RemoveOutcome::Removed { lines } => {
                info!("🧹 Removed {lines} lines from {}", config.display());
            }
            RemoveOutcome::NotFound => {}
        }

        fbcp::uninstall(&self.runner, &self.paths)?;
        info!("Done.");
        Ok(())
    }

    pub fn reboot(&self) -> Result<()> {
        info!("Rebooting...");
        self.runner.run("reboot", &[], None)
    }

    /// Fail before touching the system if config.txt is missing or holds a broken block
    fn verify_boot_config(&self) -> Result<()> {
        let config = self.paths.boot_config();
        let content = read_config(&config)?;
        match installer_block().locate(&content) {
            BlockLocation::Unterminated { start } => Err(InstallerError::CorruptBlock {
                path: config,
                start_line: start + 1,
            }),
            BlockLocation::Absent | BlockLocation::Found { .. } => Ok(()),
        }
    }

    fn install_packages(&self) -> Result<()> {
        info!("Updating apt indexes and installing pre-requisite Software...");
        self.runner.run("apt", &["update"], None).map_err(|e| {
            InstallerError::Generic(format!("Couldn't update apt indexes: {e}"))
        })?;

        let args: Vec<&str> = ["install", "-y"]
            .into_iter()
            .chain(PREREQUISITE_PACKAGES.iter().copied())
            .collect();
        self.runner.run("apt-get", &args, None).map_err(|e| {
            InstallerError::Generic(format!("Couldn't install pre-requisite Software: {e}"))
        })
    }

    /// Compile the display's device tree overlay and copy it to the boot partition
    fn install_overlay(&self, profile: &DisplayProfile) -> Result<()> {
        info!("Compiling and installing drivers...");
        let source = self
            .config
            .overlay_source_dir
            .join(format!("{}.dts", profile.overlay_file));
        let scratch = TempDir::new()?;
        let compiled = scratch.path().join(format!("{}.dtbo", profile.overlay_file));

        let source_str = source.to_string_lossy().into_owned();
        let compiled_str = compiled.to_string_lossy().into_owned();
        self.runner
            .run(
                "dtc",
                &["-O", "dtb", "-o", &compiled_str, "-b", "0", "-@", &source_str],
                None,
            )
            .map_err(|e| {
                InstallerError::Generic(format!(
                    "Error compiling the device tree overlay file: {e}"
                ))
            })?;

        let target = self.paths.overlay(profile.overlay_file);
        let overlays = self.paths.overlays_dir();
        fs::create_dir_all(&overlays).map_err(|e| InstallerError::file(&overlays, e))?;
        fs::copy(&compiled, &target).map_err(|e| InstallerError::file(&target, e))?;
        debug!("📦 Installed overlay {:?}", target);
        Ok(())
    }

    /// Replace the installer block in config.txt with one for `plan`
    fn update_boot_config(&self, plan: &InstallPlan) -> Result<()> {
        let config = self.paths.boot_config();
        info!("Updating {}", config.display());
        let payload = render_payload(plan.profile, plan.rotation);
        let previous = installer_block().replace_block(&config, &payload)?;
        debug!("Previous installer block: {:?}", previous);
        Ok(())
    }
}
