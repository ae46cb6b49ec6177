//! Framebuffer copy utility: download, build, install and enable fbcp

use super::assets::write_fbcp_unit;
use super::command::CommandRunner;
use super::defaults::{
    CMAKE_INSTALL_FLAGS, FBCP_ARCHIVE_NAME, FBCP_CMAKE_FLAGS_LINE, FBCP_SERVICE, FBCP_SOURCE_DIR,
};
use super::paths::SystemPaths;
use crate::config_text::upsert_all;
use crate::display::Rotation;
use crate::display::boot_config::{hdmi_install_rules, hdmi_uninstall_rules};
use crate::exceptions::{InstallerError, Result};
use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

/// Fetch and compile fbcp in a scratch directory, then install the binary
pub fn build_and_install(
    runner: &dyn CommandRunner,
    paths: &SystemPaths,
    archive_url: &str,
) -> Result<()> {
    let cmake_args: Vec<&str> = CMAKE_INSTALL_FLAGS
        .iter()
        .copied()
        .chain(["install", "cmake"])
        .collect();
    if let Err(e) = runner.run("apt-get", &cmake_args, None) {
        warn!("Error installing cmake: {e}");
    }

    let scratch = TempDir::new()?;
    let work = scratch.path();
    debug!("📁 Building fbcp in {:?}", work);

    runner.run("curl", &["-sL", "-o", FBCP_ARCHIVE_NAME, archive_url], Some(work))?;
    runner
        .run("unzip", &["-q", "-o", FBCP_ARCHIVE_NAME], Some(work))
        .map_err(|e| InstallerError::Generic(format!("Failed to uncompress rpi-fbcp: {e}")))?;

    let source = work.join(FBCP_SOURCE_DIR);
    let build = source.join("build");
    fs::create_dir_all(&build).map_err(|e| InstallerError::file(&build, e))?;
    append_cmake_flags(&source.join("CMakeLists.txt"))?;

    runner
        .run("cmake", &[".."], Some(&build))
        .map_err(|e| InstallerError::Generic(format!("Failed to cmake fbcp: {e}")))?;
    runner
        .run("make", &[], Some(&build))
        .map_err(|e| InstallerError::Generic(format!("Failed to make fbcp: {e}")))?;

    let target = paths.fbcp_binary();
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| InstallerError::file(parent, e))?;
    }
    let target_str = target.to_string_lossy().into_owned();
    runner.run("install", &["fbcp", target_str.as_str()], Some(&build))?;
    info!("✅ Installed fbcp to {}", target.display());

    Ok(())
}

fn append_cmake_flags(cmake_lists: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(cmake_lists)
        .map_err(|e| InstallerError::file(cmake_lists, e))?;
    file.write_all(FBCP_CMAKE_FLAGS_LINE.as_bytes())
        .map_err(|e| InstallerError::file(cmake_lists, e))
}

/// Build fbcp, enable its service, and switch HDMI to the panel's mode
pub fn install(
    runner: &dyn CommandRunner,
    paths: &SystemPaths,
    archive_url: &str,
    rotation: Rotation,
) -> Result<()> {
    info!("Installing fbcp...");
    build_and_install(runner, paths, archive_url)?;

    write_fbcp_unit(paths)?;
    if let Err(e) = runner.run("systemctl", &["enable", FBCP_SERVICE], None) {
        warn!("Could not enable {FBCP_SERVICE}: {e}");
    }

    // Full-screen output: no overscan compensation
    if let Err(e) = runner.run("raspi-config", &["nonint", "do_overscan", "1"], None) {
        warn!("Could not disable overscan: {e}");
    }

    let config = paths.boot_config();
    let outcomes = upsert_all(&config, &hdmi_install_rules(rotation))?;
    debug!("HDMI settings applied to {:?}: {:?}", config, outcomes);
    Ok(())
}

/// Disable fbcp and restore the HDMI defaults
pub fn uninstall(runner: &dyn CommandRunner, paths: &SystemPaths) -> Result<()> {
    if let Err(e) = runner.run("systemctl", &["disable", FBCP_SERVICE], None) {
        warn!("Could not disable {FBCP_SERVICE}: {e}");
    }
    if let Err(e) = runner.run("raspi-config", &["nonint", "do_overscan", "0"], None) {
        warn!("Could not restore overscan: {e}");
    }

    let config = paths.boot_config();
    let outcomes = upsert_all(&config, &hdmi_uninstall_rules())?;
    debug!("HDMI settings restored in {:?}: {:?}", config, outcomes);
    Ok(())
}
