//! What the installer puts into /boot/config.txt

use super::profiles::DisplayProfile;
use super::rotation::Rotation;
use crate::config_text::{OwnedBlock, UpsertRule};

/// First line of the installer block
pub const BLOCK_START: &str = "# --- added by pi3g tft installer ---";

/// Last line of the installer block
pub const BLOCK_END: &str = "# --- end pi3g tft installer ---";

/// Lines that precede the display overlay in every block
const BASE_SETTINGS: [&str; 5] = [
    "[all]",
    "hdmi_force_hotplug=1",
    "dtparam=spi=on",
    "dtparam=i2c1=on",
    "dtparam=i2c_arm=on",
];

/// The installer-owned block in config.txt
pub fn installer_block() -> OwnedBlock {
    OwnedBlock::new(BLOCK_START, BLOCK_END)
}

/// Payload lines placed between the block markers
pub fn render_payload(profile: &DisplayProfile, rotation: Rotation) -> Vec<String> {
    BASE_SETTINGS
        .iter()
        .map(|s| s.to_string())
        .chain(profile.render_overlay(rotation))
        .collect()
}

/// HDMI timings and KMS overlay edits so fbcp can mirror the HDMI framebuffer
pub fn hdmi_install_rules(rotation: Rotation) -> Vec<UpsertRule> {
    let cvt = if rotation.swaps_axes() {
        "hdmi_cvt=640 480 60 1 0 0 0"
    } else {
        "hdmi_cvt=480 640 60 1 0 0 0"
    };

    vec![
        UpsertRule::upsert(r"^.*hdmi_force_hotplug.*$", "hdmi_force_hotplug=1"),
        UpsertRule::upsert(r"^.*hdmi_group.*$", "hdmi_group=2"),
        UpsertRule::upsert(r"^.*hdmi_mode.*$", "hdmi_mode=87"),
        UpsertRule::replace(r"^[^#]*dtoverlay=vc4-kms-v3d.*$", "#dtoverlay=vc4-kms-v3d"),
        UpsertRule::replace(r"^[^#]*dtoverlay=vc4-fkms-v3d.*$", "#dtoverlay=vc4-fkms-v3d"),
        UpsertRule::upsert(r"^.*hdmi_cvt.*$", cvt),
    ]
}

/// Undo [`hdmi_install_rules`]: re-enable KMS and blank the forced HDMI mode lines
pub fn hdmi_uninstall_rules() -> Vec<UpsertRule> {
    vec![
        UpsertRule::replace(r"^.*#.*dtoverlay=vc4-kms-v3d.*$", "dtoverlay=vc4-kms-v3d"),
        UpsertRule::replace(r"^.*#.*dtoverlay=vc4-fkms-v3d.*$", "dtoverlay=vc4-fkms-v3d"),
        UpsertRule::replace(r"^hdmi_group=2.*$", ""),
        UpsertRule::replace(r"^hdmi_mode=87.*$", ""),
        UpsertRule::replace(r"^hdmi_cvt=.*$", ""),
    ]
}
