//! Static registry of supported displays

use super::rotation::Rotation;
use crate::exceptions::{InstallerError, Result};

/// Placeholder in overlay templates that receives the rotation fragment
pub const ROTATION_PLACEHOLDER: &str = "{rotation}";

const FOCALTECH_CALIBRATION: &str = "320 65536 0 -65536 0 15728640 65536";

const FOCALTECH_XORG: &str = r#"
Section "InputClass"
        Identifier "FocalTech Touchscreen Calibration"
        MatchProduct "EP0110M09"
        MatchDevicePath "/dev/input/event*"
        Driver "libinput"
        Option "TransformationMatrix" "0 1 0 -1 0 1 0 0 1"
EndSection
"#;

/// Everything the installer needs to know about one display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayProfile {
    /// Identifier accepted on the command line
    pub id: &'static str,
    /// Base name of the `.dts` source and the installed `.dtbo`
    pub overlay_file: &'static str,
    /// config.txt lines, with one `{rotation}` placeholder
    pub overlay_template: &'static str,
    /// tslib pointercal contents
    pub calibration: Option<&'static str>,
    /// X11 InputClass section
    pub xorg: Option<&'static str>,
}

static PROFILES: [DisplayProfile; 2] = [
    DisplayProfile {
        id: "pi3g-capacitive-tft",
        overlay_file: "pi3g-capacitive-tft",
        overlay_template: "dtoverlay=pi3g-capacitive-tft,speed=64000000,fps=30\n\
                           dtoverlay=pi3g-capacitive-tft,{rotation}",
        calibration: Some(FOCALTECH_CALIBRATION),
        xorg: Some(FOCALTECH_XORG),
    },
    DisplayProfile {
        id: "pi3g-capacitive-tft-tpm",
        overlay_file: "pi3g-capacitive-tft-tpm",
        overlay_template: "dtoverlay=spi1-2cs\n\
                           dtoverlay=pi3g-capacitive-tft-tpm,speed=64000000,fps=30\n\
                           dtoverlay=pi3g-capacitive-tft-tpm,{rotation}",
        calibration: Some(FOCALTECH_CALIBRATION),
        xorg: Some(FOCALTECH_XORG),
    },
];

impl DisplayProfile {
    /// Overlay lines with the rotation fragment substituted
    pub fn render_overlay(&self, rotation: Rotation) -> Vec<String> {
        self.overlay_template
            .replace(ROTATION_PLACEHOLDER, rotation.overlay_fragment())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// All registered profiles
pub fn all() -> &'static [DisplayProfile] {
    &PROFILES
}

/// Registered identifiers, in registry order
pub fn identifiers() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.id).collect()
}

/// Look up a profile by identifier
pub fn lookup(id: &str) -> Result<&'static DisplayProfile> {
    PROFILES
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| InstallerError::InvalidDisplay(id.to_string()))
}
