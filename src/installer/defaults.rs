// Centralized default values for the installer

// =================================
// Target locations (relative to the system root)
// =================================
pub const BOOT_CONFIG_FILE: &str = "boot/config.txt";
pub const OVERLAYS_DIR: &str = "boot/overlays";
pub const UDEV_RULES_DIR: &str = "etc/udev/rules.d";
pub const SYSTEMD_UNIT_DIR: &str = "etc/systemd/system";
pub const XORG_CALIBRATION_FILE: &str = "usr/share/X11/xorg.conf.d/20-calibration.conf";
pub const POINTERCAL_FILE: &str = "etc/pointercal";
pub const FBCP_BINARY: &str = "usr/local/bin/fbcp";

// =================================
// Packages
// =================================
pub const PREREQUISITE_PACKAGES: &[&str] = &[
    "bc",
    "fbi",
    "git",
    "python3-dev",
    "python3-pip",
    "python3-smbus",
    "python3-spidev",
    "evtest",
    "libts-bin",
    "device-tree-compiler",
    "libraspberrypi-dev",
    "build-essential",
    "libts0",
];

pub const CMAKE_INSTALL_FLAGS: &[&str] = &[
    "--yes",
    "--allow-downgrades",
    "--allow-remove-essential",
    "--allow-change-held-packages",
];

// =================================
// fbcp
// =================================
pub const DEFAULT_FBCP_ARCHIVE_URL: &str = "https://github.com/adafruit/rpi-fbcp/archive/master.zip";
pub const FBCP_URL_ENV: &str = "TFT_FBCP_URL";
pub const FBCP_ARCHIVE_NAME: &str = "master.zip";
pub const FBCP_SOURCE_DIR: &str = "rpi-fbcp-master";
pub const FBCP_SERVICE: &str = "fbcp.service";
pub const FBCP_CMAKE_FLAGS_LINE: &str = "\nset (CMAKE_C_FLAGS \"-std=gnu99 ${CMAKE_C_FLAGS}\")";

pub const FBCP_UNIT: &str = "[Unit]
Description=Framebuffer copy utility for PiTFT
After=network.target

[Service]
Type=simple
ExecStartPre=/bin/sleep 10
ExecStart=/usr/local/bin/fbcp

[Install]
WantedBy=multi-user.target
";

// =================================
// udev rules (file name, contents)
// =================================
pub const UDEV_RULES: &[(&str, &str)] = &[
    (
        "95-touchmouse.rules",
        r#"
SUBSYSTEM=="input", ATTRS{name}=="touchmouse", ENV{DEVNAME}=="*event*", SYMLINK+="input/touchscreen"
"#,
    ),
    (
        "95-ftcaptouch.rules",
        r#"
SUBSYSTEM=="input", ATTRS{name}=="EP0110M09", ENV{DEVNAME}=="*event*", SYMLINK+="input/touchscreen"
SUBSYSTEM=="input", ATTRS{name}=="generic ft5x06*", ENV{DEVNAME}=="*event*", SYMLINK+="input/touchscreen"
"#,
    ),
    (
        "95-stmpe.rules",
        r#"
SUBSYSTEM=="input", ATTRS{name}=="*stmpe*", ENV{DEVNAME}=="*event*", SYMLINK+="input/touchscreen"
"#,
    ),
];

// =================================
// Prompting
// =================================
pub const ASSUME_YES_ENV: &str = "TFT_ASSUME_YES";
