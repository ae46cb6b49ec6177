use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Read version from VERSION file next to Cargo.toml
    let version = if let Ok(v) = env::var("TFT_INSTALLER_VERSION") {
        // Use environment variable if set
        v
    } else {
        let version_file = Path::new("VERSION");
        if version_file.exists() {
            fs::read_to_string(version_file)
                .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap_or_default())
                .trim()
                .to_string()
        } else {
            // Fall back to the crate version
            env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.1".to_string())
        }
    };

    println!("cargo:rustc-env=TFT_INSTALLER_VERSION={}", version);
    println!("cargo:rerun-if-changed=VERSION");
    println!("cargo:rerun-if-env-changed=TFT_INSTALLER_VERSION");
}
