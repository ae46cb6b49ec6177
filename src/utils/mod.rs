//! Utility functions for the installer

use std::env;

/// Check if an environment variable is set to a truthy value
/// Accepts: "1", "true", "on", "yes", "t" (case insensitive)
pub fn is_env_true(key: &str) -> bool {
    match env::var(key) {
        Ok(val) => is_truthy(&val),
        Err(_) => false,
    }
}

fn is_truthy(val: &str) -> bool {
    let val_lower = val.trim().to_lowercase();
    matches!(val_lower.as_str(), "1" | "true" | "on" | "yes" | "t")
}

/// Whether the process runs with effective uid 0
#[cfg(unix)]
#[allow(unsafe_code)] // Required for the geteuid FFI call
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        for val in ["1", "true", "TRUE", "on", "yes", "t", " yes "] {
            assert!(is_truthy(val), "{val} should be truthy");
        }
        for val in ["0", "false", "no", "", "y"] {
            assert!(!is_truthy(val), "{val} should not be truthy");
        }
    }

    #[test]
    fn test_unset_env_is_false() {
        assert!(!is_env_true("TFT_INSTALLER_TEST_SURELY_UNSET_VARIABLE"));
    }
}
