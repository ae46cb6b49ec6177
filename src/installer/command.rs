//! External command execution

use crate::exceptions::{InstallerError, Result};
use log::{debug, warn};
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs external programs on behalf of the installer.
///
/// Implementations block until the program exits; a non-zero exit status is
/// an error.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<()>;
}

/// Runs commands on the host
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    /// Show command output instead of discarding it
    pub verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

/// Resolve an executable through PATH, falling back to the bare name
pub fn resolve_executable(executable: &str) -> String {
    if executable.contains('/') {
        return executable.to_string();
    }

    match which::which(executable) {
        Ok(path) => {
            let resolved = path.to_string_lossy().to_string();
            debug!("🔍 Resolved executable '{}' to '{}'", executable, resolved);
            resolved
        }
        Err(_) => {
            debug!("⚠️  Could not resolve '{}' in PATH, using it as is", executable);
            executable.to_string()
        }
    }
}

/// Command line as shown in logs and errors
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
        let shown = display_command(program, args);
        debug!("🏃 Running: {shown}");

        let mut command = Command::new(resolve_executable(program));
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        if !self.verbose {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = command.status().map_err(|e| {
            warn!("Failed to spawn {program}: {e}");
            InstallerError::CommandFailed {
                command: shown.clone(),
                status: None,
            }
        })?;

        if !status.success() {
            return Err(InstallerError::CommandFailed {
                command: shown,
                status: status.code(),
            });
        }

        Ok(())
    }
}
