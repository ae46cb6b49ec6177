//! Error types for the installer

use std::fmt;
use std::path::PathBuf;

/// Main error type for installer operations
#[derive(Debug)]
pub enum InstallerError {
    /// A configuration file could not be read or written
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Owned block start sentinel present without a matching end sentinel after it
    CorruptBlock {
        path: PathBuf,
        /// 1-based line number of the start sentinel
        start_line: usize,
    },

    /// Rotation outside of 0/90/180/270
    InvalidRotation(u32),

    /// Display identifier not present in the registry
    InvalidDisplay(String),

    /// Not running with the required elevation
    PrivilegeError(String),

    /// Upsert pattern failed to compile
    InvalidPattern(regex::Error),

    /// External command exited unsuccessfully or could not be spawned
    CommandFailed { command: String, status: Option<i32> },

    /// Interactive prompt received an unusable answer
    InvalidChoice(String),

    /// IO error
    IoError(std::io::Error),

    /// Generic error with message
    Generic(String),
}

impl InstallerError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallerError::FileError {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for InstallerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallerError::FileError { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            InstallerError::CorruptBlock { path, start_line } => write!(
                f,
                "Installer block in {} starts at line {start_line} but has no end marker after it; refusing to edit",
                path.display()
            ),
            InstallerError::InvalidRotation(degrees) => write!(
                f,
                "Invalid rotation: {degrees} (expected one of 0, 90, 180, 270)"
            ),
            InstallerError::InvalidDisplay(id) => write!(f, "Unknown display: {id}"),
            InstallerError::PrivilegeError(msg) => write!(f, "{msg}"),
            InstallerError::InvalidPattern(err) => write!(f, "Invalid pattern: {err}"),
            InstallerError::CommandFailed { command, status } => match status {
                Some(code) => write!(f, "Command failed with status {code}: {command}"),
                None => write!(f, "Command failed: {command}"),
            },
            InstallerError::InvalidChoice(msg) => write!(f, "Invalid choice: {msg}"),
            InstallerError::IoError(err) => write!(f, "IO error: {err}"),
            InstallerError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for InstallerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstallerError::FileError { source, .. } => Some(source),
            InstallerError::InvalidPattern(err) => Some(err),
            InstallerError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstallerError {
    fn from(err: std::io::Error) -> Self {
        InstallerError::IoError(err)
    }
}

impl From<regex::Error> for InstallerError {
    fn from(err: regex::Error) -> Self {
        InstallerError::InvalidPattern(err)
    }
}

/// Result type for installer operations
pub type Result<T> = std::result::Result<T, InstallerError>;
