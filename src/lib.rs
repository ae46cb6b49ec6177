//! Installer for pi3g capacitive TFT displays on the Raspberry Pi
//!
//! The core of the crate is [`config_text`], which keeps one installer-owned
//! block in `/boot/config.txt` and upserts individual settings without
//! disturbing the rest of the file. [`installer`] sequences the external
//! steps (packages, overlay, fbcp) around it.

// Enforce strict code quality and reliability
#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,
    unreachable_pub,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,

    // All warnings must be fixed
    warnings,
)]
#![warn(
    // Documentation
    missing_docs,

    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_enum_variant,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
    clippy::too_many_arguments,
    clippy::type_complexity,

    // Best practices
    clippy::clone_on_ref_ptr,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::if_not_else,
    clippy::single_match_else,
    clippy::needless_continue,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]
#![allow(missing_docs)]

pub mod api;
pub mod config_text;
pub mod display;
pub mod exceptions;
pub mod exit_codes;
pub mod installer;
pub mod logger;
pub mod prompt;
pub mod utils;
pub mod version;

// Re-export main API functions
pub use api::{InstallOptions, UninstallOptions, check_privileges, install, uninstall};
pub use exceptions::{InstallerError, Result};

// Re-export the building blocks for embedding
pub use config_text::{OwnedBlock, RemoveOutcome, UpsertOutcome, UpsertRule};
pub use display::{DisplayProfile, Rotation};
pub use installer::{InstallPlan, Installer, InstallerConfig};
