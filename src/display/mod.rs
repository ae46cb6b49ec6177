//! Display profiles, rotations and the boot configuration they produce

pub mod boot_config;
pub mod profiles;
pub mod rotation;

// Re-export types for convenience
pub use profiles::{DisplayProfile, lookup};
pub use rotation::Rotation;
