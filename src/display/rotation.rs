//! Screen rotation and the matching touch-axis overlay parameters

use crate::exceptions::{InstallerError, Result};
use std::fmt;

/// Supported panel rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All rotations, in prompt order
    pub const ALL: [Rotation; 4] = [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270];

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Overlay parameters so touch input follows the rotated framebuffer
    pub fn overlay_fragment(self) -> &'static str {
        match self {
            Rotation::Deg0 => "rotate=0",
            Rotation::Deg90 => "rotate=90,touch-invy=true,touch-swapxy=true",
            Rotation::Deg180 => "rotate=180,touch-invy=true,touch-invx=true",
            Rotation::Deg270 => "rotate=270,touch-invx=true,touch-swapxy=true",
        }
    }

    /// Whether width and height trade places at this rotation
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<u32> for Rotation {
    type Error = InstallerError;

    fn try_from(degrees: u32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(InstallerError::InvalidRotation(other)),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Map degrees straight to the overlay fragment
pub fn resolve(degrees: u32) -> Result<&'static str> {
    Rotation::try_from(degrees).map(Rotation::overlay_fragment)
}
