use celestial_core::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the user holds the phone relative to the sky.
///
/// | Mode | Look direction (phone) | Screen up (phone) |
/// |------|------------------------|-------------------|
/// | `Standard` | `-z`, through the back of the phone | `+y` |
/// | `Rotate90` | `-z` | `+x`, landscape |
/// | `Telescope` | `+y`, sighting along the long edge | `+z` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewDirectionMode {
    #[default]
    Standard,
    Rotate90,
    Telescope,
}

impl ViewDirectionMode {
    /// The viewing direction in phone coordinates.
    pub fn pointing_in_phone_coords(self) -> Vector3 {
        match self {
            Self::Standard | Self::Rotate90 => Vector3::new(0.0, 0.0, -1.0),
            Self::Telescope => Vector3::new(0.0, 1.0, 0.0),
        }
    }

    /// The screen's up direction in phone coordinates.
    pub fn screen_up_in_phone_coords(self) -> Vector3 {
        match self {
            Self::Standard => Vector3::new(0.0, 1.0, 0.0),
            Self::Rotate90 => Vector3::new(1.0, 0.0, 0.0),
            Self::Telescope => Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

impl fmt::Display for ViewDirectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Standard => "standard",
            Self::Rotate90 => "rotate90",
            Self::Telescope => "telescope",
        };
        f.write_str(name)
    }
}
