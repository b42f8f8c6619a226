use celestial_core::{RaDec, RotationMatrix3, Vector3};
use std::fmt;

/// Where the device faces, in celestial coordinates.
///
/// `line_of_sight` and `perpendicular` are unit vectors, approximately
/// orthogonal; `perpendicular` is the direction toward the top of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointing {
    pub line_of_sight: Vector3,
    pub perpendicular: Vector3,
    /// Degrees.
    pub field_of_view: f64,
}

impl Pointing {
    pub fn new(line_of_sight: Vector3, perpendicular: Vector3, field_of_view: f64) -> Self {
        Self {
            line_of_sight,
            perpendicular,
            field_of_view,
        }
    }

    /// RA/Dec of the centre of view.
    pub fn line_of_sight_ra_dec(&self) -> RaDec {
        RaDec::from_vector(&self.line_of_sight)
    }
}

impl Default for Pointing {
    fn default() -> Self {
        Self::new(Vector3::x_axis(), Vector3::y_axis(), 45.0)
    }
}

impl fmt::Display for Pointing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "looking at {} (fov {:.1}°)",
            self.line_of_sight_ra_dec(),
            self.field_of_view
        )
    }
}

/// The last published pointing together with the matrix that produced it.
///
/// `version` increases by one on every publication, whether computed from
/// sensors or set by hand, so readers can tell whether anything changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointingSnapshot {
    pub pointing: Pointing,
    pub transformation: RotationMatrix3,
    pub version: u64,
}

/// Receives every published [`Pointing`], synchronously on the publishing thread.
pub trait PointingListener: Send + Sync {
    fn on_pointing_changed(&self, pointing: &Pointing);
}
