//! The pose type produced by the sampling engine.
use glam::{DQuat, DVec3};

/// A sampled 6-DoF pose: a world position and an orientation quaternion.
///
/// Consumed by external motion-planning layers; [`mint`] conversions are
/// provided for interop with other math stacks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// World position of the pose.
    pub position: DVec3,
    /// Orientation as a unit quaternion.
    pub orientation: DQuat,
}

impl Pose {
    /// Creates a new pose.
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Position as a [`mint::Point3`].
    pub fn position_point3(&self) -> mint::Point3<f64> {
        self.position.into()
    }

    /// Orientation as a [`mint::Quaternion`].
    pub fn orientation_quaternion(&self) -> mint::Quaternion<f64> {
        self.orientation.into()
    }
}
