//! Rigid pose (position + orientation) value type.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A rigid transform: translation plus unit-quaternion orientation.
///
/// Small and `Copy`; passed by value through the per-frame pose pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World or parent-relative position.
    pub position: Vec3,
    /// Unit quaternion orientation.
    pub orientation: Quat,
}

impl Pose {
    /// The identity pose at the origin.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Creates a pose from a position and orientation.
    #[inline]
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Expresses this parent-relative pose in the parent's frame:
    /// rotate by the parent orientation, then translate.
    #[inline]
    pub fn transformed_by(&self, parent: &Pose) -> Pose {
        Pose {
            position: parent.orientation * self.position + parent.position,
            orientation: parent.orientation * self.orientation,
        }
    }

    /// Linear position / spherical orientation blend. `t = 0` yields `self`.
    #[inline]
    pub fn blend(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(other.position, t),
            orientation: self.orientation.slerp(other.orientation, t),
        }
    }

    /// Approximate equality. Orientations `q` and `-q` compare equal.
    pub fn abs_diff_eq(&self, other: &Pose, tolerance: f32) -> bool {
        self.position.abs_diff_eq(other.position, tolerance)
            && self.orientation.dot(other.orientation).abs() >= 1.0 - tolerance
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
