//! Morph and pivot configuration.

use serde::{Deserialize, Serialize};
use vexil_math::Vec3;
use vexil_types::{VexilError, VexilResult};

/// Timing and placement of the flag ↔ polyhedron morph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Seconds for global progress to sweep 0 → 1.
    pub duration: f32,

    /// Share of the sweep spent staggering element start times. Each
    /// element then animates over the remaining `1 - stagger_fraction`.
    pub stagger_fraction: f32,

    /// Lift of elements off the cloth along the sampled normal.
    pub surface_offset: f32,

    /// Seed of the stagger permutation.
    pub seed: u64,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            duration: 2.0,
            stagger_fraction: 0.6,
            surface_offset: 0.1,
            seed: 0,
        }
    }
}

impl MorphConfig {
    /// All elements move in lockstep.
    pub fn unstaggered() -> Self {
        Self {
            stagger_fraction: 0.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> VexilResult<()> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(VexilError::InvalidConfig(format!(
                "morph duration must be positive, got {}",
                self.duration
            )));
        }
        if !(0.0..1.0).contains(&self.stagger_fraction) {
            return Err(VexilError::InvalidConfig(format!(
                "stagger_fraction must be within [0, 1), got {}",
                self.stagger_fraction
            )));
        }
        if !self.surface_offset.is_finite() {
            return Err(VexilError::InvalidConfig(
                "surface_offset must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Spring, damping and rotation rates of the rigid pivot.
///
/// Rates are per tick, not per second, so they assume the nominal
/// 60 Hz frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PivotConfig {
    /// Position the spring pulls the pivot back to.
    pub rest_position: Vec3,
    /// Spring constant applied to the rest offset.
    pub spring_strength: f32,
    /// Velocity retained each tick.
    pub spring_damping: f32,
    /// Slerp factor chasing the target orientation.
    pub orientation_smoothing: f32,
    /// Recoil applied by a click on an element.
    pub push_strength: f32,
    /// Yaw added to the target per nominal 16 ms frame (radians).
    pub auto_rotate_speed: f32,
    /// Radians per viewport-width of pointer drag.
    pub drag_speed: f32,
}

impl Default for PivotConfig {
    fn default() -> Self {
        Self {
            rest_position: Vec3::new(0.0, 0.0, 25.0),
            spring_strength: 0.01,
            spring_damping: 0.9,
            orientation_smoothing: 0.13,
            push_strength: 0.015,
            auto_rotate_speed: 0.004,
            drag_speed: 5.0,
        }
    }
}

impl PivotConfig {
    pub fn validate(&self) -> VexilResult<()> {
        if !self.rest_position.is_finite() {
            return Err(VexilError::InvalidConfig(
                "pivot rest_position must be finite".into(),
            ));
        }
        for (name, value) in [
            ("spring_strength", self.spring_strength),
            ("spring_damping", self.spring_damping),
            ("orientation_smoothing", self.orientation_smoothing),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(VexilError::InvalidConfig(format!(
                    "pivot {name} must be within [0, 1], got {value}"
                )));
            }
        }
        for (name, value) in [
            ("push_strength", self.push_strength),
            ("auto_rotate_speed", self.auto_rotate_speed),
            ("drag_speed", self.drag_speed),
        ] {
            if !value.is_finite() {
                return Err(VexilError::InvalidConfig(format!(
                    "pivot {name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}
