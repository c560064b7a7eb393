//! Cloth configuration.
//!
//! [`ClothParams`] holds the knobs exposed for interactive tuning; every
//! field is read fresh on each step, so changes apply on the next tick.
//! [`FlagDimensions`] fixes the grid layout at construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vexil_math::Vec3;
use vexil_types::constants::MAX_CONSTRAINT_ITERATIONS;
use vexil_types::{VexilError, VexilResult};

/// Runtime-tunable cloth simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothParams {
    /// Verlet drag (0.0 = no damping, 1.0 = velocity fully removed each step).
    pub damping: f32,

    /// Mass of every particle.
    pub mass: f32,

    /// Downward gravitational acceleration magnitude.
    pub gravity: f32,

    /// Scale of the turbulent wind force.
    pub wind_strength: f32,

    /// Time-scale multiplier of the wind pattern.
    pub wind_speed: f32,

    /// Constraint relaxation passes per step, at most
    /// [`MAX_CONSTRAINT_ITERATIONS`].
    pub constraint_iterations: u32,

    /// Boundary shape-retention strength; the per-step pull fraction
    /// is `edge_restoration * 0.01`.
    pub edge_restoration: f32,
}

impl Default for ClothParams {
    fn default() -> Self {
        Self {
            damping: 0.09,
            mass: 0.13,
            gravity: 0.0,
            wind_strength: 0.3,
            wind_speed: 2.7,
            constraint_iterations: 1,
            edge_restoration: 13.5,
        }
    }
}

impl ClothParams {
    /// No wind, no gravity: the cloth stays at its rest shape.
    pub fn still() -> Self {
        Self {
            wind_strength: 0.0,
            gravity: 0.0,
            ..Default::default()
        }
    }

    /// Stiffer cloth (more relaxation passes, heavier damping).
    pub fn stiff() -> Self {
        Self {
            constraint_iterations: 8,
            damping: 0.2,
            ..Default::default()
        }
    }

    /// Fraction of the rest offset recovered by boundary particles per step.
    #[inline]
    pub fn edge_pull(&self) -> f32 {
        self.edge_restoration * 0.01
    }

    /// Reads a parameter by name.
    pub fn get(&self, param: ClothParam) -> f32 {
        match param {
            ClothParam::Damping => self.damping,
            ClothParam::Mass => self.mass,
            ClothParam::Gravity => self.gravity,
            ClothParam::WindStrength => self.wind_strength,
            ClothParam::WindSpeed => self.wind_speed,
            ClothParam::ConstraintIterations => self.constraint_iterations as f32,
            ClothParam::EdgeRestoration => self.edge_restoration,
        }
    }

    /// Writes a parameter by name, rejecting values that would destabilize
    /// the step. Iteration counts are rounded to the nearest integer.
    pub fn set(&mut self, param: ClothParam, value: f32) -> VexilResult<()> {
        if !value.is_finite() {
            return Err(VexilError::InvalidConfig(format!(
                "{param} must be finite, got {value}"
            )));
        }
        match param {
            ClothParam::Damping => {
                if !(0.0..=1.0).contains(&value) {
                    return Err(VexilError::InvalidConfig(format!(
                        "damping must be within [0, 1], got {value}"
                    )));
                }
                self.damping = value;
            }
            ClothParam::Mass => {
                if value <= 0.0 {
                    return Err(VexilError::InvalidConfig(format!(
                        "mass must be positive, got {value}"
                    )));
                }
                self.mass = value;
            }
            ClothParam::Gravity => self.gravity = value,
            ClothParam::WindStrength => self.wind_strength = value,
            ClothParam::WindSpeed => self.wind_speed = value,
            ClothParam::ConstraintIterations => {
                if !(0.0..=MAX_CONSTRAINT_ITERATIONS as f32).contains(&value) {
                    return Err(VexilError::InvalidConfig(format!(
                        "constraint_iterations must be within [0, {MAX_CONSTRAINT_ITERATIONS}], got {value}"
                    )));
                }
                self.constraint_iterations = value.round() as u32;
            }
            ClothParam::EdgeRestoration => self.edge_restoration = value,
        }
        Ok(())
    }

    /// Checks every field against the same rules as [`ClothParams::set`].
    pub fn validate(&self) -> VexilResult<()> {
        let mut probe = *self;
        for &param in ClothParam::ALL {
            probe.set(param, self.get(param))?;
        }
        Ok(())
    }
}

/// A named cloth parameter, addressable from configuration surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothParam {
    Damping,
    Mass,
    Gravity,
    WindStrength,
    WindSpeed,
    ConstraintIterations,
    EdgeRestoration,
}

impl ClothParam {
    /// Every parameter, in display order.
    pub const ALL: &'static [ClothParam] = &[
        ClothParam::Damping,
        ClothParam::Mass,
        ClothParam::Gravity,
        ClothParam::WindStrength,
        ClothParam::WindSpeed,
        ClothParam::ConstraintIterations,
        ClothParam::EdgeRestoration,
    ];

    /// The snake_case name used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ClothParam::Damping => "damping",
            ClothParam::Mass => "mass",
            ClothParam::Gravity => "gravity",
            ClothParam::WindStrength => "wind_strength",
            ClothParam::WindSpeed => "wind_speed",
            ClothParam::ConstraintIterations => "constraint_iterations",
            ClothParam::EdgeRestoration => "edge_restoration",
        }
    }
}

impl fmt::Display for ClothParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClothParam {
    type Err = VexilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClothParam::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| VexilError::UnknownParameter(s.to_string()))
    }
}

/// Physical size and resolution of the flag grid.
///
/// Columns run along X (left to right), rows along Y (top to bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagDimensions {
    /// Total width along X.
    pub width: f32,
    /// Total height along Y.
    pub height: f32,
    /// Horizontal segment count (W).
    pub cols: usize,
    /// Vertical segment count (H).
    pub rows: usize,
}

impl Default for FlagDimensions {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 54.0,
            cols: 15,
            rows: 20,
        }
    }
}

impl FlagDimensions {
    pub fn new(cols: usize, rows: usize, width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            cols,
            rows,
        }
    }

    /// Rest length of constraints between horizontal neighbours.
    #[inline]
    pub fn horizontal_rest_length(&self) -> f32 {
        self.width / self.cols as f32
    }

    /// Rest length of constraints between vertical neighbours.
    #[inline]
    pub fn vertical_rest_length(&self) -> f32 {
        self.height / self.rows as f32
    }

    /// Undeformed position of surface coordinate `(u, v)`.
    /// `(0, 0)` is the top-left corner, `(1, 1)` the bottom-right.
    #[inline]
    pub fn surface_point(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new(
            (u - 0.5) * self.width,
            (0.5 - v) * self.height,
            0.0,
        )
    }

    /// Inverse of [`FlagDimensions::surface_point`] for a point on the rest plane.
    #[inline]
    pub fn surface_coords(&self, point: Vec3) -> (f32, f32) {
        (point.x / self.width + 0.5, 0.5 - point.y / self.height)
    }

    pub fn validate(&self) -> VexilResult<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(VexilError::InvalidDimensions(format!(
                "grid needs at least one column and row, got {}x{}",
                self.cols, self.rows
            )));
        }
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(VexilError::InvalidDimensions(format!(
                "flag size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
