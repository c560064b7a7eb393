//! # vexil-math
//!
//! Math primitives for the Vexil simulation.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Quat`, etc.)
//! - [`Pose`]: position + orientation value type with parent composition
//! - Easing curves for the morph transition
//! - Orientation builders (look rotation, normal alignment, trackball deltas)

pub mod easing;
pub mod pose;
pub mod rotation;

// Re-export glam types as the canonical math types for Vexil.
pub use glam::{EulerRot, Mat3, Quat, Vec2, Vec3};

pub use easing::ease_in_out_quint;
pub use pose::Pose;
