//! # vexil-types
//!
//! Shared types, identifiers, error types, and simulation constants
//! for the Vexil flag/star morph simulation.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other Vexil crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{VexilError, VexilResult};
pub use ids::{ElementId, NodeHandle, ParticleId};
