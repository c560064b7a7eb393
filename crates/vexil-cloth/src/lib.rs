//! # vexil-cloth
//!
//! Position-based cloth simulation for the flag surface.
//!
//! ## Key Types
//!
//! - [`ConstraintNetwork`]: Particle grid, distance constraints and boundary sets
//! - [`ClothSimulator`]: One physics step: wind, impulses, gravity, Verlet,
//!   relaxation, edge restoration, buffer commit
//! - [`ImpulseField`]: Click-driven wind impulses with decay and pruning
//! - [`Surface`]: Bilinear `(u, v)` sampling of the deformed surface
//! - [`ClothParams`]: Runtime-tunable simulation parameters

pub mod impulse;
pub mod network;
pub mod params;
pub mod particle;
pub mod sampler;
pub mod simulator;
pub mod wind;

pub use impulse::{ImpulseField, WindImpulse};
pub use network::{ConstraintNetwork, DistanceConstraint, EdgeSets};
pub use params::{ClothParam, ClothParams, FlagDimensions};
pub use particle::Particle;
pub use sampler::{Surface, SurfaceSample};
pub use simulator::{ClothSimulator, StepReport};
