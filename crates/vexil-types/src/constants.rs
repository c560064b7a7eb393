//! Simulation constants and timing defaults.

/// Frame delta (seconds) assumed when the host reports none.
pub const DEFAULT_FRAME_DT: f32 = 0.016;

/// Upper bound on the cloth integration timestep (seconds).
pub const MAX_CLOTH_DT: f32 = 0.033;

/// Minimum wall-clock interval between cloth steps (milliseconds).
pub const DEFAULT_PHYSICS_INTERVAL_MS: f64 = 30.0;

/// Nominal 60 Hz frame length used to normalize impulse decay (milliseconds).
pub const NOMINAL_FRAME_MS: f64 = 16.67;

/// Wind impulses older than this are dropped (milliseconds).
pub const IMPULSE_HORIZON_MS: f64 = 1000.0;

/// Wind impulses weaker than this are dropped.
pub const IMPULSE_MIN_STRENGTH: f32 = 0.1;

/// Number of animated elements (one per icosahedron vertex).
pub const ELEMENT_COUNT: usize = 12;

/// Upper bound on constraint relaxation passes per cloth step.
pub const MAX_CONSTRAINT_ITERATIONS: u32 = 64;
