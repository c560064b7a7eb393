//! Transient wind impulses from user clicks.
//!
//! Each impulse pushes particles within its radius away from the viewer
//! (−Z) with quadratic falloff, decays exponentially on a nominal 60 Hz
//! clock, and is garbage-collected once it is too old or too weak.

use vexil_math::Vec3;
use vexil_types::constants::{IMPULSE_HORIZON_MS, IMPULSE_MIN_STRENGTH, NOMINAL_FRAME_MS};

/// Strength of the impulse spawned by a click on the flag.
pub const CLICK_STRENGTH: f32 = 20.0;
/// Radius of the impulse spawned by a click on the flag.
pub const CLICK_RADIUS: f32 = 25.0;
/// Per-nominal-frame decay factor of a click impulse.
pub const CLICK_DECAY: f32 = 0.8;

/// A localized, decaying push.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindImpulse {
    /// Centre of influence.
    pub origin: Vec3,
    /// Current (decayed) strength.
    pub strength: f32,
    /// Strength at creation.
    pub initial_strength: f32,
    /// Influence radius.
    pub radius: f32,
    /// Decay factor applied per 16.67 ms.
    pub decay: f32,
    /// Host timestamp at creation (milliseconds).
    pub created_at_ms: f64,
}

impl WindImpulse {
    pub fn new(origin: Vec3, strength: f32, radius: f32, decay: f32, created_at_ms: f64) -> Self {
        Self {
            origin,
            strength,
            initial_strength: strength,
            radius,
            decay,
            created_at_ms,
        }
    }

    /// The impulse a click on the flag produces.
    pub fn click(origin: Vec3, created_at_ms: f64) -> Self {
        Self::new(origin, CLICK_STRENGTH, CLICK_RADIUS, CLICK_DECAY, created_at_ms)
    }

    /// Milliseconds since creation, never negative.
    #[inline]
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.created_at_ms).max(0.0)
    }

    /// `initial_strength · decay^(elapsed / 16.67)`.
    pub fn decayed_strength(&self, now_ms: f64) -> f32 {
        let frames = self.elapsed_ms(now_ms) / NOMINAL_FRAME_MS;
        (self.initial_strength as f64 * (self.decay as f64).powf(frames)) as f32
    }

    /// Force on a particle at `position`: `−Z · strength · falloff²` inside
    /// the radius, zero outside.
    pub fn force_on(&self, position: Vec3) -> Vec3 {
        let distance = position.distance(self.origin);
        if distance < self.radius {
            let falloff = 1.0 - distance / self.radius;
            Vec3::NEG_Z * (self.strength * falloff * falloff)
        } else {
            Vec3::ZERO
        }
    }
}

/// The set of live impulses, consulted and pruned once per physics step.
#[derive(Debug, Clone, Default)]
pub struct ImpulseField {
    impulses: Vec<WindImpulse>,
}

impl ImpulseField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an impulse. Order has no effect on the physics.
    pub fn add(&mut self, impulse: WindImpulse) {
        tracing::debug!(
            origin = ?impulse.origin,
            strength = impulse.strength,
            radius = impulse.radius,
            "wind impulse added"
        );
        self.impulses.push(impulse);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.impulses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.impulses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindImpulse> {
        self.impulses.iter()
    }

    /// Summed impulse force at `position`.
    pub fn force_at(&self, position: Vec3) -> Vec3 {
        self.impulses.iter().map(|i| i.force_on(position)).sum()
    }

    /// Decays every impulse to `now_ms`, then drops those older than the
    /// 1000 ms horizon or weaker than 0.1. Returns how many were dropped.
    pub fn update(&mut self, now_ms: f64) -> usize {
        let before = self.impulses.len();
        self.impulses.retain_mut(|impulse| {
            impulse.strength = impulse.decayed_strength(now_ms);
            impulse.elapsed_ms(now_ms) <= IMPULSE_HORIZON_MS
                && impulse.strength >= IMPULSE_MIN_STRENGTH
        });
        before - self.impulses.len()
    }
}
