//! Point mass with Verlet position history.

use vexil_math::Vec3;

/// A cloth particle.
///
/// Velocity is implicit: `position - previous`. Forces accumulate between
/// integrations and are cleared by [`Particle::integrate`].
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position.
    pub position: Vec3,
    /// Position at the previous step.
    pub previous: Vec3,
    /// Undeformed position, target of the edge-restoration pull.
    pub rest: Vec3,
    /// Force accumulated since the last integration.
    pub force: Vec3,
    mass: f32,
    inv_mass: f32,
}

impl Particle {
    /// Creates a particle at rest at `rest`.
    pub fn new(rest: Vec3, mass: f32) -> Self {
        Self {
            position: rest,
            previous: rest,
            rest,
            force: Vec3::ZERO,
            mass,
            inv_mass: 1.0 / mass,
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Sets the mass and recomputes the inverse mass.
    ///
    /// The caller guarantees `mass` is finite and positive.
    pub fn set_mass(&mut self, mass: f32) {
        debug_assert!(mass.is_finite() && mass > 0.0);
        self.mass = mass;
        self.inv_mass = 1.0 / mass;
    }

    #[inline]
    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Verlet step: `p' = p + (p - prev)(1 - damping) + F/m · dt²`.
    ///
    /// Rolls the position history and clears the accumulated force.
    pub fn integrate(&mut self, dt_sq: f32, damping: f32) {
        let drag = 1.0 - damping;
        let next = self.position
            + (self.position - self.previous) * drag
            + self.force * self.inv_mass * dt_sq;

        self.previous = self.position;
        self.position = next;
        self.force = Vec3::ZERO;
    }

    /// Offset from the undeformed position.
    #[inline]
    pub fn displacement(&self) -> Vec3 {
        self.position - self.rest
    }
}
