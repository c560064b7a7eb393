//! The rigid pivot: a spring-damped frame carrying the polyhedron.
//!
//! Position springs back to a rest point after a click kick; orientation
//! eases toward a target that auto-rotation and pointer drags steer.

use vexil_math::rotation::trackball_delta;
use vexil_math::{Pose, Quat, Vec2, Vec3};
use vexil_types::constants::DEFAULT_FRAME_DT;

use crate::config::PivotConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct RigidPivot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Quat,
    /// Orientation the pivot eases toward.
    pub target: Quat,
    auto_rotate: bool,
    config: PivotConfig,
}

impl RigidPivot {
    /// A pivot at rest with identity orientation and auto-rotation on.
    pub fn new(config: PivotConfig) -> Self {
        Self {
            position: config.rest_position,
            velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            target: Quat::IDENTITY,
            auto_rotate: true,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &PivotConfig {
        &self.config
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.orientation)
    }

    #[inline]
    pub fn auto_rotate_enabled(&self) -> bool {
        self.auto_rotate
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// One spring tick plus orientation easing.
    pub fn update(&mut self) {
        let c = &self.config;
        self.velocity += (c.rest_position - self.position) * c.spring_strength;
        self.velocity *= c.spring_damping;
        self.position += self.velocity;

        self.orientation = self
            .orientation
            .slerp(self.target, c.orientation_smoothing)
            .normalize();
    }

    /// Recoil from a click at `point`: the pivot is pushed away from it.
    pub fn kick(&mut self, point: Vec3) {
        let push = (point - self.position) * self.config.push_strength;
        self.velocity -= push;
        tracing::debug!(?point, velocity = ?self.velocity, "pivot kicked");
    }

    /// Yaws the target about world Y, scaled to a nominal 16 ms frame.
    ///
    /// Does nothing unless `active` and auto-rotation is enabled.
    pub fn auto_rotate(&mut self, dt: f32, active: bool) {
        if !(active && self.auto_rotate) {
            return;
        }
        let angle = self.config.auto_rotate_speed * (dt / DEFAULT_FRAME_DT);
        self.target = (Quat::from_rotation_y(angle) * self.target).normalize();
    }

    /// Trackball rotation of the target for a pointer move of `delta`
    /// pixels over a viewport of `viewport` pixels.
    pub fn drag(&mut self, delta: Vec2, viewport: Vec2) {
        let w = viewport.x.max(1.0);
        let h = viewport.y.max(1.0);
        let rotation = trackball_delta(delta.x / w, delta.y / h, self.config.drag_speed);
        self.target = (rotation * self.target).normalize();
    }
}

impl Default for RigidPivot {
    fn default() -> Self {
        Self::new(PivotConfig::default())
    }
}
