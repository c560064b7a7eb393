//! Per-element pose blending between the cloth and the polyhedron.

use vexil_cloth::Surface;
use vexil_math::rotation::align_z_to;
use vexil_math::{ease_in_out_quint, Pose};

use crate::config::MorphConfig;
use crate::element::AnimatedElement;
use crate::transition::TransitionController;

/// Element-local progress for a global `progress`.
///
/// Element `rank` of `count` waits `rank / count · stagger_fraction`, then
/// sweeps 0 → 1 over the remaining `1 - stagger_fraction`.
pub fn staggered_progress(progress: f32, rank: usize, count: usize, stagger_fraction: f32) -> f32 {
    let delay = (rank as f32 / count.max(1) as f32) * stagger_fraction;
    ((progress - delay) / (1.0 - stagger_fraction)).clamp(0.0, 1.0)
}

/// Pose of an element riding the cloth at `uv`: lifted `offset` along the
/// sampled normal, with its +Z turned onto that normal.
pub fn cloth_pose<S: Surface + ?Sized>(surface: &S, uv: (f32, f32), offset: f32) -> Pose {
    let sample = surface.sample(uv.0, uv.1);
    Pose::new(
        sample.position + sample.normal * offset,
        align_z_to(sample.normal),
    )
}

/// World pose of a pivot-relative rigid pose.
#[inline]
pub fn rigid_pose(local: &Pose, pivot: &Pose) -> Pose {
    local.transformed_by(pivot)
}

/// The pose to write for `element` this tick.
///
/// While animating, the cloth and rigid poses are blended by the eased,
/// staggered progress. At rest only the active configuration is
/// evaluated.
pub fn element_pose<S: Surface + ?Sized>(
    element: &AnimatedElement,
    count: usize,
    surface: &S,
    pivot: &Pose,
    controller: &TransitionController,
    config: &MorphConfig,
) -> Pose {
    if controller.is_animating() {
        let local = staggered_progress(
            controller.progress(),
            element.stagger_index,
            count,
            config.stagger_fraction,
        );
        let t = ease_in_out_quint(local);
        let cloth = cloth_pose(surface, element.uv, config.surface_offset);
        cloth.blend(&rigid_pose(&element.rigid, pivot), t)
    } else if controller.is_rigid() {
        rigid_pose(&element.rigid, pivot)
    } else {
        cloth_pose(surface, element.uv, config.surface_offset)
    }
}
