//! Where the elements sit in each configuration.
//!
//! Rigid: one element per icosahedron vertex (poles on ±X), facing
//! outward. Cloth: a ring centred on the flag, addressed by `(u, v)` so
//! it follows the deforming surface.

use std::f32::consts::TAU;

use vexil_cloth::FlagDimensions;
use vexil_math::rotation::look_rotation;
use vexil_math::{Pose, Vec3};
use vexil_types::constants::ELEMENT_COUNT;

/// Ratio of the element radius to the flag width.
const ELEMENT_RADIUS_RATIO: f32 = 1.0 / 18.0;
/// Ratio of the polyhedron radius to the element radius.
const POLYHEDRON_SCALE: f32 = 1.29;
/// Ratio of the cloth ring radius to the flag width.
const RING_RADIUS_RATIO: f32 = 1.0 / 3.0;

/// The 12 icosahedron vertices on a sphere of `radius`.
///
/// Order: north pole (+X), its five-vertex ring, south pole (−X), its ring.
pub fn icosahedron_vertices(radius: f32) -> [Vec3; ELEMENT_COUNT] {
    let s5 = 5.0_f32.sqrt();
    let a = 1.0 / s5;
    let outer = ((5.0 + s5) / 10.0).sqrt();
    let inner = ((5.0 - s5) / 10.0).sqrt();
    let lo = (5.0 - s5) / 10.0;
    let hi = (5.0 + s5) / 10.0;

    [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(a, 2.0 * a, 0.0),
        Vec3::new(a, lo, outer),
        Vec3::new(a, -hi, inner),
        Vec3::new(a, -hi, -inner),
        Vec3::new(a, lo, -outer),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(-a, -2.0 * a, 0.0),
        Vec3::new(-a, -lo, -outer),
        Vec3::new(-a, hi, -inner),
        Vec3::new(-a, hi, inner),
        Vec3::new(-a, -lo, outer),
    ]
    .map(|v| v.normalize() * radius)
}

/// Up hint for an element facing outward from `direction`.
///
/// Poles get ∓Y, the hemispheres point their tops toward the opposite pole.
pub fn face_up(direction: Vec3) -> Vec3 {
    let n = direction.normalize_or_zero();
    if n.x > 0.99 {
        Vec3::NEG_Y
    } else if n.x < -0.99 {
        Vec3::Y
    } else if direction.x > 0.0 {
        Vec3::NEG_X
    } else {
        Vec3::X
    }
}

/// Radius of the polyhedron for a flag of this size.
pub fn polyhedron_radius(dims: &FlagDimensions) -> f32 {
    POLYHEDRON_SCALE * dims.width * ELEMENT_RADIUS_RATIO
}

/// Pivot-relative rigid poses, one per icosahedron vertex.
pub fn rigid_layout(dims: &FlagDimensions) -> Vec<Pose> {
    icosahedron_vertices(polyhedron_radius(dims))
        .into_iter()
        .map(|center| Pose::new(center, look_rotation(center, face_up(center))))
        .collect()
}

/// Surface coordinates of `count` elements evenly spaced on a ring,
/// starting straight below the centre and running counter-clockwise.
pub fn cloth_layout(dims: &FlagDimensions, count: usize) -> Vec<(f32, f32)> {
    let radius = dims.width * RING_RADIUS_RATIO;
    (0..count)
        .map(|i| {
            let angle = i as f32 * TAU / count as f32 - TAU / 4.0;
            let point = Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
            dims.surface_coords(point)
        })
        .collect()
}
