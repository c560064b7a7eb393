//! Surface sampling over the particle grid.
//!
//! Recovers a position and normal at an arbitrary `(u, v)` by bilinear
//! interpolation of the four surrounding particles. The normal is a flat
//! per-cell estimate; it orients elements riding on the cloth and is not
//! used for shading.

use vexil_math::Vec3;

use crate::network::ConstraintNetwork;

/// Position and unit normal at a surface coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub position: Vec3,
    pub normal: Vec3,
}

/// A deformable surface addressable by `(u, v) ∈ [0, 1]²`.
pub trait Surface {
    /// Samples the surface. Out-of-range coordinates are clamped, never
    /// rejected; sampling never mutates the surface.
    fn sample(&self, u: f32, v: f32) -> SurfaceSample;
}

/// Clamps to `[0, 1]`, mapping NaN to 0.
#[inline]
fn clamp_unit(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

impl Surface for ConstraintNetwork {
    fn sample(&self, u: f32, v: f32) -> SurfaceSample {
        let (w, h) = (self.cols(), self.rows());
        let x = clamp_unit(u) * w as f32;
        let y = clamp_unit(v) * h as f32;

        let x0 = (x.floor() as usize).min(w);
        let y0 = (y.floor() as usize).min(h);
        let x1 = (x0 + 1).min(w);
        let y1 = (y0 + 1).min(h);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let p00 = self.grid_position(x0, y0);
        let p10 = self.grid_position(x1, y0);
        let p01 = self.grid_position(x0, y1);
        let p11 = self.grid_position(x1, y1);

        let top = p00.lerp(p10, fx);
        let bottom = p01.lerp(p11, fx);
        let position = top.lerp(bottom, fy);

        // On the far boundary the cell collapses; borrow the last full cell.
        let cx = x0.min(w - 1);
        let cy = y0.min(h - 1);
        let origin = self.grid_position(cx, cy);
        let along_u = self.grid_position(cx + 1, cy) - origin;
        let along_v = self.grid_position(cx, cy + 1) - origin;

        // Rows run down the flag, so v × u faces +Z on the rest shape.
        let normal = along_v.cross(along_u).normalize_or_zero();
        let normal = if normal == Vec3::ZERO { Vec3::Z } else { normal };

        SurfaceSample { position, normal }
    }
}
