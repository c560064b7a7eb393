//! Render buffer the cloth writes into and the host uploads from.
//!
//! Each channel lives in its own contiguous array (`pos_x`, `pos_y`, ...)
//! so the host can hand them to a GPU buffer without repacking. The
//! cloth simulator rewrites positions and normals once per physics step
//! and raises `needs_update`; the host clears it with
//! [`TriangleMesh::take_needs_update`] after uploading.

use serde::{Deserialize, Serialize};
use vexil_math::Vec3;

/// Flag surface in Structure-of-Arrays layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    pub normal_x: Vec<f32>,
    pub normal_y: Vec<f32>,
    pub normal_z: Vec<f32>,

    /// Texture coordinates, `(0, 0)` at the top-left corner of the flag.
    pub uv_u: Vec<f32>,
    pub uv_v: Vec<f32>,

    /// Flat triangle list, three vertex indices per triangle.
    pub indices: Vec<u32>,

    /// Raised when positions or normals changed since the last upload.
    #[serde(skip)]
    pub needs_update: bool,
}

impl TriangleMesh {
    /// Empty buffers sized for a grid of `vertices` and `triangles`.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertices),
            pos_y: Vec::with_capacity(vertices),
            pos_z: Vec::with_capacity(vertices),
            normal_x: Vec::with_capacity(vertices),
            normal_y: Vec::with_capacity(vertices),
            normal_z: Vec::with_capacity(vertices),
            uv_u: Vec::with_capacity(vertices),
            uv_v: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles * 3),
            needs_update: false,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn normal_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    /// Vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Returns the update signal and lowers it.
    pub fn take_needs_update(&mut self) -> bool {
        std::mem::take(&mut self.needs_update)
    }
}
