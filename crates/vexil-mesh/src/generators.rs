//! Procedural grid generator for the flag surface.

use crate::mesh::TriangleMesh;

/// Generates a flat rectangular grid in the XY plane, facing +Z.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]`
/// in Y. Vertex `(i, j)` lives at index `i + j * (cols + 1)`, with column
/// `i` running left to right and row `j` running top to bottom: the same
/// ordering the cloth particle grid uses, so buffers map one-to-one.
///
/// # Example
/// ```
/// use vexil_mesh::generators::flag_grid;
/// let mesh = flag_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn flag_grid(cols: usize, rows: usize, width: f32, height: f32) -> TriangleMesh {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_y, cols * rows * 2);

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;

            mesh.pos_x.push(-half_w + u * width);
            mesh.pos_y.push(half_h - v * height); // Top to bottom
            mesh.pos_z.push(0.0);

            mesh.normal_x.push(0.0);
            mesh.normal_y.push(0.0);
            mesh.normal_z.push(1.0);

            mesh.uv_u.push(u);
            mesh.uv_v.push(v);
        }
    }

    // Two triangles per quad, wound so face normals point along +Z
    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            mesh.indices.extend_from_slice(&[top_left, bot_left, top_right]);
            mesh.indices.extend_from_slice(&[top_right, bot_left, bot_right]);
        }
    }

    mesh
}
