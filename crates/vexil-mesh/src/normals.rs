//! Vertex normal computation from triangle mesh data.

use vexil_math::Vec3;

use crate::mesh::TriangleMesh;

/// Recompute vertex normals from triangle geometry (area-weighted).
///
/// Each triangle's unnormalized face normal (magnitude = twice its area)
/// is accumulated at its three vertices, then every vertex normal is
/// normalized. Vertices touching only degenerate triangles keep a zero
/// normal.
pub fn compute_vertex_normals(mesh: &mut TriangleMesh) {
    let n = mesh.vertex_count();
    let mut accum = vec![Vec3::ZERO; n];

    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t).map(|i| i as usize);

        let pa = mesh.position_vec3(a);
        let e1 = mesh.position_vec3(b) - pa;
        let e2 = mesh.position_vec3(c) - pa;
        let face = e1.cross(e2);

        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }

    for (i, sum) in accum.into_iter().enumerate() {
        let normal = if sum.length_squared() > 1e-20 {
            sum.normalize()
        } else {
            Vec3::ZERO
        };
        mesh.normal_x[i] = normal.x;
        mesh.normal_y[i] = normal.y;
        mesh.normal_z[i] = normal.z;
    }
}
