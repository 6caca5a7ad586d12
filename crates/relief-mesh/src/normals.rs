//! Smooth vertex normals.
//!
//! Area-weighted: each triangle's unnormalized cross product is added to
//! its three corners, then every vertex normal is normalized. Both the
//! software rasterizer and the interactive viewer shade with these.

use relief_math::Vec3;

use crate::mesh::TriangleMesh;

/// Normal assigned to vertices whose adjacent triangles all have zero area.
pub const FALLBACK_NORMAL: Vec3 = Vec3::Z;

/// Unnormalized face normal of triangle `t` (length = 2 × area).
#[inline]
pub fn face_normal(mesh: &TriangleMesh, t: usize) -> Vec3 {
    let [p0, p1, p2] = mesh.triangle_positions(t);
    (p1 - p0).cross(p2 - p0)
}

/// Recompute vertex normals from triangle geometry (area-weighted).
///
/// This modifies the mesh's `normal_x`, `normal_y`, `normal_z` arrays in
/// place. Vertices with no usable adjacent area get [`FALLBACK_NORMAL`].
pub fn compute_vertex_normals(mesh: &mut TriangleMesh) {
    let n = mesh.vertex_count();
    let mut acc = vec![Vec3::ZERO; n];

    for t in 0..mesh.triangle_count() {
        let normal = face_normal(mesh, t);
        for v in mesh.triangle(t) {
            acc[v as usize] += normal;
        }
    }

    mesh.normal_x.resize(n, 0.0);
    mesh.normal_y.resize(n, 0.0);
    mesh.normal_z.resize(n, 0.0);

    for (i, sum) in acc.into_iter().enumerate() {
        let normal = if sum.length_squared() > 1e-20 {
            sum.normalize()
        } else {
            FALLBACK_NORMAL
        };
        mesh.normal_x[i] = normal.x;
        mesh.normal_y[i] = normal.y;
        mesh.normal_z[i] = normal.z;
    }
}
