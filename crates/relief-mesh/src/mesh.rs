//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! Renderers that want interleaved `[x, y, z]` records use
//! [`TriangleMesh::positions_interleaved`].

use serde::{Deserialize, Serialize};
use relief_math::Vec3;
use relief_types::{ReliefError, ReliefResult};

/// A triangle mesh stored in Structure-of-Arrays layout.
///
/// All position, normal, and UV data is stored in separate per-channel
/// contiguous arrays. Triangle indices reference into these arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    // --- Vertex data (SoA) ---
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// X components of vertex normals.
    pub normal_x: Vec<f32>,
    /// Y components of vertex normals.
    pub normal_y: Vec<f32>,
    /// Z components of vertex normals.
    pub normal_z: Vec<f32>,

    /// U texture coordinates.
    pub uv_u: Vec<f32>,
    /// V texture coordinates.
    pub uv_v: Vec<f32>,

    // --- Triangle data ---
    /// Triangle indices: each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the normal of vertex `i` as a `glam::Vec3`.
    #[inline]
    pub fn normal_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns the three corner positions of triangle `t`.
    #[inline]
    pub fn triangle_positions(&self, t: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangle(t);
        [
            self.position_vec3(a as usize),
            self.position_vec3(b as usize),
            self.position_vec3(c as usize),
        ]
    }

    /// Area of triangle `t`.
    pub fn triangle_area(&self, t: usize) -> f32 {
        let [p0, p1, p2] = self.triangle_positions(t);
        0.5 * (p1 - p0).cross(p2 - p0).length()
    }

    /// Signed area of triangle `t` projected onto the XY plane.
    ///
    /// Positive for counter-clockwise winding seen from +Z.
    pub fn signed_area_xy(&self, t: usize) -> f32 {
        let [p0, p1, p2] = self.triangle_positions(t);
        0.5 * ((p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y))
    }

    /// Positions as interleaved `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn positions_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * 3);
        for i in 0..self.vertex_count() {
            out.extend_from_slice(&self.position(i));
        }
        out
    }

    /// Positions as `[x, y, z]` records.
    pub fn positions_array(&self) -> Vec<[f32; 3]> {
        (0..self.vertex_count()).map(|i| self.position(i)).collect()
    }

    /// Normals as `[x, y, z]` records.
    pub fn normals_array(&self) -> Vec<[f32; 3]> {
        (0..self.vertex_count())
            .map(|i| [self.normal_x[i], self.normal_y[i], self.normal_z[i]])
            .collect()
    }

    /// UVs as `[u, v]` records.
    pub fn uvs_array(&self) -> Vec<[f32; 2]> {
        (0..self.vertex_count())
            .map(|i| [self.uv_u[i], self.uv_v[i]])
            .collect()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.vertex_count() == 0 {
            return None;
        }
        let mut lo = Vec3::splat(f32::INFINITY);
        let mut hi = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..self.vertex_count() {
            let p = self.position_vec3(i);
            lo = lo.min(p);
            hi = hi.max(p);
        }
        Some((lo, hi))
    }

    /// Mean of all vertex positions, or `None` for an empty mesh.
    pub fn vertex_mean(&self) -> Option<Vec3> {
        let n = self.vertex_count();
        if n == 0 {
            return None;
        }
        let mut sum = [0.0_f64; 3];
        for i in 0..n {
            sum[0] += self.pos_x[i] as f64;
            sum[1] += self.pos_y[i] as f64;
            sum[2] += self.pos_z[i] as f64;
        }
        let inv = 1.0 / n as f64;
        Some(Vec3::new(
            (sum[0] * inv) as f32,
            (sum[1] * inv) as f32,
            (sum[2] * inv) as f32,
        ))
    }

    /// Geometric centroid of the surface.
    ///
    /// Triangle centres weighted by triangle area. Falls back to the
    /// vertex mean when the surface has zero total area. `None` only for
    /// a mesh without vertices.
    pub fn centroid(&self) -> Option<Vec3> {
        let mut weighted = [0.0_f64; 3];
        let mut total_area = 0.0_f64;
        for t in 0..self.triangle_count() {
            let [p0, p1, p2] = self.triangle_positions(t);
            let area = self.triangle_area(t) as f64;
            let c = (p0 + p1 + p2) / 3.0;
            weighted[0] += c.x as f64 * area;
            weighted[1] += c.y as f64 * area;
            weighted[2] += c.z as f64 * area;
            total_area += area;
        }
        if total_area > f64::EPSILON {
            Some(Vec3::new(
                (weighted[0] / total_area) as f32,
                (weighted[1] / total_area) as f32,
                (weighted[2] / total_area) as f32,
            ))
        } else {
            self.vertex_mean()
        }
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            normal_x: Vec::with_capacity(vertex_capacity),
            normal_y: Vec::with_capacity(vertex_capacity),
            normal_z: Vec::with_capacity(vertex_capacity),
            uv_u: Vec::with_capacity(vertex_capacity),
            uv_v: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Triangle indices are within bounds
    /// - No triangle repeats a vertex index
    pub fn validate(&self) -> ReliefResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(ReliefError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }
        if self.normal_x.len() != n || self.normal_y.len() != n || self.normal_z.len() != n {
            return Err(ReliefError::InvalidMesh(
                "Normal arrays have inconsistent lengths".into(),
            ));
        }
        if self.uv_u.len() != n || self.uv_v.len() != n {
            return Err(ReliefError::InvalidMesh(
                "UV arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(ReliefError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(ReliefError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(ReliefError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved AoS position data.
    ///
    /// Converts `[x0, y0, z0, x1, y1, z1, ...]` to SoA layout. UVs are
    /// taken from `uvs` when it holds one pair per vertex, otherwise
    /// zero-filled. Normals start at zero; see
    /// [`compute_vertex_normals`](crate::normals::compute_vertex_normals).
    pub fn from_interleaved(
        positions: &[f32],
        indices: &[u32],
        uvs: &[f32],
    ) -> ReliefResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(ReliefError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);

        for p in positions.chunks_exact(3) {
            mesh.pos_x.push(p[0]);
            mesh.pos_y.push(p[1]);
            mesh.pos_z.push(p[2]);
        }

        if uvs.len() == n * 2 {
            for uv in uvs.chunks_exact(2) {
                mesh.uv_u.push(uv[0]);
                mesh.uv_v.push(uv[1]);
            }
        } else {
            mesh.uv_u.resize(n, 0.0);
            mesh.uv_v.resize(n, 0.0);
        }

        mesh.normal_x.resize(n, 0.0);
        mesh.normal_y.resize(n, 0.0);
        mesh.normal_z.resize(n, 0.0);

        mesh.indices = indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }

    /// Returns a copy translated by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        let mut out = self.clone();
        out.pos_x.iter_mut().for_each(|x| *x += offset.x);
        out.pos_y.iter_mut().for_each(|y| *y += offset.y);
        out.pos_z.iter_mut().for_each(|z| *z += offset.z);
        out
    }
}
