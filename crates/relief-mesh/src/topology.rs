//! Mesh topology queries.
//!
//! Builds edge adjacency from the triangle index buffer. Used to check
//! that a heightmap triangulation is a manifold quad-grid split and that
//! neighbouring triangles agree on winding.

use std::collections::HashMap;

use crate::mesh::TriangleMesh;

/// Precomputed topology information for a triangle mesh.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the list of triangles that contain it.
    pub vertex_triangles: Vec<Vec<u32>>,

    /// Unique edges as `(v_min, v_max)` pairs, sorted.
    pub edges: Vec<[u32; 2]>,

    /// For each edge, the adjacent triangles.
    /// Boundary edges have exactly 1 adjacent triangle.
    pub edge_triangles: Vec<Vec<u32>>,
}

impl Topology {
    /// Build topology from a triangle mesh.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let tri_count = mesh.triangle_count();

        let mut vertex_triangles: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        // Key: (min_vertex, max_vertex) to canonicalize edge direction
        let mut edge_map: HashMap<(u32, u32), Vec<u32>> = HashMap::new();

        for t in 0..tri_count {
            let [a, b, c] = mesh.triangle(t);
            vertex_triangles[a as usize].push(t as u32);
            vertex_triangles[b as usize].push(t as u32);
            vertex_triangles[c as usize].push(t as u32);

            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                edge_map.entry(key).or_default().push(t as u32);
            }
        }

        let mut sorted: Vec<_> = edge_map.into_iter().collect();
        sorted.sort_unstable_by_key(|(key, _)| *key);

        let (edges, edge_triangles) = sorted
            .into_iter()
            .map(|((v0, v1), tris)| ([v0, v1], tris))
            .unzip();

        Self {
            vertex_triangles,
            edges,
            edge_triangles,
        }
    }

    /// Returns the number of boundary edges (edges with only 1 adjacent triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_triangles
            .iter()
            .filter(|tris| tris.len() == 1)
            .count()
    }

    /// Returns the number of interior edges (exactly 2 adjacent triangles).
    pub fn interior_edge_count(&self) -> usize {
        self.edge_triangles
            .iter()
            .filter(|tris| tris.len() == 2)
            .count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }

    /// Returns true if no edge is shared by more than two triangles.
    pub fn is_manifold(&self) -> bool {
        self.edge_triangles.iter().all(|tris| tris.len() <= 2)
    }

    /// Edges shared by triangles `t0` and `t1`.
    pub fn shared_edges(mesh: &TriangleMesh, t0: usize, t1: usize) -> Vec<[u32; 2]> {
        let edges_of = |t: usize| {
            let [a, b, c] = mesh.triangle(t);
            [(a, b), (b, c), (c, a)].map(|(u, v)| if u < v { [u, v] } else { [v, u] })
        };
        let e1 = edges_of(t1);
        edges_of(t0).into_iter().filter(|e| e1.contains(e)).collect()
    }

    /// Returns true if every interior edge is traversed in opposite
    /// directions by its two triangles, i.e. neighbours share one winding.
    pub fn is_consistently_oriented(&self, mesh: &TriangleMesh) -> bool {
        self.edges
            .iter()
            .zip(&self.edge_triangles)
            .filter(|(_, tris)| tris.len() == 2)
            .all(|(&[v0, v1], tris)| {
                let forward = |t: u32| {
                    let [a, b, c] = mesh.triangle(t as usize);
                    [(a, b), (b, c), (c, a)].contains(&(v0, v1))
                };
                forward(tris[0]) != forward(tris[1])
            })
    }
}
