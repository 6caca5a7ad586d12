//! Grid and mesh validation.
//!
//! Runs before export or rendering so that bad input fails with a clear
//! diagnostic instead of a garbled image.

use relief_mesh::{HeightGrid, Topology, TriangleMesh};
use relief_types::constants::MIN_GRID_EXTENT;
use relief_types::{ReliefError, ReliefResult};

/// Validates a height grid.
///
/// Checks:
/// - Both extents are at least 2
/// - Every sample is finite
pub fn validate_grid(grid: &HeightGrid) -> ReliefResult<()> {
    let (nx, ny) = grid.shape();
    if nx < MIN_GRID_EXTENT || ny < MIN_GRID_EXTENT {
        return Err(ReliefError::InvalidShape(format!(
            "height grid is {nx}x{ny}; both extents must be >= {MIN_GRID_EXTENT}"
        )));
    }
    if let Some(k) = grid.as_slice().iter().position(|v| !v.is_finite()) {
        return Err(ReliefError::InvalidShape(format!(
            "sample ({}, {}) is not finite",
            k / ny,
            k % ny
        )));
    }
    Ok(())
}

/// Validates a mesh built from an `nx × ny` grid.
///
/// Checks:
/// - Mesh integrity (SoA consistency, valid indices)
/// - Vertex and triangle counts match the grid
/// - Every edge is shared by at most two triangles
/// - Adjacent triangles wind the same way
pub fn validate_height_mesh(mesh: &TriangleMesh, nx: usize, ny: usize) -> ReliefResult<()> {
    mesh.validate()?;

    let expected_vertices = nx * ny;
    if mesh.vertex_count() != expected_vertices {
        return Err(ReliefError::InvalidMesh(format!(
            "Vertex count ({}) != grid size {nx}x{ny}",
            mesh.vertex_count()
        )));
    }
    let expected_triangles = 2 * nx.saturating_sub(1) * ny.saturating_sub(1);
    if mesh.triangle_count() != expected_triangles {
        return Err(ReliefError::InvalidMesh(format!(
            "Triangle count ({}) != expected ({expected_triangles})",
            mesh.triangle_count()
        )));
    }

    let topo = Topology::build(mesh);
    if !topo.is_manifold() {
        return Err(ReliefError::InvalidMesh(
            "Mesh has edges shared by more than two triangles".into(),
        ));
    }
    if !topo.is_consistently_oriented(mesh) {
        return Err(ReliefError::InvalidMesh(
            "Adjacent triangles have opposite winding".into(),
        ));
    }

    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        boundary_edges = topo.boundary_edge_count(),
        "mesh validated"
    );
    Ok(())
}
