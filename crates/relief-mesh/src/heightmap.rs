//! Heightmap → triangle mesh conversion.
//!
//! Each unit quad of the grid is split into two triangles with a fixed
//! index pattern, so every triangle of a grid with increasing X/Y axes
//! winds counter-clockwise seen from +Z and a single smooth-normal pass
//! yields upward-facing normals.

use relief_types::constants::{MIN_GRID_EXTENT, SKIRT_DEPTH_FRACTION};
use relief_types::{ReliefError, ReliefResult};

use crate::coords::Coordinates;
use crate::grid::HeightGrid;
use crate::mesh::TriangleMesh;
use crate::normals::compute_vertex_normals;

/// The result of a heightmap conversion.
#[derive(Debug, Clone)]
pub struct HeightMesh {
    /// The triangulated surface.
    pub mesh: TriangleMesh,
    /// Elevations actually used for the vertices.
    ///
    /// Equal to the input grid unless a skirt was applied, in which case
    /// this is the skirted copy. The caller's grid is never modified.
    pub heights: HeightGrid,
    /// Floor elevation of the skirt, if one was applied.
    pub skirt_floor: Option<f32>,
}

/// Skirt floor for a set of elevations: `min - 0.05 * (max - min)`.
///
/// `None` when there are no non-NaN samples.
pub fn skirt_floor(values: &[f32]) -> Option<f32> {
    relief_math::stats::min_max(values).map(|(lo, hi)| lo - SKIRT_DEPTH_FRACTION * (hi - lo))
}

/// Overwrites the four border rows/columns of `grid` with the skirt floor.
///
/// The floor is computed from the grid before any sample is modified and
/// is returned. This mutates the caller's grid; [`build_mesh`] works on a
/// private copy instead.
pub fn apply_skirt(grid: &mut HeightGrid) -> ReliefResult<f32> {
    let floor = skirt_floor(grid.as_slice()).ok_or_else(|| {
        ReliefError::InvalidShape("cannot apply a skirt: every sample is NaN".into())
    })?;

    let (nx, ny) = grid.shape();
    for j in 0..ny {
        grid.set(0, j, floor);
        grid.set(nx - 1, j, floor);
    }
    for i in 0..nx {
        grid.set(i, 0, floor);
        grid.set(i, ny - 1, floor);
    }
    Ok(floor)
}

/// Triangle indices for an `(nx, ny)` vertex grid.
///
/// For each cell with base index `b = i*ny + j` the two triangles are
/// `[b, b+ny+1, b+1]` and `[b, b+ny, b+ny+1]`, giving `2*(nx-1)*(ny-1)`
/// triangles in total.
pub fn grid_faces(nx: usize, ny: usize) -> Vec<u32> {
    let cells = nx.saturating_sub(1) * ny.saturating_sub(1);
    let mut indices = Vec::with_capacity(cells * 6);
    let stride = ny as u32;

    for i in 0..nx.saturating_sub(1) {
        let row = (i * ny) as u32;
        for j in 0..ny.saturating_sub(1) {
            let b = row + j as u32;

            indices.push(b);
            indices.push(b + stride + 1);
            indices.push(b + 1);

            indices.push(b);
            indices.push(b + stride);
            indices.push(b + stride + 1);
        }
    }

    indices
}

fn check_shape(nx: usize, ny: usize) -> ReliefResult<()> {
    if nx < MIN_GRID_EXTENT || ny < MIN_GRID_EXTENT {
        return Err(ReliefError::InvalidShape(format!(
            "height grid is {nx}x{ny}, need at least {MIN_GRID_EXTENT}x{MIN_GRID_EXTENT}"
        )));
    }
    if nx.checked_mul(ny).map_or(true, |n| n > u32::MAX as usize) {
        return Err(ReliefError::InvalidShape(format!(
            "height grid {nx}x{ny} has too many vertices for 32-bit indices"
        )));
    }
    Ok(())
}

/// Converts a height grid into a triangle mesh.
///
/// # Arguments
/// - `heights`: Elevations, shape `(nx, ny)` with `nx, ny >= 2`.
/// - `coords`: Source of X/Y; see [`Coordinates`].
/// - `add_skirt`: Drop the border samples to a common floor so the mesh
///   is closed when viewed from the side.
///
/// The mesh has `nx*ny` vertices in grid order and `2*(nx-1)*(ny-1)`
/// triangles. Smooth vertex normals are computed; UVs are the normalized
/// lattice position.
///
/// # Example
/// ```
/// use relief_mesh::{build_mesh, Coordinates, HeightGrid};
/// let grid = HeightGrid::zeros(3, 4);
/// let out = build_mesh(&grid, Coordinates::Synthesized, true).unwrap();
/// assert_eq!(out.mesh.vertex_count(), 12);
/// assert_eq!(out.mesh.triangle_count(), 12);
/// ```
pub fn build_mesh(
    heights: &HeightGrid,
    coords: Coordinates<'_>,
    add_skirt: bool,
) -> ReliefResult<HeightMesh> {
    let (nx, ny) = heights.shape();
    check_shape(nx, ny)?;

    let mut z = heights.clone();
    let skirt_floor = if add_skirt {
        let floor = apply_skirt(&mut z)?;
        tracing::debug!(floor, "applied skirt");
        Some(floor)
    } else {
        None
    };

    let (x, y) = coords.resolve(nx, ny)?;

    let vertex_count = nx * ny;
    let mut positions = Vec::with_capacity(vertex_count * 3);
    let mut uvs = Vec::with_capacity(vertex_count * 2);
    let du = 1.0 / (nx - 1) as f32;
    let dv = 1.0 / (ny - 1) as f32;
    for i in 0..nx {
        for j in 0..ny {
            let k = z.linear_index(i, j);
            positions.push(x[k]);
            positions.push(y[k]);
            positions.push(z.as_slice()[k]);
            uvs.push(i as f32 * du);
            uvs.push(j as f32 * dv);
        }
    }

    let indices = grid_faces(nx, ny);
    let mut mesh = TriangleMesh::from_interleaved(&positions, &indices, &uvs)?;
    compute_vertex_normals(&mut mesh);

    tracing::debug!(
        nx,
        ny,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "built heightmap mesh"
    );

    Ok(HeightMesh {
        mesh,
        heights: z,
        skirt_floor,
    })
}

/// Converts a height grid with synthesized coordinates and a skirt.
pub fn heightmap_to_mesh(heights: &HeightGrid) -> ReliefResult<TriangleMesh> {
    build_mesh(heights, Coordinates::Synthesized, true).map(|out| out.mesh)
}
