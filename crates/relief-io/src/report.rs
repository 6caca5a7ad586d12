//! Heightmap summaries for inspection tooling.

use std::fmt;

use serde::{Deserialize, Serialize};
use relief_math::stats;
use relief_mesh::{build_mesh, Coordinates, HeightGrid, Topology};
use relief_types::ReliefResult;

/// Summary of a height grid and the mesh built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightmapReport {
    pub nx: usize,
    pub ny: usize,
    pub min: f32,
    pub max: f32,
    pub ptp: f32,
    pub mean: f32,
    /// Border elevation after skirting; `None` when no skirt was applied.
    pub skirt_floor: Option<f32>,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub boundary_edges: usize,
}

impl HeightmapReport {
    /// Builds the mesh for `grid` and summarizes both.
    pub fn from_grid(grid: &HeightGrid, add_skirt: bool) -> ReliefResult<Self> {
        let built = build_mesh(grid, Coordinates::Synthesized, add_skirt)?;
        let topo = Topology::build(&built.mesh);
        let (min, max) = stats::min_max(grid.as_slice()).unwrap_or((f32::NAN, f32::NAN));
        Ok(Self {
            nx: grid.nx(),
            ny: grid.ny(),
            min,
            max,
            ptp: max - min,
            mean: stats::mean(grid.as_slice()).unwrap_or(f32::NAN),
            skirt_floor: built.skirt_floor,
            vertex_count: built.mesh.vertex_count(),
            triangle_count: built.mesh.triangle_count(),
            boundary_edges: topo.boundary_edge_count(),
        })
    }
}

impl fmt::Display for HeightmapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid:       {} x {}", self.nx, self.ny)?;
        writeln!(f, "Elevation:  min {:.4}, max {:.4}, ptp {:.4}", self.min, self.max, self.ptp)?;
        writeln!(f, "Mean:       {:.4}", self.mean)?;
        match self.skirt_floor {
            Some(floor) => writeln!(f, "Skirt:      {floor:.4}")?,
            None => writeln!(f, "Skirt:      none")?,
        }
        writeln!(f, "Vertices:   {}", self.vertex_count)?;
        writeln!(f, "Triangles:  {}", self.triangle_count)?;
        write!(f, "Boundary:   {} edges", self.boundary_edges)
    }
}
