//! X/Y coordinates for heightmap vertices.

use relief_math::lattice::{linspace, meshgrid_ij};
use relief_types::{ReliefError, ReliefResult};

use crate::grid::ScalarGrid;

/// Source of the horizontal vertex coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub enum Coordinates<'a> {
    /// Uniform lattice over `[0, nx/max(nx,ny)] × [0, ny/max(nx,ny)]`.
    #[default]
    Synthesized,
    /// 1D axis vectors of lengths `nx` and `ny`, expanded with "ij" indexing.
    Axes { x: &'a [f32], y: &'a [f32] },
    /// Full coordinate grids with the same shape as the height grid.
    Grids { x: &'a ScalarGrid, y: &'a ScalarGrid },
}

impl Coordinates<'_> {
    /// Produces flat row-major X and Y buffers for an `(nx, ny)` grid.
    ///
    /// Mismatched axis lengths or grid shapes are rejected.
    pub fn resolve(&self, nx: usize, ny: usize) -> ReliefResult<(Vec<f32>, Vec<f32>)> {
        match *self {
            Coordinates::Synthesized => {
                let extent = nx.max(ny) as f32;
                let x = linspace(0.0, nx as f32 / extent, nx);
                let y = linspace(0.0, ny as f32 / extent, ny);
                Ok(meshgrid_ij(&x, &y))
            }
            Coordinates::Axes { x, y } => {
                if x.len() != nx || y.len() != ny {
                    return Err(ReliefError::InvalidShape(format!(
                        "axis lengths ({}, {}) do not match grid shape ({}, {})",
                        x.len(),
                        y.len(),
                        nx,
                        ny
                    )));
                }
                Ok(meshgrid_ij(x, y))
            }
            Coordinates::Grids { x, y } => {
                for (name, g) in [("x", x), ("y", y)] {
                    if g.shape() != (nx, ny) {
                        let (gx, gy) = g.shape();
                        return Err(ReliefError::InvalidShape(format!(
                            "{name} coordinate grid is {gx}x{gy}, height grid is {nx}x{ny}"
                        )));
                    }
                }
                Ok((x.as_slice().to_vec(), y.as_slice().to_vec()))
            }
        }
    }
}
