//! Row-major 2D scalar grids.
//!
//! A grid of shape `(nx, ny)` stores sample `(i, j)` at flat index
//! `i * ny + j`: the second axis varies fastest. Elevation grids and
//! explicit coordinate grids share this layout.

use serde::{Deserialize, Serialize};
use relief_types::{ReliefError, ReliefResult};

/// A dense 2D grid of `f32` samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarGrid {
    nx: usize,
    ny: usize,
    data: Vec<f32>,
}

/// A grid of elevation samples.
pub type HeightGrid = ScalarGrid;

impl ScalarGrid {
    /// Wraps a row-major sample buffer of shape `(nx, ny)`.
    ///
    /// Fails if `data.len() != nx * ny`. Extents are not checked here;
    /// the mesh builder enforces its own minimum shape.
    pub fn new(nx: usize, ny: usize, data: Vec<f32>) -> ReliefResult<Self> {
        if data.len() != nx * ny {
            return Err(ReliefError::InvalidShape(format!(
                "{} samples cannot form a {}x{} grid",
                data.len(),
                nx,
                ny
            )));
        }
        Ok(Self { nx, ny, data })
    }

    /// Creates a grid filled with zeros.
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            data: vec![0.0; nx * ny],
        }
    }

    /// Creates a grid by evaluating `f(i, j)` at every sample.
    pub fn from_fn(nx: usize, ny: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            for j in 0..ny {
                data.push(f(i, j));
            }
        }
        Self { nx, ny, data }
    }

    /// Creates a grid from nested rows, `rows[i][j]`.
    ///
    /// Fails on ragged input.
    pub fn from_rows(rows: &[Vec<f32>]) -> ReliefResult<Self> {
        let nx = rows.len();
        let ny = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ny) {
            return Err(ReliefError::InvalidShape(format!(
                "row {} has {} samples, expected {}",
                i,
                row.len(),
                ny
            )));
        }
        let data = rows.iter().flatten().copied().collect();
        Ok(Self { nx, ny, data })
    }

    /// Returns `(nx, ny)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Number of samples along the first (slow) axis.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of samples along the second (fast) axis.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the grid has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of sample `(i, j)`.
    #[inline]
    pub fn linear_index(&self, i: usize, j: usize) -> usize {
        i * self.ny + j
    }

    /// Returns sample `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[self.linear_index(i, j)]
    }

    /// Sets sample `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        let k = self.linear_index(i, j);
        self.data[k] = value;
    }

    /// Row `i` as a slice of `ny` samples.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.ny..(i + 1) * self.ny]
    }

    /// All samples in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Minimum and maximum sample, ignoring NaNs.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        relief_math::stats::min_max(&self.data)
    }

    /// Peak-to-peak range of the samples.
    pub fn ptp(&self) -> Option<f32> {
        relief_math::stats::ptp(&self.data)
    }

    /// Returns true if `(i, j)` lies on the outermost ring of samples.
    #[inline]
    pub fn is_border(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 == self.nx || j + 1 == self.ny
    }
}
