//! Raw heightmap files.
//!
//! A raw heightmap is a headerless run of little-endian `f32` samples
//! describing a square `n × n` grid in row-major order.

use std::fs;
use std::path::Path;

use relief_mesh::HeightGrid;
use relief_types::constants::MIN_GRID_EXTENT;
use relief_types::{ReliefError, ReliefResult};

const SAMPLE_BYTES: usize = std::mem::size_of::<f32>();

/// Integer square root, or `None` when `count` is not a perfect square.
fn exact_sqrt(count: usize) -> Option<usize> {
    let mut n = (count as f64).sqrt() as usize;
    while n * n > count {
        n -= 1;
    }
    while (n + 1) * (n + 1) <= count {
        n += 1;
    }
    (n * n == count).then_some(n)
}

/// Decodes raw bytes into a square height grid.
pub fn decode_raw_heightmap(bytes: &[u8]) -> ReliefResult<HeightGrid> {
    if bytes.len() % SAMPLE_BYTES != 0 {
        return Err(ReliefError::InvalidShape(format!(
            "raw heightmap length {} is not a multiple of {SAMPLE_BYTES} bytes",
            bytes.len()
        )));
    }
    let count = bytes.len() / SAMPLE_BYTES;
    let n = exact_sqrt(count).ok_or_else(|| {
        ReliefError::InvalidShape(format!(
            "raw heightmap holds {count} samples, which is not a square grid"
        ))
    })?;
    if n < MIN_GRID_EXTENT {
        return Err(ReliefError::InvalidShape(format!(
            "raw heightmap is {n}x{n}; at least {MIN_GRID_EXTENT}x{MIN_GRID_EXTENT} is required"
        )));
    }

    let data = bytes
        .chunks_exact(SAMPLE_BYTES)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    HeightGrid::new(n, n, data)
}

/// Reads a raw heightmap file.
pub fn read_raw_heightmap(path: impl AsRef<Path>) -> ReliefResult<HeightGrid> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let grid = decode_raw_heightmap(&bytes)?;
    tracing::debug!(path = %path.display(), nx = grid.nx(), ny = grid.ny(), "read raw heightmap");
    Ok(grid)
}

/// Writes a grid as a raw heightmap file.
///
/// Only square grids can be read back.
pub fn write_raw_heightmap(path: impl AsRef<Path>, grid: &HeightGrid) -> ReliefResult<()> {
    let bytes: Vec<u8> = grid
        .as_slice()
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    fs::write(path, bytes)?;
    Ok(())
}
