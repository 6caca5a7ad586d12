//! Uniform lattices and outer-product coordinate grids.

/// Returns `n` evenly spaced samples over `[start, stop]`, endpoints included.
///
/// Matches the usual `linspace` convention: `n == 1` yields `[start]`
/// and `n == 0` yields an empty vector.
pub fn linspace(start: f32, stop: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f32;
            (0..n)
                .map(|k| if k == n - 1 { stop } else { start + step * k as f32 })
                .collect()
        }
    }
}

/// Expands two axis vectors into full coordinate grids with "ij" indexing.
///
/// The grids have shape `(x.len(), y.len())` stored row-major, so the
/// sample at `(i, j)` lives at `i * y.len() + j`. Returns `(gx, gy)` with
/// `gx[i*ny + j] = x[i]` and `gy[i*ny + j] = y[j]`.
pub fn meshgrid_ij(x: &[f32], y: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let nx = x.len();
    let ny = y.len();
    let mut gx = Vec::with_capacity(nx * ny);
    let mut gy = Vec::with_capacity(nx * ny);
    for &xi in x {
        for &yj in y {
            gx.push(xi);
            gy.push(yj);
        }
    }
    (gx, gy)
}
