//! Range statistics over sample slices.

/// Minimum and maximum of a slice, ignoring NaNs.
///
/// Returns `None` for an empty slice or a slice of NaNs only.
pub fn min_max(values: &[f32]) -> Option<(f32, f32)> {
    let mut iter = values.iter().copied().filter(|v| !v.is_nan());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Peak-to-peak range (`max - min`), or `None` for empty input.
pub fn ptp(values: &[f32]) -> Option<f32> {
    min_max(values).map(|(lo, hi)| hi - lo)
}

/// Arithmetic mean, or `None` for empty input.
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    Some((sum / values.len() as f64) as f32)
}
