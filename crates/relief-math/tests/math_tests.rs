//! Integration tests for relief-math.

use std::f32::consts::{FRAC_1_SQRT_2, PI};

use relief_math::lattice::{linspace, meshgrid_ij};
use relief_math::pose::{
    basis_from_rows, framing_distance, is_rigid, pose_forward, pose_from_rows, pose_translation,
};
use relief_math::stats::{mean, min_max, ptp};
use relief_math::{Vec3, Vec4};

// ─── Lattice Tests ────────────────────────────────────────────

#[test]
fn linspace_endpoints() {
    let v = linspace(0.0, 1.0, 5);
    assert_eq!(v.len(), 5);
    assert_eq!(v[0], 0.0);
    assert_eq!(v[4], 1.0);
    assert!((v[2] - 0.5).abs() < 1e-6);
}

#[test]
fn linspace_degenerate_counts() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(3.0, 1.0, 1), vec![3.0]);
}

#[test]
fn meshgrid_ij_indexing() {
    let (gx, gy) = meshgrid_ij(&[0.0, 1.0], &[10.0, 20.0, 30.0]);
    assert_eq!(gx, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    assert_eq!(gy, vec![10.0, 20.0, 30.0, 10.0, 20.0, 30.0]);
}

// ─── Stats Tests ──────────────────────────────────────────────

#[test]
fn min_max_and_ptp() {
    let v = [3.0, -1.0, 4.0, 1.5];
    assert_eq!(min_max(&v), Some((-1.0, 4.0)));
    assert_eq!(ptp(&v), Some(5.0));
}

#[test]
fn stats_ignore_nan() {
    let v = [f32::NAN, 2.0, 1.0];
    assert_eq!(min_max(&v), Some((1.0, 2.0)));
}

#[test]
fn stats_empty() {
    assert_eq!(min_max(&[]), None);
    assert_eq!(mean(&[]), None);
}

#[test]
fn mean_simple() {
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
}

// ─── Pose Tests ───────────────────────────────────────────────

#[test]
fn basis_rows_are_rows() {
    let m = basis_from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    // Row 0 of the matrix is (1, 2, 3): read it off the column axes.
    assert_eq!(m.x_axis.x, 1.0);
    assert_eq!(m.y_axis.x, 2.0);
    assert_eq!(m.z_axis.x, 3.0);
    assert_eq!(m.x_axis.y, 4.0);
}

#[test]
fn pose_translation_column() {
    let pose = pose_from_rows(
        [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        Vec3::new(1.0, 2.0, 3.0),
    );
    assert_eq!(pose_translation(&pose), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(pose.row(3), Vec4::new(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn diagonal_camera_looks_down_the_diagonal() {
    let s2 = FRAC_1_SQRT_2;
    let pose = pose_from_rows([[0.0, -s2, s2], [1.0, 0.0, 0.0], [0.0, s2, s2]], Vec3::ZERO);
    let fwd = pose_forward(&pose).normalize();
    assert!((fwd - Vec3::new(-s2, 0.0, -s2)).length() < 1e-6);
    assert!(is_rigid(&pose, 1e-5));
}

#[test]
fn non_orthonormal_basis_is_not_rigid() {
    let pose = pose_from_rows([[2.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]], Vec3::ZERO);
    assert!(!is_rigid(&pose, 1e-5));
}

#[test]
fn framing_distance_default_constants() {
    let d = framing_distance(0.9, PI / 6.0);
    assert!((d - 0.9 / (2.0 * (PI / 6.0).tan())).abs() < 1e-6);
    assert!((d - 0.779_422_9).abs() < 1e-5);
}
