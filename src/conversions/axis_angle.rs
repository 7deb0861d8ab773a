//! Axis-angle → rotation matrix (Rodrigues' formula).
//!
//! For an axis-angle vector v with θ² = vᵀv > ε:
//!
//! R = cos θ · I + sin θ · [w]ₓ + (1 − cos θ) · w wᵀ,  w = v / θ
//!
//! At or below the threshold the first-order Taylor expansion R ≈ I + [v]ₓ is
//! used instead, which is exact for v = 0. The branch is selected by masking
//! θ² against ε; the normal branch divides by θ itself, with no additive guard.

use super::batch::{self, Column, mul};
use super::pose::compose_pose;
use nalgebra::{DMatrix, Matrix3, Matrix4, Vector3};
use tracing::debug;

/// Rotation block for a single axis-angle vector (reference path).
pub fn rotation_block(axis_angle: &Vector3<f64>, eps: f64) -> Matrix3<f64> {
    let theta2 = axis_angle.dot(axis_angle);

    if theta2 > eps {
        let theta = theta2.sqrt();
        let w = axis_angle / theta;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let k = 1.0 - cos_theta;

        Matrix3::new(
            cos_theta + w.x * w.x * k,
            w.x * w.y * k - w.z * sin_theta,
            w.y * sin_theta + w.x * w.z * k,
            w.z * sin_theta + w.x * w.y * k,
            cos_theta + w.y * w.y * k,
            -w.x * sin_theta + w.y * w.z * k,
            -w.y * sin_theta + w.x * w.z * k,
            w.x * sin_theta + w.y * w.z * k,
            cos_theta + w.z * w.z * k,
        )
    } else {
        // Near zero: I + [v]x
        Matrix3::new(
            1.0,
            -axis_angle.z,
            axis_angle.y,
            axis_angle.z,
            1.0,
            -axis_angle.x,
            -axis_angle.y,
            axis_angle.x,
            1.0,
        )
    }
}

/// 4×4 homogeneous rotation for a single axis-angle vector (reference path).
pub fn to_rotation_matrix(axis_angle: &Vector3<f64>, eps: f64) -> Matrix4<f64> {
    compose_pose(&rotation_block(axis_angle, eps), &Vector3::zeros())
}

/// Rotation blocks for an N×3 batch of axis-angle vectors.
pub fn rotation_blocks(axis_angles: &DMatrix<f64>, eps: f64) -> Vec<Matrix3<f64>> {
    let n = axis_angles.nrows();
    let rx = batch::column(axis_angles, 0);
    let ry = batch::column(axis_angles, 1);
    let rz = batch::column(axis_angles, 2);
    let theta2 = batch::row_norm_squared(axis_angles);

    let normal = rodrigues_candidate(&rx, &ry, &rz, &theta2);
    let taylor = taylor_candidate(&rx, &ry, &rz);

    let mask = batch::predicate(&theta2, |t| t > eps);
    debug!(
        batch = n,
        taylor = n - batch::count(&mask),
        "axis-angle to rotation matrix"
    );

    let entries: Vec<Column> = normal
        .iter()
        .zip(taylor.iter())
        .map(|(on, off)| batch::select(&mask, on, off))
        .collect();

    (0..n)
        .map(|i| Matrix3::from_fn(|r, c| entries[3 * r + c][i]))
        .collect()
}

/// 4×4 homogeneous rotations for an N×3 batch of axis-angle vectors.
pub fn to_rotation_matrix_batch(axis_angles: &DMatrix<f64>, eps: f64) -> Vec<Matrix4<f64>> {
    rotation_blocks(axis_angles, eps)
        .iter()
        .map(|rotation| compose_pose(rotation, &Vector3::zeros()))
        .collect()
}

/// Row-major entries r00..r22 of the closed-form Rodrigues matrix.
///
/// Elements with θ = 0 produce NaN here; the mask never selects them.
fn rodrigues_candidate(rx: &Column, ry: &Column, rz: &Column, theta2: &Column) -> [Column; 9] {
    let theta = theta2.map(f64::sqrt);
    let wx = rx.component_div(&theta);
    let wy = ry.component_div(&theta);
    let wz = rz.component_div(&theta);
    let cos_theta = theta.map(f64::cos);
    let sin_theta = theta.map(f64::sin);
    let k = cos_theta.map(|c| 1.0 - c);

    [
        &cos_theta + mul(&mul(&wx, &wx), &k),
        mul(&mul(&wx, &wy), &k) - mul(&wz, &sin_theta),
        mul(&wy, &sin_theta) + mul(&mul(&wx, &wz), &k),
        mul(&wz, &sin_theta) + mul(&mul(&wx, &wy), &k),
        &cos_theta + mul(&mul(&wy, &wy), &k),
        -mul(&wx, &sin_theta) + mul(&mul(&wy, &wz), &k),
        -mul(&wy, &sin_theta) + mul(&mul(&wx, &wz), &k),
        mul(&wx, &sin_theta) + mul(&mul(&wy, &wz), &k),
        &cos_theta + mul(&mul(&wz, &wz), &k),
    ]
}

fn taylor_candidate(rx: &Column, ry: &Column, rz: &Column) -> [Column; 9] {
    let one = batch::constant(rx.len(), 1.0);
    [
        one.clone(),
        -rz,
        ry.clone(),
        rz.clone(),
        one.clone(),
        -rx,
        -ry,
        rx.clone(),
        one,
    ]
}
