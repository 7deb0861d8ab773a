//! Rotation matrix ↔ quaternion and quaternion → axis-angle.
//!
//! Quaternions are stored scalar-first as `[w, x, y, z]`.
//!
//! # Matrix → quaternion
//!
//! One of four pivots is chosen from the diagonal so the division is always by
//! the largest of the candidate square roots:
//!
//! | Case | Condition                      | Pivot                   |
//! | ---- | ------------------------------ | ----------------------- |
//! | 0    | R₂₂ < ε and R₀₀ > R₁₁          | t₀ = 1 + R₀₀ − R₁₁ − R₂₂ |
//! | 1    | R₂₂ < ε and R₀₀ ≤ R₁₁          | t₁ = 1 − R₀₀ + R₁₁ − R₂₂ |
//! | 2    | R₂₂ ≥ ε and R₀₀ < −R₁₁         | t₂ = 1 − R₀₀ − R₁₁ + R₂₂ |
//! | 3    | R₂₂ ≥ ε and R₀₀ ≥ −R₁₁         | t₃ = 1 + R₀₀ + R₁₁ + R₂₂ |
//!
//! The input is not checked for orthonormality; a non-rotation matrix gives a
//! non-unit quaternion.
//!
//! # Quaternion → axis-angle
//!
//! θu = 2 · atan2(‖v‖, w) / ‖v‖ · v, with the quadrant flipped when w < ε so the
//! result does not depend on the sign of q, and the factor replaced by its
//! limit 2 when ‖v‖² ≤ ε.

use super::batch::{self, Column, mul};
use nalgebra::{DMatrix, Matrix3, Vector3, Vector4};
use tracing::debug;

/// Quaternion of a single rotation block (reference path).
pub fn from_rotation_matrix(rotation: &Matrix3<f64>, eps: f64) -> Vector4<f64> {
    let r = rotation;
    let (t, q) = if r[(2, 2)] < eps {
        if r[(0, 0)] > r[(1, 1)] {
            let t = 1.0 + r[(0, 0)] - r[(1, 1)] - r[(2, 2)];
            (
                t,
                Vector4::new(
                    r[(2, 1)] - r[(1, 2)],
                    t,
                    r[(1, 0)] + r[(0, 1)],
                    r[(0, 2)] + r[(2, 0)],
                ),
            )
        } else {
            let t = 1.0 - r[(0, 0)] + r[(1, 1)] - r[(2, 2)];
            (
                t,
                Vector4::new(
                    r[(0, 2)] - r[(2, 0)],
                    r[(1, 0)] + r[(0, 1)],
                    t,
                    r[(2, 1)] + r[(1, 2)],
                ),
            )
        }
    } else if r[(0, 0)] < -r[(1, 1)] {
        let t = 1.0 - r[(0, 0)] - r[(1, 1)] + r[(2, 2)];
        (
            t,
            Vector4::new(
                r[(1, 0)] - r[(0, 1)],
                r[(0, 2)] + r[(2, 0)],
                r[(2, 1)] + r[(1, 2)],
                t,
            ),
        )
    } else {
        let t = 1.0 + r[(0, 0)] + r[(1, 1)] + r[(2, 2)];
        (
            t,
            Vector4::new(
                t,
                r[(2, 1)] - r[(1, 2)],
                r[(0, 2)] - r[(2, 0)],
                r[(1, 0)] - r[(0, 1)],
            ),
        )
    };

    q * (0.5 / t.sqrt())
}

/// Quaternions of a batch of rotation blocks, returned as an N×4 batch.
pub fn from_rotation_matrix_batch(rotations: &[Matrix3<f64>], eps: f64) -> DMatrix<f64> {
    let n = rotations.len();
    let entry = |r: usize, c: usize| -> Column {
        Column::from_iterator(n, rotations.iter().map(|m| m[(r, c)]))
    };
    let (r00, r01, r02) = (entry(0, 0), entry(0, 1), entry(0, 2));
    let (r10, r11, r12) = (entry(1, 0), entry(1, 1), entry(1, 2));
    let (r20, r21, r22) = (entry(2, 0), entry(2, 1), entry(2, 2));
    let one = batch::constant(n, 1.0);

    let t0 = &one + &r00 - &r11 - &r22;
    let q0 = pivot_scaled(
        [&r21 - &r12, t0.clone(), &r10 + &r01, &r02 + &r20],
        &t0,
    );

    let t1 = &one - &r00 + &r11 - &r22;
    let q1 = pivot_scaled(
        [&r02 - &r20, &r10 + &r01, t1.clone(), &r21 + &r12],
        &t1,
    );

    let t2 = &one - &r00 - &r11 + &r22;
    let q2 = pivot_scaled(
        [&r10 - &r01, &r02 + &r20, &r21 + &r12, t2.clone()],
        &t2,
    );

    let t3 = &one + &r00 + &r11 + &r22;
    let q3 = pivot_scaled(
        [t3.clone(), &r21 - &r12, &r02 - &r20, &r10 - &r01],
        &t3,
    );

    let mask_d2 = batch::predicate(&r22, |x| x < eps);
    let mask_d0_d1: Vec<bool> = r00.iter().zip(r11.iter()).map(|(a, b)| a > b).collect();
    let mask_d0_nd1: Vec<bool> = r00.iter().zip(r11.iter()).map(|(a, b)| *a < -b).collect();

    let mask_c0 = batch::both(&mask_d2, &mask_d0_d1);
    let mask_c1 = batch::both(&mask_d2, &batch::not(&mask_d0_d1));
    let mask_c2 = batch::both(&batch::not(&mask_d2), &mask_d0_nd1);
    debug!(
        batch = n,
        case0 = batch::count(&mask_c0),
        case1 = batch::count(&mask_c1),
        case2 = batch::count(&mask_c2),
        "rotation matrix to quaternion"
    );

    let components: Vec<Column> = (0..4)
        .map(|k| {
            let rest = batch::select(&mask_c2, &q2[k], &q3[k]);
            let rest = batch::select(&mask_c1, &q1[k], &rest);
            batch::select(&mask_c0, &q0[k], &rest)
        })
        .collect();

    batch::rows_from_columns(n, &components)
}

/// Scale a candidate quaternion by 0.5 / √t.
///
/// Unselected candidates may have t < 0 and turn into NaN; the masks drop them.
fn pivot_scaled(candidate: [Column; 4], t: &Column) -> [Column; 4] {
    let scale = t.map(|t| 0.5 / t.sqrt());
    candidate.map(|c| mul(&c, &scale))
}

/// Axis-angle vector of a single scalar-first quaternion (reference path).
pub fn to_axis_angle(quaternion: &Vector4<f64>, eps: f64) -> Vector3<f64> {
    let normalizer = 1.0 / quaternion.norm();
    let v = Vector3::new(quaternion[1], quaternion[2], quaternion[3]) * normalizer;
    let sin_squared = v.norm_squared();

    let k = if sin_squared > eps {
        let sin_theta = sin_squared.sqrt();
        let cos_theta = quaternion[0] * normalizer;

        // cos < 0 means the rotation angle exceeds π; flip so -q maps to the same vector
        let theta = if cos_theta < eps {
            f64::atan2(-sin_theta, -cos_theta)
        } else {
            f64::atan2(sin_theta, cos_theta)
        };
        2.0 * theta / sin_theta
    } else {
        2.0
    };

    v * k
}

/// Axis-angle vectors of an N×4 batch of quaternions, returned as N×3.
pub fn to_axis_angle_batch(quaternions: &DMatrix<f64>, eps: f64) -> DMatrix<f64> {
    let n = quaternions.nrows();
    let normalizer = batch::row_norm_squared(quaternions).map(|s| 1.0 / s.sqrt());
    let q1 = mul(&batch::column(quaternions, 1), &normalizer);
    let q2 = mul(&batch::column(quaternions, 2), &normalizer);
    let q3 = mul(&batch::column(quaternions, 3), &normalizer);

    let sin_squared = mul(&q1, &q1) + mul(&q2, &q2) + mul(&q3, &q3);
    let sin_theta = sin_squared.map(f64::sqrt);
    let cos_theta = mul(&batch::column(quaternions, 0), &normalizer);

    let mask_theta = batch::predicate(&cos_theta, |c| c < eps);
    let theta = batch::select(
        &mask_theta,
        &sin_theta.zip_map(&cos_theta, |s, c| f64::atan2(-s, -c)),
        &sin_theta.zip_map(&cos_theta, f64::atan2),
    );

    let mask = batch::predicate(&sin_squared, |s| s > eps);
    let k_pos = theta.zip_map(&sin_theta, |t, s| 2.0 * t / s);
    let k = batch::select(&mask, &k_pos, &batch::constant(n, 2.0));
    debug!(
        batch = n,
        near_identity = n - batch::count(&mask),
        "quaternion to axis-angle"
    );

    batch::rows_from_columns(n, &[mul(&q1, &k), mul(&q2, &k), mul(&q3, &k)])
}
