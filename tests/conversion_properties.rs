//! Property tests for the rotation conversions
//!
//! Checks round trips between representations, the structural invariants of
//! every output (orthonormality, unit norm, double cover), and agreement
//! between the unbatched reference path and the batched kernels.

#![allow(clippy::unwrap_used)]

use apex_rotations::{
    Array, axis_angle_to_rotation_matrix, quaternion_to_axis_angle, rotation_matrix_to_axis_angle,
    rotation_matrix_to_quaternion, rtvec_to_pose,
};
use nalgebra::{DMatrix, DVector, Matrix3, Matrix4, Vector3, Vector4, Vector6};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use rotation_test_utils::*;

const ROUND_TRIP_TOLERANCE: f64 = 1e-5;
const PATH_TOLERANCE: f64 = 1e-12;

fn rotation_of(v: &Vector3<f64>) -> DMatrix<f64> {
    let rotation = axis_angle_to_rotation_matrix(&Array::from_vector(v)).unwrap();
    rotation.as_matrix().unwrap().clone()
}

#[test]
fn test_axis_angle_round_trip() {
    for v in random_axis_angles(7, 200) {
        let rotation = axis_angle_to_rotation_matrix(&Array::from_vector(&v)).unwrap();
        let back = rotation_matrix_to_axis_angle(&rotation).unwrap();
        let back = back.as_vector().unwrap();
        let diff = (back - DVector::from_column_slice(v.as_slice())).norm();
        assert!(diff < ROUND_TRIP_TOLERANCE, "v = {v}, diff = {diff}");
    }
}

#[test]
fn test_rotation_matrix_round_trip() {
    for v in random_axis_angles(11, 200) {
        let rotation = axis_angle_to_rotation_matrix(&Array::from_vector(&v)).unwrap();
        let back = axis_angle_to_rotation_matrix(&rotation_matrix_to_axis_angle(&rotation).unwrap())
            .unwrap();
        let diff = max_abs_diff(rotation.as_matrix().unwrap(), back.as_matrix().unwrap());
        assert!(diff < ROUND_TRIP_TOLERANCE, "v = {v}, diff = {diff}");
    }
}

#[test]
fn test_batched_round_trip() {
    let vectors = random_axis_angles(13, 64);
    let rotations = axis_angle_to_rotation_matrix(&Array::Rows(rows_of(&vectors))).unwrap();
    let back = rotation_matrix_to_axis_angle(&rotations).unwrap();
    let diff = max_abs_diff(back.as_rows().unwrap(), &rows_of(&vectors));
    assert!(diff < ROUND_TRIP_TOLERANCE, "diff = {diff}");
}

#[test]
fn test_zero_axis_angle_is_exact_identity() {
    let rotation = rotation_of(&Vector3::zeros());
    assert_eq!(rotation, DMatrix::<f64>::identity(4, 4));
}

#[test]
fn test_quarter_turn_about_z() {
    let rotation = block3(&rotation_of(&Vector3::new(0.0, 0.0, PI / 2.0)));
    let expected = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
    assert!((rotation - expected).norm() < 1e-12);
}

#[test]
fn test_identity_matrix_to_quaternion() {
    let q = rotation_matrix_to_quaternion(&Array::from_matrix(&Matrix4::<f64>::identity())).unwrap();
    assert_eq!(q.as_vector().unwrap().as_slice(), &[1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_rtvec_identity_rotation_with_translation() {
    let pose = rtvec_to_pose(&Array::from_vector(&Vector6::new(0.0, 0.0, 0.0, 1.0, 2.0, 3.0)))
        .unwrap();
    let mut expected = Matrix4::<f64>::identity();
    expected[(0, 3)] = 1.0;
    expected[(1, 3)] = 2.0;
    expected[(2, 3)] = 3.0;
    assert_eq!(pose, Array::from_matrix(&expected));
}

#[test]
fn test_quaternions_have_unit_norm() {
    let vectors = random_axis_angles(17, 200);
    let rotations = axis_angle_to_rotation_matrix(&Array::Rows(rows_of(&vectors))).unwrap();
    let quaternions = rotation_matrix_to_quaternion(&rotations).unwrap();
    for row in quaternions.as_rows().unwrap().row_iter() {
        assert!((row.norm() - 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_double_cover() {
    let mut rng = seeded_rng(19);
    for _ in 0..100 {
        let v = random_axis_angle(&mut rng, MAX_ANGLE);
        let q = nalgebra::UnitQuaternion::from_scaled_axis(v);
        let q = Vector4::new(q.w, q.i, q.j, q.k);
        let a = quaternion_to_axis_angle(&Array::from_vector(&q)).unwrap();
        let b = quaternion_to_axis_angle(&Array::from_vector(&(-q))).unwrap();
        let diff = (a.as_vector().unwrap() - b.as_vector().unwrap()).norm();
        assert!(diff < 1e-9, "q = {q}, diff = {diff}");
    }
}

#[test]
fn test_rotation_matrices_are_orthonormal() {
    for v in random_axis_angles(23, 200) {
        let rotation = block3(&rotation_of(&v));
        assert!((rotation.transpose() * rotation - Matrix3::identity()).norm() < 1e-9);
        assert!((rotation.determinant() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_batch_of_identical_inputs_matches_unbatched() {
    let v = Vector3::new(0.4, -1.1, 0.8);
    let single = rotation_of(&v);
    let batch = axis_angle_to_rotation_matrix(&Array::from_rows(&[v; 5])).unwrap();
    let batch = batch.as_stack().unwrap();
    assert_eq!(batch.len(), 5);
    for m in batch {
        assert!(max_abs_diff(m, &single) < PATH_TOLERANCE);
    }

    let q = Vector4::new(-0.2, 0.6, 0.1, -0.77);
    let single = quaternion_to_axis_angle(&Array::from_vector(&q)).unwrap();
    let single = single.as_vector().unwrap();
    let batch = quaternion_to_axis_angle(&Array::from_rows(&[q; 3])).unwrap();
    for row in batch.as_rows().unwrap().row_iter() {
        assert!((row.transpose() - single).norm() < PATH_TOLERANCE);
    }
}

#[test]
fn test_batched_and_reference_paths_agree() {
    let vectors = random_axis_angles(29, 100);
    let batch = rotation_matrix_to_quaternion(
        &axis_angle_to_rotation_matrix(&Array::Rows(rows_of(&vectors))).unwrap(),
    )
    .unwrap();
    let batch = batch.as_rows().unwrap();

    for (i, v) in vectors.iter().enumerate() {
        let single = rotation_matrix_to_quaternion(&Array::from_matrix(&block3(&rotation_of(v))))
            .unwrap();
        let single = single.as_vector().unwrap();
        assert!((batch.row(i).transpose() - single).norm() < PATH_TOLERANCE);
    }
}

#[test]
fn test_rtvec_batch_translation_column() {
    let rtvecs = [
        Vector6::new(0.1, 0.2, 0.3, 4.0, 5.0, 6.0),
        Vector6::new(0.0, 0.0, 0.0, -1.0, 0.0, 1.0),
    ];
    let poses = rtvec_to_pose(&Array::from_rows(&rtvecs)).unwrap();
    for (pose, rtvec) in poses.as_stack().unwrap().iter().zip(rtvecs.iter()) {
        for r in 0..3 {
            assert_eq!(pose[(r, 3)], rtvec[3 + r]);
        }
        assert_eq!(pose[(3, 3)], 1.0);
    }
}

#[test]
fn test_half_turns_are_recovered() {
    // diagonal rotations exercise the three non-trace pivots
    for (diagonal, axis) in [
        (Vector3::new(1.0, -1.0, -1.0), Vector3::x()),
        (Vector3::new(-1.0, 1.0, -1.0), Vector3::y()),
        (Vector3::new(-1.0, -1.0, 1.0), Vector3::z()),
    ] {
        let rotation = Array::from_matrix(&Matrix3::from_diagonal(&diagonal));
        let v = rotation_matrix_to_axis_angle(&rotation).unwrap();
        let v = v.as_vector().unwrap();
        let expected = DVector::from_column_slice((axis * PI).as_slice());
        assert!((v - &expected).norm() < 1e-9 || (v + &expected).norm() < 1e-9);
    }
}

#[test]
fn test_quarter_turn_quaternion_to_axis_angle() {
    let q = Array::from_vector(&Vector4::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0));
    let v = quaternion_to_axis_angle(&q).unwrap();
    let v = v.as_vector().unwrap();
    assert!((v[0] - PI / 2.0).abs() < 1e-12);
    assert!(v[1].abs() < 1e-12 && v[2].abs() < 1e-12);
}
