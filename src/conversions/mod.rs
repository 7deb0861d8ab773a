//! Conversions between rotation representations.
//!
//! Representation | Unbatched         | Batched
//! -------------- | ----------------- | ----------------
//! axis-angle     | `Vector` `[3]`    | `Rows` `[N, 3]`
//! rotation       | `Matrix` `[4, 4]` | `Stack` `[N, 4, 4]`
//! quaternion     | `Vector` `[4]`    | `Rows` `[N, 4]`
//! rtvec          | `Vector` `[6]`    | `Rows` `[N, 6]`
//!
//! Each entry point routes an unbatched [`Array`] to the scalar reference
//! implementation and a batched one to the vectorized kernel. Both read the
//! same thresholds from [`ConversionConfig`] and agree to rounding error.
//! Rotation matrices may also be given as 3×3; only the top-left block is read.
//!
//! # Example
//!
//! ```
//! use apex_rotations::{Array, axis_angle_to_rotation_matrix, rotation_matrix_to_axis_angle};
//! use nalgebra::Vector3;
//!
//! let v = Array::from_vector(&Vector3::new(0.1, -0.2, 0.3));
//! let rotation = axis_angle_to_rotation_matrix(&v).unwrap();
//! let back = rotation_matrix_to_axis_angle(&rotation).unwrap();
//! assert_eq!(back.shape(), vec![3]);
//! ```

use crate::array::{self, Array};
use crate::config::ConversionConfig;
use crate::error::{RotationError, RotationResult};
use nalgebra::{DMatrix, Matrix3, Matrix4};
use tracing::trace;

pub mod axis_angle;
mod batch;
pub mod pose;
pub mod quaternion;

pub use pose::compose_pose;

/// Axis-angle vector(s) → 4×4 homogeneous rotation matrix(es).
pub fn axis_angle_to_rotation_matrix(input: &Array) -> RotationResult<Array> {
    axis_angle_to_rotation_matrix_with_config(input, &ConversionConfig::default())
}

pub fn axis_angle_to_rotation_matrix_with_config(
    input: &Array,
    config: &ConversionConfig,
) -> RotationResult<Array> {
    const OP: &str = "axis_angle_to_rotation_matrix";
    trace!(operation = OP, kind = input.kind(), shape = ?input.shape(), "dispatch");
    match input {
        Array::Vector(v) => {
            let v = array::fixed_vector::<3>(OP, "[3]", v)?;
            Ok(Array::from_matrix(&axis_angle::to_rotation_matrix(
                &v,
                config.axis_angle_eps,
            )))
        }
        Array::Rows(rows) => {
            array::check_width(OP, "[N, 3]", rows, 3)?;
            Ok(stack(axis_angle::to_rotation_matrix_batch(
                rows,
                config.axis_angle_eps,
            )))
        }
        other => Err(array::unsupported(OP, other)),
    }
}

/// Rotation matrix(es) → scalar-first unit quaternion(s).
pub fn rotation_matrix_to_quaternion(input: &Array) -> RotationResult<Array> {
    rotation_matrix_to_quaternion_with_config(input, &ConversionConfig::default())
}

pub fn rotation_matrix_to_quaternion_with_config(
    input: &Array,
    config: &ConversionConfig,
) -> RotationResult<Array> {
    const OP: &str = "rotation_matrix_to_quaternion";
    trace!(operation = OP, kind = input.kind(), shape = ?input.shape(), "dispatch");
    match input {
        Array::Matrix(m) => {
            let rotation = array::rotation_block(OP, "[4, 4] or [3, 3]", m, || input.shape())?;
            Ok(Array::from_vector(&quaternion::from_rotation_matrix(
                &rotation,
                config.quaternion_eps,
            )))
        }
        Array::Stack(matrices) => {
            let rotations = rotation_blocks(OP, matrices, || input.shape())?;
            Ok(Array::Rows(quaternion::from_rotation_matrix_batch(
                &rotations,
                config.quaternion_eps,
            )))
        }
        other => Err(array::unsupported(OP, other)),
    }
}

/// Scalar-first quaternion(s) → axis-angle vector(s).
pub fn quaternion_to_axis_angle(input: &Array) -> RotationResult<Array> {
    quaternion_to_axis_angle_with_config(input, &ConversionConfig::default())
}

pub fn quaternion_to_axis_angle_with_config(
    input: &Array,
    config: &ConversionConfig,
) -> RotationResult<Array> {
    const OP: &str = "quaternion_to_axis_angle";
    trace!(operation = OP, kind = input.kind(), shape = ?input.shape(), "dispatch");
    match input {
        Array::Vector(q) => {
            let q = array::fixed_vector::<4>(OP, "[4]", q)?;
            Ok(Array::from_vector(&quaternion::to_axis_angle(
                &q,
                config.sin_squared_eps,
            )))
        }
        Array::Rows(rows) => {
            array::check_width(OP, "[N, 4]", rows, 4)?;
            Ok(Array::Rows(quaternion::to_axis_angle_batch(
                rows,
                config.sin_squared_eps,
            )))
        }
        other => Err(array::unsupported(OP, other)),
    }
}

/// Rotation matrix(es) → axis-angle vector(s), through the quaternion form.
pub fn rotation_matrix_to_axis_angle(input: &Array) -> RotationResult<Array> {
    rotation_matrix_to_axis_angle_with_config(input, &ConversionConfig::default())
}

pub fn rotation_matrix_to_axis_angle_with_config(
    input: &Array,
    config: &ConversionConfig,
) -> RotationResult<Array> {
    let quaternion = rotation_matrix_to_quaternion_with_config(input, config)?;
    quaternion_to_axis_angle_with_config(&quaternion, config)
}

/// rtvec(s) `[rx, ry, rz, tx, ty, tz]` → 4×4 homogeneous pose(s).
pub fn rtvec_to_pose(input: &Array) -> RotationResult<Array> {
    rtvec_to_pose_with_config(input, &ConversionConfig::default())
}

pub fn rtvec_to_pose_with_config(
    input: &Array,
    config: &ConversionConfig,
) -> RotationResult<Array> {
    const OP: &str = "rtvec_to_pose";
    trace!(operation = OP, kind = input.kind(), shape = ?input.shape(), "dispatch");
    match input {
        Array::Vector(v) => {
            let rtvec = array::fixed_vector::<6>(OP, "[6]", v)?;
            Ok(Array::from_matrix(&pose::rtvec_to_pose(
                &rtvec,
                config.axis_angle_eps,
            )))
        }
        Array::Rows(rows) => {
            array::check_width(OP, "[N, 6]", rows, 6)?;
            Ok(stack(pose::rtvec_to_pose_batch(rows, config.axis_angle_eps)))
        }
        other => Err(array::unsupported(OP, other)),
    }
}

fn stack(matrices: Vec<Matrix4<f64>>) -> Array {
    Array::Stack(
        matrices
            .iter()
            .map(|m| DMatrix::from_column_slice(4, 4, m.as_slice()))
            .collect(),
    )
}

fn rotation_blocks(
    operation: &'static str,
    matrices: &[DMatrix<f64>],
    shape: impl Fn() -> Vec<usize>,
) -> RotationResult<Vec<Matrix3<f64>>> {
    array::stack_dims(operation, matrices)?;
    matrices
        .iter()
        .map(|m| array::rotation_block(operation, "[N, 4, 4] or [N, 3, 3]", m, &shape))
        .collect::<Result<Vec<_>, RotationError>>()
}
