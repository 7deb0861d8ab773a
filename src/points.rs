//! Homogeneous point utilities.
//!
//! Point batches are `Array::Stack` values of shape `[B, N, D]`: B sets of N
//! points, one point per row. Poses are `Array::Stack` of shape
//! `[B, D + 1, D + 1]`.

use crate::array::{self, Array};
use crate::config::ConversionConfig;
use crate::error::{RotationError, RotationResult};
use nalgebra::DMatrix;
use rayon::prelude::*;
use tracing::debug;

/// Append a coordinate equal to 1 to every point: `[B, N, D] → [B, N, D + 1]`.
pub fn convert_points_to_homogeneous(points: &Array) -> RotationResult<Array> {
    const OP: &str = "convert_points_to_homogeneous";
    let sets = point_sets(OP, points)?;
    Ok(Array::Stack(sets.iter().map(to_homogeneous).collect()))
}

/// Divide by the last coordinate and drop it: `[B, N, D] → [B, N, D − 1]`.
pub fn convert_points_from_homogeneous(points: &Array) -> RotationResult<Array> {
    convert_points_from_homogeneous_with_config(points, &ConversionConfig::default())
}

pub fn convert_points_from_homogeneous_with_config(
    points: &Array,
    config: &ConversionConfig,
) -> RotationResult<Array> {
    const OP: &str = "convert_points_from_homogeneous";
    let sets = point_sets(OP, points)?;
    if let Some(first) = sets.first()
        && first.ncols() == 0
    {
        return Err(RotationError::InvalidShape {
            operation: OP,
            expected: "[B, N, D] with D >= 1",
            actual: points.shape(),
        });
    }
    Ok(Array::Stack(
        sets.iter()
            .map(|m| from_homogeneous(m, config.homogeneous_eps))
            .collect(),
    ))
}

/// Apply one pose per batch element to its set of points.
///
/// `poses` is `[B, D + 1, D + 1]`, `points` is `[B, N, D]`; the result is
/// `[B, N, D]`. Batch elements are transformed in parallel.
pub fn transform_points(poses: &Array, points: &Array) -> RotationResult<Array> {
    transform_points_with_config(poses, points, &ConversionConfig::default())
}

pub fn transform_points_with_config(
    poses: &Array,
    points: &Array,
    config: &ConversionConfig,
) -> RotationResult<Array> {
    const OP: &str = "transform_points";
    let pose_set = point_sets(OP, poses)?;
    let point_set = point_sets(OP, points)?;

    if pose_set.len() != point_set.len() {
        return Err(RotationError::BatchSizeMismatch {
            operation: OP,
            left: pose_set.len(),
            right: point_set.len(),
        });
    }

    if let (Some(pose), Some(pts)) = (pose_set.first(), point_set.first()) {
        if pose.nrows() != pose.ncols() {
            return Err(RotationError::InvalidShape {
                operation: OP,
                expected: "poses [B, D + 1, D + 1]",
                actual: poses.shape(),
            });
        }
        if pose.ncols() != pts.ncols() + 1 {
            return Err(RotationError::InvalidShape {
                operation: OP,
                expected: "points [B, N, D] with D + 1 matching the pose size",
                actual: points.shape(),
            });
        }
    }

    debug!(batch = pose_set.len(), "transform points");
    let eps = config.homogeneous_eps;
    let transformed = pose_set
        .par_iter()
        .zip(point_set.par_iter())
        .map(|(pose, pts)| {
            // rows are points, so p' = p · Pᵀ
            let dst = to_homogeneous(pts) * pose.transpose();
            from_homogeneous(&dst, eps)
        })
        .collect();

    Ok(Array::Stack(transformed))
}

fn point_sets<'a>(operation: &'static str, points: &'a Array) -> RotationResult<&'a [DMatrix<f64>]> {
    match points {
        Array::Stack(sets) => {
            array::stack_dims(operation, sets)?;
            Ok(sets.as_slice())
        }
        other => Err(array::unsupported(operation, other)),
    }
}

fn to_homogeneous(points: &DMatrix<f64>) -> DMatrix<f64> {
    let d = points.ncols();
    points.clone().insert_column(d, 1.0)
}

fn from_homogeneous(points: &DMatrix<f64>, eps: f64) -> DMatrix<f64> {
    let d = points.ncols() - 1;
    DMatrix::from_fn(points.nrows(), d, |i, j| {
        points[(i, j)] / (points[(i, d)] + eps)
    })
}
