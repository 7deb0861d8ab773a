//! Rotation + translation → 4×4 homogeneous pose.
//!
//! An rtvec is `[rx, ry, rz, tx, ty, tz]`: an axis-angle rotation followed by a
//! translation. The pose is
//!
//! ```text
//! | R(r)  t |
//! | 0     1 |
//! ```

use super::axis_angle;
use nalgebra::{DMatrix, Matrix3, Matrix4, Vector3, Vector6};

/// Assemble a homogeneous pose from a rotation block and a translation.
pub fn compose_pose(rotation: &Matrix3<f64>, translation: &Vector3<f64>) -> Matrix4<f64> {
    let mut pose = Matrix4::identity();
    pose.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
    pose.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
    pose
}

/// Pose of a single rtvec (reference path).
pub fn rtvec_to_pose(rtvec: &Vector6<f64>, eps: f64) -> Matrix4<f64> {
    let rotation = axis_angle::rotation_block(&rtvec.fixed_rows::<3>(0).into_owned(), eps);
    compose_pose(&rotation, &rtvec.fixed_rows::<3>(3).into_owned())
}

/// Poses of an N×6 batch of rtvecs.
pub fn rtvec_to_pose_batch(rtvecs: &DMatrix<f64>, eps: f64) -> Vec<Matrix4<f64>> {
    let rotations = axis_angle::rotation_blocks(&rtvecs.columns(0, 3).into_owned(), eps);
    rotations
        .iter()
        .zip(rtvecs.row_iter())
        .map(|(rotation, row)| {
            let translation = Vector3::new(row[3], row[4], row[5]);
            compose_pose(rotation, &translation)
        })
        .collect()
}
