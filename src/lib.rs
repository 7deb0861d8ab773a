//! Batched conversions between 3D rotation representations.
//!
//! - axis-angle ↔ rotation matrix (Rodrigues' formula, Taylor branch near zero)
//! - rotation matrix → scalar-first quaternion (four-way pivot selection)
//! - quaternion → axis-angle (double-cover aware)
//! - axis-angle + translation → homogeneous pose
//! - homogeneous point utilities
//!
//! Every entry point accepts either a single value or a batch (see [`Array`]);
//! the batched kernels compute all branch candidates and select per element.

pub mod angles;
pub mod array;
pub mod config;
pub mod conversions;
pub mod error;
pub mod logger;
pub mod points;

pub use angles::{deg2rad, rad2deg};
pub use array::Array;
pub use config::ConversionConfig;
pub use conversions::{
    axis_angle_to_rotation_matrix, axis_angle_to_rotation_matrix_with_config,
    quaternion_to_axis_angle, quaternion_to_axis_angle_with_config,
    rotation_matrix_to_axis_angle, rotation_matrix_to_axis_angle_with_config,
    rotation_matrix_to_quaternion, rotation_matrix_to_quaternion_with_config, rtvec_to_pose,
    rtvec_to_pose_with_config,
};
pub use error::{RotationError, RotationResult};
pub use logger::{init_logger, init_logger_with_level};
pub use points::{
    convert_points_from_homogeneous, convert_points_from_homogeneous_with_config,
    convert_points_to_homogeneous, transform_points, transform_points_with_config,
};
