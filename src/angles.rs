//! Radian/degree conversion.

use crate::array::Array;
use std::f64::consts::PI;

#[inline]
pub fn rad2deg_scalar(radians: f64) -> f64 {
    180.0 * radians / PI
}

#[inline]
pub fn deg2rad_scalar(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Convert every entry from radians to degrees, keeping the shape.
pub fn rad2deg(radians: &Array) -> Array {
    radians.map(rad2deg_scalar)
}

/// Convert every entry from degrees to radians, keeping the shape.
pub fn deg2rad(degrees: &Array) -> Array {
    degrees.map(deg2rad_scalar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{DMatrix, Vector3};

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_scalar_conversions() {
        assert!((rad2deg_scalar(PI) - 180.0).abs() < TOLERANCE);
        assert!((deg2rad_scalar(90.0) - PI / 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_array_round_trip() {
        let angles = Array::Stack(vec![DMatrix::from_fn(3, 3, |i, j| (i + j) as f64 * 0.3)]);
        let back = deg2rad(&rad2deg(&angles));
        let (a, b) = (&angles.as_stack().unwrap()[0], &back.as_stack().unwrap()[0]);
        assert!((a - b).norm() < TOLERANCE);
        assert_eq!(back.shape(), vec![1, 3, 3]);
    }

    #[test]
    fn test_vector_in_degrees() {
        let degrees = rad2deg(&Array::from_vector(&Vector3::new(0.0, PI / 2.0, -PI)));
        let degrees = degrees.as_vector().unwrap();
        assert!((degrees[1] - 90.0).abs() < TOLERANCE);
        assert!((degrees[2] + 180.0).abs() < TOLERANCE);
    }
}
