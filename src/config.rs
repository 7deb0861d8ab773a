//! Numerical thresholds shared by the reference and batched conversion paths.

/// Default threshold used by every branch selector.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Configuration parameters for the conversion kernels.
///
/// Both dispatch paths read the same thresholds, so an unbatched call and a
/// batch of identical inputs select the same branch and return the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionConfig {
    /// θ² at or below which axis-angle → matrix uses the first-order Taylor branch
    pub axis_angle_eps: f64,
    /// Diagonal threshold for the four-way pivot selection in matrix → quaternion
    pub quaternion_eps: f64,
    /// sin²(θ/2) at or below which quaternion → axis-angle uses k = 2,
    /// also the cos(θ/2) threshold for the quadrant correction
    pub sin_squared_eps: f64,
    /// Guard added to the last coordinate when de-homogenising points
    pub homogeneous_eps: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            axis_angle_eps: DEFAULT_EPSILON,
            quaternion_eps: DEFAULT_EPSILON,
            sin_squared_eps: DEFAULT_EPSILON,
            homogeneous_eps: DEFAULT_EPSILON,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Taylor-branch threshold for axis-angle → matrix
    pub fn with_axis_angle_eps(mut self, axis_angle_eps: f64) -> Self {
        self.axis_angle_eps = axis_angle_eps;
        self
    }

    /// Set the pivot-selection threshold for matrix → quaternion
    pub fn with_quaternion_eps(mut self, quaternion_eps: f64) -> Self {
        self.quaternion_eps = quaternion_eps;
        self
    }

    /// Set the near-identity threshold for quaternion → axis-angle
    pub fn with_sin_squared_eps(mut self, sin_squared_eps: f64) -> Self {
        self.sin_squared_eps = sin_squared_eps;
        self
    }

    /// Set the de-homogenisation guard
    pub fn with_homogeneous_eps(mut self, homogeneous_eps: f64) -> Self {
        self.homogeneous_eps = homogeneous_eps;
        self
    }
}
