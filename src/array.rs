//! Dense array values accepted and produced by the conversion entry points.
//!
//! Every public conversion takes an [`Array`] and routes on its variant: an
//! unbatched value goes to the scalar reference implementation, a batched value
//! goes to the vectorized kernel. The set of variants is closed, so dispatch is
//! a plain `match` and an operation rejects the variants it has no path for.
//!
//! | Variant  | Shape        | Typical content                          |
//! | -------- | ------------ | ---------------------------------------- |
//! | `Vector` | `[K]`        | one axis-angle, quaternion or rtvec      |
//! | `Matrix` | `[R, C]`     | one 3×3 rotation or 4×4 pose             |
//! | `Rows`   | `[N, K]`     | N axis-angles, quaternions or rtvecs     |
//! | `Stack`  | `[N, R, C]`  | N rotations/poses, or B sets of points   |

use crate::error::{RotationError, RotationResult};
use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector};

/// A single or batched dense value of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    /// One unbatched vector
    Vector(DVector<f64>),
    /// One unbatched matrix
    Matrix(DMatrix<f64>),
    /// A batch of N row vectors, one element per row
    Rows(DMatrix<f64>),
    /// A batch of N matrices sharing one shape
    Stack(Vec<DMatrix<f64>>),
}

impl Array {
    /// Wrap a fixed-size nalgebra vector as an unbatched value.
    pub fn from_vector<const D: usize>(vector: &SVector<f64, D>) -> Self {
        Array::Vector(DVector::from_column_slice(vector.as_slice()))
    }

    /// Wrap a fixed-size nalgebra matrix as an unbatched value.
    pub fn from_matrix<const R: usize, const C: usize>(matrix: &SMatrix<f64, R, C>) -> Self {
        Array::Matrix(DMatrix::from_column_slice(R, C, matrix.as_slice()))
    }

    /// Build a `Rows` batch from fixed-size vectors.
    pub fn from_rows<const D: usize>(rows: &[SVector<f64, D>]) -> Self {
        Array::Rows(DMatrix::from_fn(rows.len(), D, |i, j| rows[i][j]))
    }

    /// Build a `Stack` batch from fixed-size matrices.
    pub fn from_matrices<const R: usize, const C: usize>(matrices: &[SMatrix<f64, R, C>]) -> Self {
        Array::Stack(
            matrices
                .iter()
                .map(|m| DMatrix::from_column_slice(R, C, m.as_slice()))
                .collect(),
        )
    }

    /// Shape with the batch dimension first for batched variants.
    ///
    /// An empty `Stack` has no element shape to report and yields `[0]`.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Array::Vector(v) => vec![v.len()],
            Array::Matrix(m) | Array::Rows(m) => vec![m.nrows(), m.ncols()],
            Array::Stack(stack) => match stack.first() {
                Some(first) => vec![stack.len(), first.nrows(), first.ncols()],
                None => vec![0],
            },
        }
    }

    /// Variant name, used in unsupported-type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Array::Vector(_) => "Vector",
            Array::Matrix(_) => "Matrix",
            Array::Rows(_) => "Rows",
            Array::Stack(_) => "Stack",
        }
    }

    pub fn is_batched(&self) -> bool {
        matches!(self, Array::Rows(_) | Array::Stack(_))
    }

    /// Number of batch elements, `None` for unbatched values.
    pub fn batch_size(&self) -> Option<usize> {
        match self {
            Array::Rows(rows) => Some(rows.nrows()),
            Array::Stack(stack) => Some(stack.len()),
            Array::Vector(_) | Array::Matrix(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&DVector<f64>> {
        match self {
            Array::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&DMatrix<f64>> {
        match self {
            Array::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_rows(&self) -> Option<&DMatrix<f64>> {
        match self {
            Array::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_stack(&self) -> Option<&[DMatrix<f64>]> {
        match self {
            Array::Stack(stack) => Some(stack),
            _ => None,
        }
    }

    /// Apply `f` to every entry, keeping the variant and shape.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        match self {
            Array::Vector(v) => Array::Vector(v.map(&f)),
            Array::Matrix(m) => Array::Matrix(m.map(&f)),
            Array::Rows(rows) => Array::Rows(rows.map(&f)),
            Array::Stack(stack) => Array::Stack(stack.iter().map(|m| m.map(&f)).collect()),
        }
    }
}

pub(crate) fn unsupported(operation: &'static str, input: &Array) -> RotationError {
    RotationError::UnsupportedType {
        operation,
        received: input.kind(),
    }
}

/// Copy a dynamic vector into a fixed-size one after checking its length.
pub(crate) fn fixed_vector<const D: usize>(
    operation: &'static str,
    expected: &'static str,
    vector: &DVector<f64>,
) -> RotationResult<SVector<f64, D>> {
    if vector.len() != D {
        return Err(RotationError::InvalidShape {
            operation,
            expected,
            actual: vec![vector.len()],
        });
    }
    Ok(SVector::<f64, D>::from_column_slice(vector.as_slice()))
}

/// Check that a `Rows` batch has exactly `width` columns.
pub(crate) fn check_width(
    operation: &'static str,
    expected: &'static str,
    rows: &DMatrix<f64>,
    width: usize,
) -> RotationResult<()> {
    if rows.ncols() != width {
        return Err(RotationError::InvalidShape {
            operation,
            expected,
            actual: vec![rows.nrows(), rows.ncols()],
        });
    }
    Ok(())
}

/// Common element shape of a `Stack`, `None` when the stack is empty.
pub(crate) fn stack_dims(
    operation: &'static str,
    stack: &[DMatrix<f64>],
) -> RotationResult<Option<(usize, usize)>> {
    let Some(first) = stack.first() else {
        return Ok(None);
    };
    let expected = first.shape();
    for (index, m) in stack.iter().enumerate().skip(1) {
        if m.shape() != expected {
            return Err(RotationError::RaggedBatch {
                operation,
                index,
                expected,
                actual: m.shape(),
            });
        }
    }
    Ok(Some(expected))
}

/// Top-left 3×3 block of a 3×3 rotation or 4×4 homogeneous matrix.
pub(crate) fn rotation_block(
    operation: &'static str,
    expected: &'static str,
    matrix: &DMatrix<f64>,
    actual: impl FnOnce() -> Vec<usize>,
) -> RotationResult<Matrix3<f64>> {
    match matrix.shape() {
        (3, 3) | (4, 4) => Ok(matrix.fixed_view::<3, 3>(0, 0).into_owned()),
        _ => Err(RotationError::InvalidShape {
            operation,
            expected,
            actual: actual(),
        }),
    }
}
