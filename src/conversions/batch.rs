//! Column helpers for the batched kernels.
//!
//! A batched kernel works on one column per scalar quantity (length N, one
//! entry per batch element). Both candidate results of a branch are computed
//! for every element and then merged with [`select`], so no element's control
//! flow depends on another element.

use nalgebra::{DMatrix, DVector};

/// One scalar quantity for every element of the batch.
pub(crate) type Column = DVector<f64>;

/// Per-element choice between two candidate columns.
pub(crate) fn select(mask: &[bool], on: &Column, off: &Column) -> Column {
    Column::from_iterator(
        mask.len(),
        mask.iter()
            .zip(on.iter().zip(off.iter()))
            .map(|(&m, (&a, &b))| if m { a } else { b }),
    )
}

pub(crate) fn predicate<F>(column: &Column, f: F) -> Vec<bool>
where
    F: Fn(f64) -> bool,
{
    column.iter().map(|&x| f(x)).collect()
}

pub(crate) fn both(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x && y).collect()
}

pub(crate) fn not(mask: &[bool]) -> Vec<bool> {
    mask.iter().map(|&x| !x).collect()
}

pub(crate) fn count(mask: &[bool]) -> usize {
    mask.iter().filter(|&&m| m).count()
}

/// Elementwise product.
pub(crate) fn mul(a: &Column, b: &Column) -> Column {
    a.component_mul(b)
}

pub(crate) fn constant(len: usize, value: f64) -> Column {
    Column::from_element(len, value)
}

/// Squared Euclidean norm of every row.
pub(crate) fn row_norm_squared(rows: &DMatrix<f64>) -> Column {
    rows.map(|x| x * x).column_sum()
}

pub(crate) fn column(rows: &DMatrix<f64>, j: usize) -> Column {
    rows.column(j).into_owned()
}

/// Stack per-element columns back into an N×K batch.
pub(crate) fn rows_from_columns(nrows: usize, columns: &[Column]) -> DMatrix<f64> {
    DMatrix::from_fn(nrows, columns.len(), |i, j| columns[j][i])
}
