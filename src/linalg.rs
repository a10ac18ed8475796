//! linalg — `ndarray` ↔ `nalgebra` bridge for small dense inverses.
//!
//! Purpose
//! -------
//! The crate stores every matrix as an `ndarray::Array2<f64>`; inversion is
//! delegated to `nalgebra` (LU with partial pivoting). This module copies a
//! square matrix into a `DMatrix`, inverts it, and copies the result back.
//!
//! Conventions
//! -----------
//! - A matrix is treated as singular when `nalgebra` reports failure or when
//!   the inverse contains non-finite entries.
//! - Callers map `None` into their own error variant (`SingularReference`,
//!   `SingularImpact`).
use nalgebra::DMatrix;
use ndarray::Array2;

/// Copy a square `ndarray` matrix into a preallocated `DMatrix`.
///
/// The copy proceeds column by column to match `DMatrix`'s column-major
/// storage. Panics if the shapes differ.
pub(crate) fn fill_dmatrix(src: &Array2<f64>, dst: &mut DMatrix<f64>) {
    for j in 0..src.ncols() {
        for i in 0..src.nrows() {
            dst[(i, j)] = src[[i, j]];
        }
    }
}

/// Invert a square matrix, returning `None` when it is singular.
///
/// Panics if `matrix` is not square; shapes are validated at batch entry.
pub(crate) fn try_invert(matrix: &Array2<f64>) -> Option<Array2<f64>> {
    let n = matrix.nrows();
    let mut nalg = DMatrix::<f64>::zeros(n, n);
    fill_dmatrix(matrix, &mut nalg);
    let inverse = nalg.try_inverse()?;
    if inverse.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(Array2::from_shape_fn((n, n), |(i, j)| inverse[(i, j)]))
}
