//! Sign normalization — Waggoner–Zha (2003) exhaustive search over ±1 signs.
//!
//! Purpose
//! -------
//! Structural impact matrices are identified only up to the sign of each
//! row: `diag(s) · B` with `s ∈ {−1, +1}^N` describes the same model. This
//! module picks, for every candidate `B`, the sign vector that brings it
//! closest to a shared reference `B̂` under the Waggoner–Zha criterion:
//!
//! ```text
//! d(s) = Σ_n c_nᵀ Σ̃ c_n,   c_n = [B⁻¹ diag(s) − B̂⁻¹]_{:, n},   Σ̃ = B̂ᵀ B̂
//! s*   = argmin_s d(s)          (first in enumeration order on ties)
//! ```
//!
//! Key behaviors
//! -------------
//! - [`SignReference::new`] precomputes `B̂⁻¹` and `Σ̃` once per batch;
//!   candidates share them read-only. Sign vectors are generated from the
//!   enumeration index on the fly, never stored as a `2^N` table.
//! - Because `s_n² = 1`, `d(s) = const − 2 Σ_n s_n w_n` with
//!   `w_n = [B⁻¹]_{:, n}ᵀ Σ̃ [B̂⁻¹]_{:, n}`; candidates are scored by
//!   `Σ_n s_n w_n`, which orders them exactly as `−d(s)`.
//! - Enumeration order: row `k` assigns coordinate `n` the sign `+1` when bit
//!   `N−1−n` of `k` is set, else `−1` (row 0 is all `−1`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Returned sign vectors contain only `±1.0`.
//! - The search is deterministic: identical input gives identical output.
//! - `N` is bounded by [`SignOptions::max_dimension`]; each candidate costs
//!   `2^N · O(N)` after one `O(N³)` inversion.
//!
//! Conventions
//! -----------
//! - Pure functions; warnings about large `N` are emitted by the batch layer.
use crate::{
    errors::{SvarError, SvarResult},
    linalg::try_invert,
};
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Limits for the exhaustive sign search.
///
/// Fields
/// ------
/// - `max_dimension`: `usize`
///   Hard cap on `N`; larger references fail with
///   `SvarError::SignSearchTooLarge`.
/// - `warn_dimension`: `usize`
///   Soft limit above which the batch layer logs a performance warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignOptions {
    pub max_dimension: usize,
    pub warn_dimension: usize,
}

impl SignOptions {
    pub fn new(max_dimension: usize, warn_dimension: usize) -> SignOptions {
        SignOptions { max_dimension, warn_dimension }
    }
}

impl Default for SignOptions {
    fn default() -> Self {
        SignOptions { max_dimension: 20, warn_dimension: 12 }
    }
}

/// A normalized impact matrix together with the sign vector applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SignNormalization {
    /// Selected signs `s` (length N, entries `±1`).
    pub signs: Array1<f64>,
    /// `diag(s) · B`.
    pub matrix: Array2<f64>,
}

/// Sign of coordinate `j` in the `k`-th of the `2^n` sign vectors.
#[inline]
fn sign_at(n: usize, k: usize, j: usize) -> f64 {
    if (k >> (n - 1 - j)) & 1 == 1 { 1.0 } else { -1.0 }
}

/// The `k`-th sign vector in enumeration order (`k < 2^n`).
pub fn sign_vector(n: usize, k: usize) -> Array1<f64> {
    Array1::from_shape_fn(n, |j| sign_at(n, k, j))
}

/// Apply `diag(signs)` from the left (flip rows).
pub fn apply_signs(matrix: &Array2<f64>, signs: ArrayView1<f64>) -> Array2<f64> {
    let mut flipped = matrix.clone();
    for (mut row, &s) in flipped.axis_iter_mut(Axis(0)).zip(signs.iter()) {
        row *= s;
    }
    flipped
}

/// Precomputed shared reference for the sign search.
#[derive(Debug, Clone)]
pub struct SignReference {
    reference_inverse: Array2<f64>,
    precision: Array2<f64>,
}

impl SignReference {
    /// Build the shared search state from a reference matrix `B̂` (N×N).
    ///
    /// Errors
    /// ------
    /// - `SvarError::SignSearchTooLarge` if `N > options.max_dimension` (the
    ///   cap never exceeds what a `usize` bit shift can enumerate).
    /// - `SvarError::SingularReference` if `B̂` is not invertible.
    pub fn new(reference: &Array2<f64>, options: &SignOptions) -> SvarResult<Self> {
        let n = reference.nrows();
        let max = options.max_dimension.min(usize::BITS as usize - 1);
        if n > max {
            return Err(SvarError::SignSearchTooLarge { n, max });
        }
        let reference_inverse = try_invert(reference).ok_or(SvarError::SingularReference)?;
        let precision = reference.t().dot(reference);
        Ok(SignReference { reference_inverse, precision })
    }

    /// Dimension `N` of the reference.
    pub fn dimension(&self) -> usize {
        self.precision.nrows()
    }

    /// Number of sign vectors scored per candidate (`2^N`).
    pub fn candidates(&self) -> usize {
        1usize << self.dimension()
    }

    /// Waggoner–Zha distance `d(s)` of `diag(s) · B` from the reference.
    ///
    /// Errors
    /// ------
    /// - `SvarError::SingularImpact` if `B` is not invertible.
    pub fn distance(&self, candidate: &Array2<f64>, signs: ArrayView1<f64>) -> SvarResult<f64> {
        let inverse = try_invert(candidate).ok_or(SvarError::SingularImpact)?;
        let mut total = 0.0;
        for (n, &s) in signs.iter().enumerate() {
            let c = &inverse.column(n) * s - &self.reference_inverse.column(n);
            total += c.dot(&self.precision.dot(&c));
        }
        Ok(total)
    }

    /// Sign vector minimizing `d(s)` for one candidate `B`.
    ///
    /// Errors
    /// ------
    /// - `SvarError::SingularImpact` if `B` is not invertible.
    pub fn select_signs(&self, candidate: &Array2<f64>) -> SvarResult<Array1<f64>> {
        let inverse = try_invert(candidate).ok_or(SvarError::SingularImpact)?;
        let weights = Array1::from_shape_fn(self.dimension(), |n| {
            inverse.column(n).dot(&self.precision.dot(&self.reference_inverse.column(n)))
        });

        let n = self.dimension();
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for k in 0..self.candidates() {
            let score: f64 = weights.iter().enumerate().map(|(j, &w)| sign_at(n, k, j) * w).sum();
            if score > best_score {
                best_score = score;
                best = k;
            }
        }
        Ok(sign_vector(n, best))
    }

    /// Normalize one candidate: selected signs and `diag(s) · B`.
    ///
    /// Errors
    /// ------
    /// - `SvarError::SingularImpact` if `B` is not invertible.
    pub fn normalize(&self, candidate: &Array2<f64>) -> SvarResult<SignNormalization> {
        let signs = self.select_signs(candidate)?;
        let matrix = apply_signs(candidate, signs.view());
        Ok(SignNormalization { signs, matrix })
    }
}
