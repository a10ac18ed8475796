//! Batch dimensions — validate shapes once at entry, thread them everywhere.
//!
//! Purpose
//! -------
//! Derive `(N, K, M, S)` from a draw collection, check that every draw agrees
//! with them, and offer the companion checks used by individual batch
//! operations (observation panel, residual scales, regime chains, regime
//! probability paths, lag order, sign reference). All checks run before any
//! recursion starts so that shape problems fail the whole call, never a
//! partial result.
//!
//! Conventions
//! -----------
//! - `n` equations, `k` regressors, `m` regimes, `s` draws.
//! - Every failure is a batch-fatal [`SvarError`].
use crate::{
    errors::{SvarError, SvarResult},
    posterior::{draws::PosteriorDraw, panel::ObservationPanel},
};
use ndarray::Array2;

/// `Dims` — validated batch dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    /// Number of equations `N`.
    pub n: usize,
    /// Number of regressors `K` (columns of `A`).
    pub k: usize,
    /// Number of regimes `M`.
    pub m: usize,
    /// Number of draws `S`.
    pub s: usize,
}

impl Dims {
    /// Infer and validate dimensions from a draw collection.
    ///
    /// The first draw fixes `N` (rows of `A`), `K` (columns of `A`) and `M`
    /// (number of impact matrices); every draw must then carry N×N impact
    /// matrices, an N×K coefficient matrix and, when present, an M-regime
    /// chain. Residual scales are checked separately by
    /// [`Dims::check_scales`], only where shocks are standardized.
    ///
    /// Errors
    /// ------
    /// - `SvarError::EmptyCollection` for zero draws, zero regimes or N = 0.
    /// - `SvarError::DimensionMismatch` on the first inconsistent field.
    pub fn from_draws(draws: &[PosteriorDraw]) -> SvarResult<Self> {
        let first = draws.first().ok_or(SvarError::EmptyCollection { what: "posterior draws" })?;
        let n = first.coefficients.nrows();
        let k = first.coefficients.ncols();
        let m = first.regimes();
        if n == 0 {
            return Err(SvarError::EmptyCollection { what: "equations" });
        }
        if m == 0 {
            return Err(SvarError::EmptyCollection { what: "regimes" });
        }

        for draw in draws {
            if draw.regimes() != m {
                return Err(SvarError::DimensionMismatch {
                    what: "impact matrices per draw",
                    expected: m,
                    actual: draw.regimes(),
                });
            }
            check_shape("coefficient matrix", &draw.coefficients, (n, k))?;
            for b in &draw.impact {
                check_shape("impact matrix", b, (n, n))?;
            }
            if let Some(chain) = &draw.chain {
                if chain.regimes() != m {
                    return Err(SvarError::DimensionMismatch {
                        what: "regimes in transition matrix",
                        expected: m,
                        actual: chain.regimes(),
                    });
                }
            }
        }

        Ok(Dims { n, k, m, s: draws.len() })
    }

    /// Check that the observation panel matches `N` and `K`.
    pub fn check_panel(&self, panel: &ObservationPanel) -> SvarResult<()> {
        if panel.variables() != self.n {
            return Err(SvarError::DimensionMismatch {
                what: "rows of Y",
                expected: self.n,
                actual: panel.variables(),
            });
        }
        if panel.regressors() != self.k {
            return Err(SvarError::DimensionMismatch {
                what: "rows of X",
                expected: self.k,
                actual: panel.regressors(),
            });
        }
        Ok(())
    }

    /// Check every draw's residual scale against `N` and the panel's `T`
    /// (row count, column count for time-varying scales, positivity).
    pub fn check_scales(&self, draws: &[PosteriorDraw], periods: usize) -> SvarResult<()> {
        draws.iter().try_for_each(|draw| draw.scale.check(self.n, periods))
    }

    /// Require a regime chain on every draw.
    pub fn check_chains(&self, draws: &[PosteriorDraw]) -> SvarResult<()> {
        if draws.iter().any(|draw| draw.chain.is_none()) {
            return Err(SvarError::DimensionMismatch {
                what: "draws carrying a regime chain",
                expected: self.s,
                actual: draws.iter().filter(|draw| draw.chain.is_some()).count(),
            });
        }
        Ok(())
    }

    /// Check one M×T probability path per draw.
    pub fn check_probabilities(&self, paths: &[Array2<f64>], periods: usize) -> SvarResult<()> {
        if paths.len() != self.s {
            return Err(SvarError::DimensionMismatch {
                what: "regime probability paths",
                expected: self.s,
                actual: paths.len(),
            });
        }
        paths
            .iter()
            .try_for_each(|path| check_shape("regime probability path", path, (self.m, periods)))
    }

    /// Check that `p` lag blocks of size N fit inside the K columns of `A`.
    pub fn check_lag_order(&self, p: usize) -> SvarResult<()> {
        if p == 0 || self.n * p > self.k {
            return Err(SvarError::InvalidLagOrder { p, k: self.k, n: self.n });
        }
        Ok(())
    }

    /// Check that a shared sign-normalization reference is N×N.
    pub fn check_reference(&self, reference: &Array2<f64>) -> SvarResult<()> {
        check_shape("reference matrix", reference, (self.n, self.n))
    }
}

/// Check that `matrix` has exactly `shape = (rows, cols)`.
pub(crate) fn check_shape(
    what: &'static str, matrix: &Array2<f64>, shape: (usize, usize),
) -> SvarResult<()> {
    if matrix.nrows() != shape.0 {
        return Err(SvarError::DimensionMismatch {
            what,
            expected: shape.0,
            actual: matrix.nrows(),
        });
    }
    if matrix.ncols() != shape.1 {
        return Err(SvarError::DimensionMismatch {
            what,
            expected: shape.1,
            actual: matrix.ncols(),
        });
    }
    Ok(())
}
