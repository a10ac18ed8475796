//! Posterior draws — per-sample parameter containers.
//!
//! Purpose
//! -------
//! Represent one MCMC draw of an MS-TVP-SVAR (or of a fixed-regime SVAR) as
//! plain owned arrays: regime-specific structural matrices `B[m]`, the
//! autoregressive coefficient matrix `A`, the residual scale, and, for
//! Markov-switching models, the regime chain (`PR_TR`, `pi0`).
//!
//! Key behaviors
//! -------------
//! - [`PosteriorDraw::fixed`] and [`PosteriorDraw::switching`] build draws for
//!   the two model variants without copying or validating array contents.
//! - [`MarkovChain::new`] validates the transition matrix and initial
//!   distribution (square, rows on the simplex, matching lengths).
//! - [`ResidualScale`] supports both a constant per-equation scale and a
//!   time-varying (stochastic-volatility) N×T scale.
//!
//! Invariants & assumptions
//! ------------------------
//! - Cross-draw consistency (same N, K, M everywhere) is checked once at
//!   batch entry by [`crate::posterior::Dims`], not per draw.
//! - Draws are read-only once constructed; every routine borrows them.
//!
//! Conventions
//! -----------
//! - `PR_TR[i, j]` is the probability of moving *from* regime `i` *to* regime
//!   `j`; rows sum to one.
//! - `A` stacks lag blocks first: columns `(l−1)·N .. l·N` hold lag `l`,
//!   followed by any deterministic or exogenous columns.
use crate::errors::{SvarError, SvarResult};
use ndarray::{Array1, Array2};

/// Tolerance for rows of `PR_TR` and `pi0` summing to one.
pub const SIMPLEX_TOL: f64 = 1e-8;

/// `MarkovChain` — regime transition matrix and initial distribution.
///
/// Fields
/// ------
/// - `transition`: `Array2<f64>`
///   M×M matrix, `transition[[i, j]] = P(s_t = j | s_{t−1} = i)`.
/// - `initial`: `Array1<f64>`
///   Length-M initial regime distribution `pi0`.
///
/// Invariants
/// ----------
/// - `transition` is square with `M ≥ 1` rows, each row non-negative, finite,
///   and summing to one (inputs within [`SIMPLEX_TOL`] are rescaled).
/// - `initial.len() == M`, entries non-negative and summing to one.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkovChain {
    pub transition: Array2<f64>,
    pub initial: Array1<f64>,
}

impl MarkovChain {
    /// Construct a validated regime chain.
    ///
    /// Rows of `transition` and `initial` within [`SIMPLEX_TOL`] of one are
    /// rescaled to sum to one exactly, so `PR_TRᵀ · p` stays on the simplex.
    ///
    /// Errors
    /// ------
    /// - `SvarError::EmptyCollection` if `transition` has no rows.
    /// - `SvarError::DimensionMismatch` if `transition` is not square or
    ///   `initial` has the wrong length.
    /// - `SvarError::InvalidProbability` for a negative or non-finite entry,
    ///   or a row / `initial` whose sum differs from one. For row-sum
    ///   failures `index` is the row and `value` the offending sum.
    pub fn new(transition: Array2<f64>, initial: Array1<f64>) -> SvarResult<Self> {
        let m = transition.nrows();
        if m == 0 {
            return Err(SvarError::EmptyCollection { what: "regimes" });
        }
        if transition.ncols() != m {
            return Err(SvarError::DimensionMismatch {
                what: "transition matrix columns",
                expected: m,
                actual: transition.ncols(),
            });
        }
        if initial.len() != m {
            return Err(SvarError::DimensionMismatch {
                what: "initial distribution length",
                expected: m,
                actual: initial.len(),
            });
        }

        let mut transition = transition;
        let mut initial = initial;
        for (i, mut row) in transition.rows_mut().into_iter().enumerate() {
            let sum = validate_simplex(row.iter().copied(), "transition matrix row", i)?;
            row /= sum;
        }
        let sum = validate_simplex(initial.iter().copied(), "initial distribution", 0)?;
        initial /= sum;

        Ok(MarkovChain { transition, initial })
    }

    /// Number of regimes `M`.
    pub fn regimes(&self) -> usize {
        self.initial.len()
    }
}

/// Check a probability vector and return its sum.
fn validate_simplex(
    values: impl Iterator<Item = f64>, what: &'static str, index: usize,
) -> SvarResult<f64> {
    let mut sum = 0.0;
    for value in values {
        if !value.is_finite() || value < 0.0 {
            return Err(SvarError::InvalidProbability { what, index, value });
        }
        sum += value;
    }
    if (sum - 1.0).abs() > SIMPLEX_TOL {
        return Err(SvarError::InvalidProbability { what, index, value: sum });
    }
    Ok(sum)
}

/// `ResidualScale` — per-equation residual scale, constant or time-varying.
///
/// Variants
/// --------
/// - `Constant(Array1<f64>)`
///   Length-N scale shared by every period.
/// - `TimeVarying(Array2<f64>)`
///   N×T scale path (e.g. stochastic volatility), one column per period.
#[derive(Debug, Clone, PartialEq)]
pub enum ResidualScale {
    Constant(Array1<f64>),
    TimeVarying(Array2<f64>),
}

impl ResidualScale {
    /// Unit scale for `n` equations (no rescaling).
    pub fn unit(n: usize) -> Self {
        ResidualScale::Constant(Array1::ones(n))
    }

    /// Scale of equation `i` at period `t`.
    ///
    /// Panics if `i` or `t` are out of bounds; shapes are checked at batch
    /// entry.
    #[inline]
    pub fn at(&self, i: usize, t: usize) -> f64 {
        match self {
            ResidualScale::Constant(sigma) => sigma[i],
            ResidualScale::TimeVarying(sigma) => sigma[[i, t]],
        }
    }

    /// Number of equations covered.
    pub fn equations(&self) -> usize {
        match self {
            ResidualScale::Constant(sigma) => sigma.len(),
            ResidualScale::TimeVarying(sigma) => sigma.nrows(),
        }
    }

    /// Check shape against `(n, periods)` and strict positivity of every entry.
    ///
    /// Errors
    /// ------
    /// - `SvarError::DimensionMismatch` on a wrong row or column count.
    /// - `SvarError::InvalidScale` on the first non-finite or non-positive
    ///   entry (flat, row-major index).
    pub fn check(&self, n: usize, periods: usize) -> SvarResult<()> {
        if self.equations() != n {
            return Err(SvarError::DimensionMismatch {
                what: "residual scale rows",
                expected: n,
                actual: self.equations(),
            });
        }
        let is_invalid = |&(_, value): &(usize, f64)| !value.is_finite() || value <= 0.0;
        let first_invalid = match self {
            ResidualScale::Constant(sigma) => sigma.iter().copied().enumerate().find(is_invalid),
            ResidualScale::TimeVarying(sigma) => {
                if sigma.ncols() != periods {
                    return Err(SvarError::DimensionMismatch {
                        what: "residual scale columns",
                        expected: periods,
                        actual: sigma.ncols(),
                    });
                }
                sigma.iter().copied().enumerate().find(is_invalid)
            }
        };
        match first_invalid {
            Some((index, value)) => Err(SvarError::InvalidScale { index, value }),
            None => Ok(()),
        }
    }
}

/// `PosteriorDraw` — one MCMC sample of the model parameters.
///
/// Fields
/// ------
/// - `impact`: `Vec<Array2<f64>>`
///   Structural matrices `B[m]`, one N×N matrix per regime (length 1 for a
///   fixed-regime SVAR).
/// - `coefficients`: `Array2<f64>`
///   Autoregressive coefficient matrix `A` (N×K).
/// - `scale`: [`ResidualScale`]
///   Residual scale used to standardize shocks.
/// - `chain`: `Option<MarkovChain>`
///   Regime chain for Markov-switching draws; `None` for fixed-regime draws.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorDraw {
    pub impact: Vec<Array2<f64>>,
    pub coefficients: Array2<f64>,
    pub scale: ResidualScale,
    pub chain: Option<MarkovChain>,
}

impl PosteriorDraw {
    /// Draw of a fixed-regime SVAR (M = 1, no chain).
    pub fn fixed(impact: Array2<f64>, coefficients: Array2<f64>, scale: ResidualScale) -> Self {
        PosteriorDraw { impact: vec![impact], coefficients, scale, chain: None }
    }

    /// Draw of a Markov-switching SVAR with one impact matrix per regime.
    pub fn switching(
        impact: Vec<Array2<f64>>, coefficients: Array2<f64>, scale: ResidualScale,
        chain: MarkovChain,
    ) -> Self {
        PosteriorDraw { impact, coefficients, scale, chain: Some(chain) }
    }

    /// Number of regime-specific impact matrices.
    pub fn regimes(&self) -> usize {
        self.impact.len()
    }
}
