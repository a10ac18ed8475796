//! Observation panel — the shared `Y` / `X` data every draw is evaluated on.
//!
//! Purpose
//! -------
//! Hold the dependent-variable matrix `Y` (N×T) and the regressor matrix `X`
//! (K×T) used by residual, shock, and probability computations. The panel is
//! created once per batch call and shared read-only across all draws.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Y` and `X` have the same, strictly positive, number of columns `T`.
//! - Columns index time; rows index variables (`Y`) or regressors (`X`).
//! - Values are not inspected for finiteness here; non-finite observations
//!   surface downstream as vanishing regime evidence.
use crate::errors::{SvarError, SvarResult};
use ndarray::{Array2, ArrayView1};

/// `ObservationPanel` — validated `Y` (N×T) and `X` (K×T) pair.
///
/// Fields
/// ------
/// - `y`: `Array2<f64>`
///   Dependent variables, one row per equation, one column per period.
/// - `x`: `Array2<f64>`
///   Regressors (lags, constant, exogenous terms), one column per period.
///
/// Invariants
/// ----------
/// - `y.ncols() == x.ncols() > 0`; fields are private so only
///   [`ObservationPanel::new`] can build a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationPanel {
    y: Array2<f64>,
    x: Array2<f64>,
}

impl ObservationPanel {
    /// Construct a panel, checking that `Y` and `X` share a non-empty time axis.
    ///
    /// Errors
    /// ------
    /// - `SvarError::EmptyCollection` when `T == 0`.
    /// - `SvarError::DimensionMismatch` when `X` has a different column count
    ///   than `Y`.
    pub fn new(y: Array2<f64>, x: Array2<f64>) -> SvarResult<Self> {
        if y.ncols() == 0 {
            return Err(SvarError::EmptyCollection { what: "observation periods" });
        }
        if x.ncols() != y.ncols() {
            return Err(SvarError::DimensionMismatch {
                what: "X columns",
                expected: y.ncols(),
                actual: x.ncols(),
            });
        }
        Ok(ObservationPanel { y, x })
    }

    /// Dependent-variable matrix `Y` (N×T).
    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// Regressor matrix `X` (K×T).
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Number of periods `T`.
    pub fn periods(&self) -> usize {
        self.y.ncols()
    }

    /// Number of equations `N`.
    pub fn variables(&self) -> usize {
        self.y.nrows()
    }

    /// Number of regressors `K`.
    pub fn regressors(&self) -> usize {
        self.x.nrows()
    }

    pub fn y_at(&self, t: usize) -> ArrayView1<'_, f64> {
        self.y.column(t)
    }

    pub fn x_at(&self, t: usize) -> ArrayView1<'_, f64> {
        self.x.column(t)
    }
}
