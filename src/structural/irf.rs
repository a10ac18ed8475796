//! Impulse responses — propagate structural impact through the VAR lags.
//!
//! Purpose
//! -------
//! Compute the response tensor `R` (N×N×(H+1)) of one impact matrix `B` and
//! one coefficient matrix `A`:
//!
//! ```text
//! R(0) = B
//! R(h) = Σ_{l=1..min(h,p)} A_l · R(h − l),      h = 1, …, H
//! A_l  = A[:, (l−1)·N .. l·N]
//! ```
//!
//! `R[i, j, h]` is the response of variable `i` to shock `j` after `h`
//! periods.
//!
//! Key behaviors
//! -------------
//! - Columns of `A` beyond `N·p` (constants, exogenous regressors) do not
//!   propagate.
//! - With `standardise`, column `j` of every horizon slice is divided by the
//!   own impact response `B[j, j]`, so horizon-0 own responses equal one.
//!
//! Invariants & assumptions
//! ------------------------
//! - `B` is N×N and `A` has at least `N·p` columns; both are checked at batch
//!   entry (`Dims::check_lag_order`).
//! - Pure function; no I/O, no logging.
use crate::errors::{SvarError, SvarResult};
use ndarray::{Array2, Array3, ArrayView2, Axis, s};

/// Configuration for impulse-response computation.
///
/// Fields
/// ------
/// - `horizon`: `usize`
///   Last horizon `H`; the tensor has `H + 1` slices.
/// - `lag_order`: `usize`
///   Number of VAR lags `p` read from the coefficient matrix.
/// - `standardise`: `bool`
///   Divide each shock's responses by its own impact response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrfOptions {
    pub horizon: usize,
    pub lag_order: usize,
    pub standardise: bool,
}

impl IrfOptions {
    pub fn new(horizon: usize, lag_order: usize, standardise: bool) -> IrfOptions {
        IrfOptions { horizon, lag_order, standardise }
    }
}

impl Default for IrfOptions {
    /// Twenty periods ahead from a VAR(1), unstandardised.
    fn default() -> Self {
        IrfOptions { horizon: 20, lag_order: 1, standardise: false }
    }
}

/// Impulse-response tensor for one impact matrix.
///
/// Parameters
/// ----------
/// - `impact`: `&Array2<f64>`
///   Structural impact matrix `B` (N×N).
/// - `coefficients`: `&Array2<f64>`
///   Autoregressive coefficients `A` (N×K, `K ≥ N·p`).
/// - `options`: `&IrfOptions`
///   Horizon, lag order and standardisation flag.
///
/// Returns
/// -------
/// `SvarResult<Array3<f64>>`
///   Tensor of shape `(N, N, H + 1)`.
///
/// Errors
/// ------
/// - `SvarError::ZeroOwnResponse` when standardising and some `B[j, j]` is
///   zero or non-finite.
///
/// Panics
/// ------
/// - If `A` has fewer than `N·p` columns.
pub fn impulse_responses(
    impact: &Array2<f64>, coefficients: &Array2<f64>, options: &IrfOptions,
) -> SvarResult<Array3<f64>> {
    let n = impact.nrows();
    let p = options.lag_order;
    let lags: Vec<ArrayView2<f64>> =
        (0..p).map(|l| coefficients.slice(s![.., l * n..(l + 1) * n])).collect();

    let mut responses = Array3::<f64>::zeros((n, n, options.horizon + 1));
    responses.index_axis_mut(Axis(2), 0).assign(impact);

    for h in 1..=options.horizon {
        let mut step = Array2::<f64>::zeros((n, n));
        for (l, a_l) in lags.iter().enumerate().take(h) {
            step += &a_l.dot(&responses.index_axis(Axis(2), h - 1 - l));
        }
        responses.index_axis_mut(Axis(2), h).assign(&step);
    }

    if options.standardise {
        for j in 0..n {
            let own = impact[[j, j]];
            if own == 0.0 || !own.is_finite() {
                return Err(SvarError::ZeroOwnResponse { shock: j, value: own });
            }
            responses.index_axis_mut(Axis(1), j).mapv_inplace(|v| v / own);
        }
    }

    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Horizon-0 response equals the impact matrix.
    // - Propagation for VAR(1) (matrix powers) and VAR(2) (scalar recursion),
    //   ignoring trailing exogenous columns.
    // - Standardisation and the zero-own-response error.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify horizon 0 equals `B` and later horizons follow `A^h B` for a
    // VAR(1).
    //
    // Given
    // -----
    // - `B = [[1, 0.5], [0, 2]]`, `A = diag(0.5, 0.2)`, H = 3.
    //
    // Expect
    // ------
    // - `R(0) = B`; `R(h) = A^h B`.
    fn var1_responses_are_matrix_powers() {
        let b = array![[1.0, 0.5], [0.0, 2.0]];
        let a = array![[0.5, 0.0], [0.0, 0.2]];

        let r = impulse_responses(&b, &a, &IrfOptions::new(3, 1, false)).unwrap();

        assert_eq!(r.dim(), (2, 2, 4));
        assert_eq!(r.index_axis(Axis(2), 0), b);
        let mut power = b.clone();
        for h in 1..=3 {
            power = a.dot(&power);
            for (x, y) in r.index_axis(Axis(2), h).iter().zip(power.iter()) {
                assert_abs_diff_eq!(x, y, epsilon = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check a VAR(2) scalar recursion and that a constant column is ignored.
    //
    // Given
    // -----
    // - N = 1, `A = [0.5, 0.3, 10.0]` (two lags plus a constant), `B = 1`.
    //
    // Expect
    // ------
    // - Responses `1, 0.5, 0.55, 0.425`.
    fn var2_responses_follow_scalar_recursion() {
        let b = array![[1.0]];
        let a = array![[0.5, 0.3, 10.0]];

        let r = impulse_responses(&b, &a, &IrfOptions::new(3, 2, false)).unwrap();

        let expected = [1.0, 0.5, 0.55, 0.425];
        for (h, e) in expected.iter().enumerate() {
            assert_abs_diff_eq!(r[[0, 0, h]], *e, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify standardisation scales each shock column by its own impact.
    //
    // Given
    // -----
    // - `B = [[2, 1], [0.5, 4]]`, `A = 0.5 I`, H = 2.
    //
    // Expect
    // ------
    // - Horizon-0 diagonal equals one; `R[1, 0, 0] = 0.25`, `R[0, 1, 0] = 0.25`.
    // - Later horizons are the unstandardised responses divided likewise.
    fn standardised_responses_have_unit_own_impact() {
        let b = array![[2.0, 1.0], [0.5, 4.0]];
        let a = array![[0.5, 0.0], [0.0, 0.5]];

        let raw = impulse_responses(&b, &a, &IrfOptions::new(2, 1, false)).unwrap();
        let scaled = impulse_responses(&b, &a, &IrfOptions::new(2, 1, true)).unwrap();

        assert_abs_diff_eq!(scaled[[0, 0, 0]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(scaled[[1, 1, 0]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(scaled[[1, 0, 0]], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(scaled[[0, 1, 0]], 0.25, epsilon = 1e-12);
        for h in 0..=2 {
            assert_abs_diff_eq!(scaled[[1, 0, h]], raw[[1, 0, h]] / 2.0, epsilon = 1e-12);
            assert_abs_diff_eq!(scaled[[0, 1, h]], raw[[0, 1, h]] / 4.0, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure standardisation fails on a zero own impact response.
    //
    // Given
    // -----
    // - `B = [[0, 1], [1, 0]]`.
    //
    // Expect
    // ------
    // - `ZeroOwnResponse { shock: 0, value: 0 }`; without standardisation the
    //   call succeeds.
    fn standardise_rejects_zero_own_response() {
        let b = array![[0.0, 1.0], [1.0, 0.0]];
        let a = Array2::<f64>::eye(2);

        let err = impulse_responses(&b, &a, &IrfOptions::new(1, 1, true)).unwrap_err();

        assert_eq!(err, SvarError::ZeroOwnResponse { shock: 0, value: 0.0 });
        assert!(impulse_responses(&b, &a, &IrfOptions::new(1, 1, false)).is_ok());
    }
}
