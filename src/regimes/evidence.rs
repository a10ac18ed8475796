//! Regime evidence — standardized structural shocks and their log densities.
//!
//! Purpose
//! -------
//! Turn one draw and the observation panel into the regime-conditional
//! evidence consumed by the Hamilton filter:
//!
//! ```text
//! u_t          = Y[:, t] − A · X[:, t]                (reduced-form residual)
//! ε^{(m)}(i,t) = [B[m] · u_t]_i / σ(i, t)             (standardized shock)
//! ℓ(m, t)      = Σ_i ln φ(ε^{(m)}(i, t))              (log evidence)
//! ```
//!
//! where `φ` is the standard normal density (`statrs::distribution::Normal`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Shapes were validated at batch entry (`Dims`), so indexing never goes
//!   out of bounds here.
//! - Non-finite residuals produce `ℓ = −∞` (or NaN); the filter treats those
//!   regimes as carrying zero weight.
//!
//! Conventions
//! -----------
//! - Evidence is kept on the log scale; the filter exponentiates after
//!   subtracting the per-period maximum, which leaves normalized
//!   probabilities unchanged while avoiding underflow for large N.
//! - Pure functions: no I/O, no logging.
use crate::posterior::{draws::PosteriorDraw, panel::ObservationPanel};
use ndarray::Array2;
use statrs::distribution::{Continuous, Normal};

/// Reduced-form residuals `U = Y − A·X` (N×T).
pub fn residuals(coefficients: &Array2<f64>, panel: &ObservationPanel) -> Array2<f64> {
    panel.y() - &coefficients.dot(panel.x())
}

/// Standardized structural shocks per regime: one N×T matrix per regime.
///
/// Parameters
/// ----------
/// - `draw`: `&PosteriorDraw`
///   Supplies `B[m]`, `A`, and the residual scale.
/// - `panel`: `&ObservationPanel`
///   Supplies `Y` and `X`.
///
/// Returns
/// -------
/// `Vec<Array2<f64>>`
///   Element `m` holds `σ⁻¹ ⊙ (B[m] · (Y − A·X))`.
pub fn standardized_shocks(draw: &PosteriorDraw, panel: &ObservationPanel) -> Vec<Array2<f64>> {
    let u = residuals(&draw.coefficients, panel);
    draw.impact
        .iter()
        .map(|b| {
            let mut shocks = b.dot(&u);
            for ((i, t), value) in shocks.indexed_iter_mut() {
                *value /= draw.scale.at(i, t);
            }
            shocks
        })
        .collect()
}

/// Log evidence `ℓ(m, t)` (M×T) from per-regime standardized shocks.
///
/// Each entry is the sum over equations of the standard-normal log density of
/// the standardized shock. Panics if `shocks` is empty.
pub fn log_evidence(shocks: &[Array2<f64>]) -> Array2<f64> {
    let m = shocks.len();
    let periods = shocks[0].ncols();
    let standard = Normal::standard();
    Array2::from_shape_fn((m, periods), |(regime, t)| {
        shocks[regime].column(t).iter().map(|&e| standard.ln_pdf(e)).sum()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posterior::draws::{PosteriorDraw, ResidualScale};
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::f64::consts::PI;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover residuals, per-regime standardization by a constant
    // and a time-varying scale, and the Gaussian log-evidence kernel.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify standardized shocks equal `B[m] (Y − A X) / σ` per regime.
    //
    // Given
    // -----
    // - N = 2, K = 1, T = 2; `A = [[1], [0]]`, `X = [[1, 2]]`.
    // - Regime 0: `B = I`; regime 1: `B = 2 I`; time-varying σ.
    //
    // Expect
    // ------
    // - Hand-computed values for both regimes.
    fn standardized_shocks_scale_each_regime() {
        let panel =
            ObservationPanel::new(array![[2.0, 4.0], [1.0, -1.0]], array![[1.0, 2.0]]).unwrap();
        let scale = ResidualScale::TimeVarying(array![[1.0, 2.0], [0.5, 1.0]]);
        let chain = crate::posterior::MarkovChain::new(
            array![[0.5, 0.5], [0.5, 0.5]],
            array![0.5, 0.5],
        )
        .unwrap();
        let draw = PosteriorDraw::switching(
            vec![array![[1.0, 0.0], [0.0, 1.0]], array![[2.0, 0.0], [0.0, 2.0]]],
            array![[1.0], [0.0]],
            scale,
            chain,
        );

        let shocks = standardized_shocks(&draw, &panel);

        // U = [[1, 2], [1, -1]]
        assert_eq!(shocks.len(), 2);
        assert_eq!(shocks[0], array![[1.0, 1.0], [2.0, -1.0]]);
        assert_eq!(shocks[1], array![[2.0, 2.0], [4.0, -2.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Check the log-evidence kernel against the closed-form normal log density.
    //
    // Given
    // -----
    // - One regime, N = 2, T = 1, shocks `(0, 1)`.
    //
    // Expect
    // ------
    // - `ℓ = −ln(2π) − 1/2`.
    fn log_evidence_matches_closed_form() {
        let shocks = vec![array![[0.0], [1.0]]];

        let ell = log_evidence(&shocks);

        assert_abs_diff_eq!(ell[[0, 0]], -(2.0 * PI).ln() - 0.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an infinite shock yields `−∞` log evidence rather than a panic.
    //
    // Given
    // -----
    // - One regime with shock `+∞`.
    //
    // Expect
    // ------
    // - `ℓ` is `−∞`.
    fn log_evidence_is_negative_infinity_for_infinite_shock() {
        let ell = log_evidence(&[array![[f64::INFINITY]]]);
        assert_eq!(ell[[0, 0]], f64::NEG_INFINITY);
    }
}
