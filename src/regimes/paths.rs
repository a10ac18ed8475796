//! Regime probability paths — per-draw entry point for filtered, forecasted,
//! and smoothed probabilities.
//!
//! Purpose
//! -------
//! Chain evidence → filter → (forecast | smoother) for one posterior draw and
//! return the requested M×T path. This is the unit of work the batch driver
//! runs once per draw.
//!
//! Invariants & assumptions
//! ------------------------
//! - The draw carries a regime chain and shapes agree with the panel; both
//!   are checked at batch entry (`Dims::check_chains`, `Dims::check_panel`,
//!   `Dims::check_scales`).
//! - Only `SvarError::DegenerateLikelihood` can be returned for validated
//!   input.
use crate::{
    errors::{SvarError, SvarResult},
    posterior::{draws::PosteriorDraw, panel::ObservationPanel},
    regimes::{
        evidence::{log_evidence, standardized_shocks},
        filter::{DegeneracyPolicy, filter_probabilities},
        smoother::{forecast_probabilities, smooth_probabilities},
    },
};
use ndarray::Array2;

/// Which regime probability path to report.
///
/// - `Filtered`: `ξ_{t|t}`, conditioning on data up to `t`.
/// - `Forecasted`: `ξ_{t+1|t} = PR_TRᵀ ξ_{t|t}`.
/// - `Smoothed`: `ξ_{t|T}`, conditioning on the full sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbabilityKind {
    #[default]
    Filtered,
    Forecasted,
    Smoothed,
}

/// Compute one draw's regime probability path.
///
/// Parameters
/// ----------
/// - `draw`: `&PosteriorDraw`
///   Must carry a regime chain.
/// - `panel`: `&ObservationPanel`
///   Observations `Y` and regressors `X`.
/// - `kind`: [`ProbabilityKind`]
///   Path to return.
/// - `policy`: [`DegeneracyPolicy`]
///   Forwarded to the filter.
///
/// Returns
/// -------
/// `SvarResult<Array2<f64>>`
///   M×T probability path whose columns lie on the simplex.
///
/// Errors
/// ------
/// - `SvarError::EmptyCollection` if the draw has no regime chain.
/// - `SvarError::DegenerateLikelihood` from the filter under
///   `DegeneracyPolicy::Abort`.
pub fn probability_path(
    draw: &PosteriorDraw, panel: &ObservationPanel, kind: ProbabilityKind,
    policy: DegeneracyPolicy,
) -> SvarResult<Array2<f64>> {
    let chain = draw.chain.as_ref().ok_or(SvarError::EmptyCollection { what: "regime chain" })?;
    let shocks = standardized_shocks(draw, panel);
    let evidence = log_evidence(&shocks);
    let filtered = filter_probabilities(&evidence, chain, policy)?;

    let path = match kind {
        ProbabilityKind::Filtered => filtered,
        ProbabilityKind::Forecasted => forecast_probabilities(&filtered, chain),
        ProbabilityKind::Smoothed => smooth_probabilities(&filtered, chain),
    };
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posterior::draws::{MarkovChain, ResidualScale};
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the composition of evidence, filter, forecast, and
    // smoother for a single draw, and the missing-chain error.
    // -------------------------------------------------------------------------

    fn switching_draw() -> PosteriorDraw {
        // Regime 0 has unit impact, regime 1 inflates shocks tenfold, so
        // small residuals favor regime 0.
        let chain = MarkovChain::new(array![[0.9, 0.1], [0.2, 0.8]], array![0.5, 0.5]).unwrap();
        PosteriorDraw::switching(
            vec![Array2::eye(2), Array2::eye(2) * 10.0],
            Array2::zeros((2, 1)),
            ResidualScale::unit(2),
            chain,
        )
    }

    fn small_residual_panel() -> ObservationPanel {
        let y = array![[0.1, -0.2, 0.05, 0.0], [0.0, 0.1, -0.1, 0.2]];
        ObservationPanel::new(y, Array2::ones((1, 4))).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that all three path kinds are consistent with each other.
    //
    // Given
    // -----
    // - A two-regime draw and a panel of small residuals.
    //
    // Expect
    // ------
    // - Filtered path favors regime 0 at every period.
    // - Forecast equals `PR_TRᵀ` times the filtered path.
    // - Smoothed and filtered paths agree at the last period.
    fn probability_path_kinds_are_consistent() {
        let draw = switching_draw();
        let panel = small_residual_panel();
        let policy = DegeneracyPolicy::Abort;

        let path = |kind| probability_path(&draw, &panel, kind, policy).unwrap();
        let filtered = path(ProbabilityKind::Filtered);
        let forecast = path(ProbabilityKind::Forecasted);
        let smoothed = path(ProbabilityKind::Smoothed);

        assert!(filtered.row(0).iter().all(|&p| p > 0.5));
        let chain = draw.chain.as_ref().unwrap();
        let expected_forecast = chain.transition.t().dot(&filtered);
        for (a, b) in forecast.iter().zip(expected_forecast.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
        assert_eq!(smoothed.column(3), filtered.column(3));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a draw without a regime chain is rejected.
    //
    // Given
    // -----
    // - A fixed-regime draw.
    //
    // Expect
    // ------
    // - `EmptyCollection { what: "regime chain" }`.
    fn probability_path_requires_chain() {
        let draw =
            PosteriorDraw::fixed(Array2::eye(2), Array2::zeros((2, 1)), ResidualScale::unit(2));

        let err = probability_path(
            &draw,
            &small_residual_panel(),
            ProbabilityKind::Filtered,
            DegeneracyPolicy::Abort,
        )
        .unwrap_err();

        assert_eq!(err, SvarError::EmptyCollection { what: "regime chain" });
    }
}
