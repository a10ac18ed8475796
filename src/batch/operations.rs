//! Batch operations — public entry points over a posterior draw collection.
//!
//! Purpose
//! -------
//! Expose the post-processing surface consumed by downstream analysis code:
//!
//! - [`compute_impulse_responses`]: per-draw, per-regime response tensors.
//! - [`compute_probability_paths`]: filtered, forecasted or smoothed regime
//!   probabilities per draw.
//! - [`compute_fitted_values`]: `A · X` per draw.
//! - [`compute_structural_shocks`]: weighted or regime-selected shocks per
//!   draw.
//! - [`normalize_signs`], [`select_sign_vectors`]: Waggoner–Zha sign
//!   normalization of one impact matrix per draw.
//! - [`normalize_regime_signs`]: the same for every regime of every draw.
//!
//! Key behaviors
//! -------------
//! - Every operation validates shapes once ([`Dims`]) before any per-draw
//!   work starts; shape problems are batch-fatal.
//! - Shared inputs (panel, reference, precomputed inverses) are borrowed
//!   read-only by every worker.
//! - Each operation runs inside a `tracing` span carrying the draw count.
//!
//! Conventions
//! -----------
//! - Output slot `s` corresponds to input draw `s`; regime-indexed outputs
//!   are `Vec`s of length M inside each slot.
use crate::{
    batch::{driver::BatchDriver, options::BatchOptions, output::BatchOutput},
    errors::{SvarError, SvarResult},
    posterior::{dims::{Dims, check_shape}, draws::PosteriorDraw, panel::ObservationPanel},
    regimes::paths::{ProbabilityKind, probability_path},
    structural::{
        irf::{IrfOptions, impulse_responses},
        normalization::{SignNormalization, SignOptions, SignReference},
        shocks::{ShockMode, fitted_values, structural_shocks},
    },
};
use ndarray::{Array1, Array2, Array3};
use tracing::{debug, instrument, warn};

/// Impulse responses for every regime of every draw.
///
/// Parameters
/// ----------
/// - `draws`: `&[PosteriorDraw]`
///   Fixed-regime (M = 1) or Markov-switching draws.
/// - `irf`: `&IrfOptions`
///   Horizon `H`, lag order `p`, standardisation flag.
/// - `options`: `&BatchOptions`
///   Execution strategy.
///
/// Returns
/// -------
/// `SvarResult<BatchOutput<Vec<Array3<f64>>>>`
///   Slot `s` holds M tensors of shape `(N, N, H + 1)`.
///
/// Errors
/// ------
/// - `EmptyCollection` / `DimensionMismatch` for inconsistent draws.
/// - `InvalidLagOrder` if `p = 0` or `N·p > K`.
/// - Per slot: `ZeroOwnResponse` when standardising.
#[instrument(
    skip_all,
    fields(draws = draws.len(), horizon = irf.horizon, lag_order = irf.lag_order)
)]
pub fn compute_impulse_responses(
    draws: &[PosteriorDraw], irf: &IrfOptions, options: &BatchOptions,
) -> SvarResult<BatchOutput<Vec<Array3<f64>>>> {
    let dims = Dims::from_draws(draws)?;
    dims.check_lag_order(irf.lag_order)?;
    debug!(n = dims.n, k = dims.k, regimes = dims.m, "computing impulse responses");

    BatchDriver::new(options.execution).run(draws, |_, draw| {
        draw.impact.iter().map(|b| impulse_responses(b, &draw.coefficients, irf)).collect()
    })
}

/// Regime probability paths (M×T) for every draw.
///
/// Errors
/// ------
/// - `DimensionMismatch` if the panel, scales or chains disagree with the
///   draws, or some draw has no regime chain.
/// - `InvalidScale` for a non-positive or non-finite residual scale.
/// - Per slot: `DegenerateLikelihood` under `DegeneracyPolicy::Abort`.
#[instrument(skip_all, fields(draws = draws.len(), periods = panel.periods(), kind = ?kind))]
pub fn compute_probability_paths(
    draws: &[PosteriorDraw], panel: &ObservationPanel, kind: ProbabilityKind,
    options: &BatchOptions,
) -> SvarResult<BatchOutput<Array2<f64>>> {
    let dims = Dims::from_draws(draws)?;
    dims.check_panel(panel)?;
    dims.check_scales(draws, panel.periods())?;
    dims.check_chains(draws)?;
    debug!(
        n = dims.n,
        regimes = dims.m,
        policy = ?options.degeneracy,
        "filtering regime probabilities"
    );

    BatchDriver::new(options.execution)
        .run(draws, |_, draw| probability_path(draw, panel, kind, options.degeneracy))
}

/// Fitted values `A · X` (N×T) for every draw.
///
/// Errors
/// ------
/// - `DimensionMismatch` if `X` does not have K rows.
#[instrument(skip_all, fields(draws = draws.len(), periods = x.ncols()))]
pub fn compute_fitted_values(
    draws: &[PosteriorDraw], x: &Array2<f64>, options: &BatchOptions,
) -> SvarResult<BatchOutput<Array2<f64>>> {
    let dims = Dims::from_draws(draws)?;
    if x.nrows() != dims.k {
        return Err(SvarError::DimensionMismatch {
            what: "rows of X",
            expected: dims.k,
            actual: x.nrows(),
        });
    }

    BatchDriver::new(options.execution)
        .run(draws, |_, draw| Ok(fitted_values(&draw.coefficients, x)))
}

/// Structural shocks (N×T) for every draw.
///
/// Parameters
/// ----------
/// - `draws`: `&[PosteriorDraw]`
///   Supplies `B[m]`, `A` and the residual scale.
/// - `probabilities`: `Option<&[Array2<f64>]>`
///   One M×T path per draw; required for `ShockMode::Selected` and for
///   weighted shocks when M > 1.
/// - `panel`: `&ObservationPanel`
///   Observations and regressors.
/// - `mode`: [`ShockMode`]
///   Weighted blend or most-probable regime.
/// - `options`: `&BatchOptions`
///   Execution strategy.
///
/// Errors
/// ------
/// - `DimensionMismatch` / `InvalidScale` for inconsistent inputs.
/// - `EmptyCollection` if probabilities are required but absent.
/// - Per slot: `InvalidRegimeIndex`.
#[instrument(skip_all, fields(draws = draws.len(), periods = panel.periods(), mode = ?mode))]
pub fn compute_structural_shocks(
    draws: &[PosteriorDraw], probabilities: Option<&[Array2<f64>]>, panel: &ObservationPanel,
    mode: ShockMode, options: &BatchOptions,
) -> SvarResult<BatchOutput<Array2<f64>>> {
    let dims = Dims::from_draws(draws)?;
    dims.check_panel(panel)?;
    dims.check_scales(draws, panel.periods())?;
    match probabilities {
        Some(paths) => dims.check_probabilities(paths, panel.periods())?,
        None if mode == ShockMode::Selected || dims.m > 1 => {
            return Err(SvarError::EmptyCollection { what: "regime probabilities" });
        }
        None => {}
    }

    BatchDriver::new(options.execution).run(draws, |s, draw| {
        structural_shocks(draw, probabilities.map(|paths| &paths[s]), panel, mode)
    })
}

/// Sign-normalize one impact matrix per draw against a shared reference.
///
/// Returns
/// -------
/// `SvarResult<BatchOutput<SignNormalization>>`
///   Slot `s` holds the selected signs and `diag(s) · B_s`.
///
/// Errors
/// ------
/// - `EmptyCollection` for no candidates; `DimensionMismatch` for shapes.
/// - `SignSearchTooLarge` / `SingularReference` (batch-fatal).
/// - Per slot: `SingularImpact`.
#[instrument(skip_all, fields(draws = candidates.len(), n = reference.nrows()))]
pub fn normalize_signs(
    candidates: &[Array2<f64>], reference: &Array2<f64>, signs: &SignOptions,
    options: &BatchOptions,
) -> SvarResult<BatchOutput<SignNormalization>> {
    let shared = prepare_reference(candidates, reference, signs)?;
    BatchDriver::new(options.execution).run(candidates, |_, b| shared.normalize(b))
}

/// Selected sign vectors only, one per candidate.
///
/// Errors
/// ------
/// - As [`normalize_signs`].
#[instrument(skip_all, fields(draws = candidates.len(), n = reference.nrows()))]
pub fn select_sign_vectors(
    candidates: &[Array2<f64>], reference: &Array2<f64>, signs: &SignOptions,
    options: &BatchOptions,
) -> SvarResult<BatchOutput<Array1<f64>>> {
    let shared = prepare_reference(candidates, reference, signs)?;
    BatchDriver::new(options.execution).run(candidates, |_, b| shared.select_signs(b))
}

/// Sign-normalize every regime's impact matrix of every draw.
///
/// A singular impact matrix in any regime fails that draw's slot.
///
/// Errors
/// ------
/// - As [`normalize_signs`], with draw shapes checked by [`Dims`].
#[instrument(skip_all, fields(draws = draws.len(), n = reference.nrows()))]
pub fn normalize_regime_signs(
    draws: &[PosteriorDraw], reference: &Array2<f64>, signs: &SignOptions,
    options: &BatchOptions,
) -> SvarResult<BatchOutput<Vec<SignNormalization>>> {
    let dims = Dims::from_draws(draws)?;
    dims.check_reference(reference)?;
    let shared = build_reference(reference, signs)?;

    BatchDriver::new(options.execution)
        .run(draws, |_, draw| draw.impact.iter().map(|b| shared.normalize(b)).collect())
}

fn prepare_reference(
    candidates: &[Array2<f64>], reference: &Array2<f64>, signs: &SignOptions,
) -> SvarResult<SignReference> {
    if candidates.is_empty() {
        return Err(SvarError::EmptyCollection { what: "impact matrices" });
    }
    let n = reference.nrows();
    if n == 0 {
        return Err(SvarError::EmptyCollection { what: "equations" });
    }
    check_shape("reference matrix", reference, (n, n))?;
    for b in candidates {
        check_shape("impact matrix", b, (n, n))?;
    }
    build_reference(reference, signs)
}

fn build_reference(reference: &Array2<f64>, signs: &SignOptions) -> SvarResult<SignReference> {
    let shared = SignReference::new(reference, signs)?;
    let n = shared.dimension();
    if n > signs.warn_dimension {
        warn!(
            n,
            candidates = shared.candidates(),
            "sign search enumerates 2^N candidates per draw"
        );
    }
    Ok(shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posterior::draws::{MarkovChain, ResidualScale};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Entry validation of each operation. Numerical behavior is covered by
    // the component unit tests and by the integration tests under `tests/`.
    // -------------------------------------------------------------------------

    fn fixed_draws() -> Vec<PosteriorDraw> {
        vec![PosteriorDraw::fixed(Array2::eye(2), Array2::zeros((2, 3)), ResidualScale::unit(2))]
    }

    fn switching_draws() -> Vec<PosteriorDraw> {
        let chain = MarkovChain::new(array![[0.9, 0.1], [0.2, 0.8]], array![0.5, 0.5]).unwrap();
        vec![PosteriorDraw::switching(
            vec![Array2::eye(2), Array2::eye(2)],
            Array2::zeros((2, 3)),
            ResidualScale::unit(2),
            chain,
        )]
    }

    fn panel() -> ObservationPanel {
        ObservationPanel::new(Array2::zeros((2, 4)), Array2::ones((3, 4))).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Ensure an oversized lag order is rejected before any draw is processed.
    //
    // Given
    // -----
    // - N = 2, K = 3, p = 2 (needs K ≥ 4).
    //
    // Expect
    // ------
    // - `InvalidLagOrder { p: 2, k: 3, n: 2 }`.
    fn impulse_responses_reject_lag_order_beyond_coefficients() {
        let err = compute_impulse_responses(
            &fixed_draws(),
            &IrfOptions::new(4, 2, false),
            &BatchOptions::sequential(),
        )
        .unwrap_err();
        assert_eq!(err, SvarError::InvalidLagOrder { p: 2, k: 3, n: 2 });
    }

    #[test]
    // Purpose
    // -------
    // Verify the residual scale only gates operations that standardize
    // shocks.
    //
    // Given
    // -----
    // - Switching N = 2 draws whose scale covers 3 equations.
    //
    // Expect
    // ------
    // - Impulse responses and per-regime signs succeed.
    // - Probability paths fail with `DimensionMismatch` on the scale rows.
    fn residual_scale_is_checked_only_where_used() {
        let mut draws = switching_draws();
        draws[0].scale = ResidualScale::unit(3);
        let opts = BatchOptions::sequential();

        let irf = compute_impulse_responses(&draws, &IrfOptions::new(2, 1, false), &opts).unwrap();
        assert_eq!(irf.succeeded(), 1);
        let reference = Array2::eye(2);
        let signs =
            normalize_regime_signs(&draws, &reference, &SignOptions::default(), &opts).unwrap();
        assert_eq!(signs.succeeded(), 1);

        let err = compute_probability_paths(&draws, &panel(), ProbabilityKind::Filtered, &opts)
            .unwrap_err();
        assert_eq!(
            err,
            SvarError::DimensionMismatch { what: "residual scale rows", expected: 2, actual: 3 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure probability paths require a regime chain on every draw.
    //
    // Given
    // -----
    // - Fixed-regime draws.
    //
    // Expect
    // ------
    // - `DimensionMismatch` naming the chain requirement.
    fn probability_paths_require_chains() {
        let err = compute_probability_paths(
            &fixed_draws(),
            &panel(),
            ProbabilityKind::Filtered,
            &BatchOptions::sequential(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SvarError::DimensionMismatch { what: "draws carrying a regime chain", .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure shock modes that need probabilities fail fast without them.
    //
    // Given
    // -----
    // - Switching draws (M = 2) without probabilities, weighted mode; fixed
    //   draws without probabilities, selected mode.
    //
    // Expect
    // ------
    // - `EmptyCollection { what: "regime probabilities" }` in both cases.
    fn structural_shocks_require_probabilities_when_needed() {
        let opts = BatchOptions::sequential();
        let expected = SvarError::EmptyCollection { what: "regime probabilities" };
        let panel = panel();

        let switching = switching_draws();
        let err = compute_structural_shocks(&switching, None, &panel, ShockMode::Weighted, &opts)
            .unwrap_err();
        assert_eq!(err, expected);

        let fixed = fixed_draws();
        let err = compute_structural_shocks(&fixed, None, &panel, ShockMode::Selected, &opts)
            .unwrap_err();
        assert_eq!(err, expected);
    }

    #[test]
    // Purpose
    // -------
    // Ensure fitted values check the regressor count.
    //
    // Given
    // -----
    // - K = 3 draws and a 2-row `X`.
    //
    // Expect
    // ------
    // - `DimensionMismatch { what: "rows of X", expected: 3, actual: 2 }`.
    fn fitted_values_check_regressor_rows() {
        let x = Array2::zeros((2, 4));
        let opts = BatchOptions::sequential();
        let err = compute_fitted_values(&fixed_draws(), &x, &opts).unwrap_err();
        assert_eq!(err, SvarError::DimensionMismatch { what: "rows of X", expected: 3, actual: 2 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure sign normalization validates candidate shapes and the reference.
    //
    // Given
    // -----
    // - No candidates; a 3×3 candidate against a 2×2 reference; a singular
    //   reference.
    //
    // Expect
    // ------
    // - `EmptyCollection`, `DimensionMismatch` on the impact matrix,
    //   `SingularReference`.
    fn sign_normalization_validates_inputs() {
        let opts = BatchOptions::sequential();
        let signs = SignOptions::default();
        let reference = Array2::<f64>::eye(2);

        assert!(matches!(
            normalize_signs(&[], &reference, &signs, &opts).unwrap_err(),
            SvarError::EmptyCollection { .. }
        ));
        assert_eq!(
            select_sign_vectors(&[Array2::eye(3)], &reference, &signs, &opts).unwrap_err(),
            SvarError::DimensionMismatch { what: "impact matrix", expected: 2, actual: 3 }
        );
        assert_eq!(
            normalize_signs(&[Array2::eye(2)], &array![[1.0, 1.0], [1.0, 1.0]], &signs, &opts)
                .unwrap_err(),
            SvarError::SingularReference
        );
    }
}
