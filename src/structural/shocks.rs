//! Structural shocks and fitted values for one posterior draw.
//!
//! Purpose
//! -------
//! Recover the structural shock path `ε_t` (N×T) from reduced-form residuals
//! `u_t = Y[:, t] − A·X[:, t]` in one of two modes:
//!
//! ```text
//! Weighted:  ε_t(i) = [ (Σ_m p(m, t) B[m]) · u_t ]_i / σ(i, t)
//! Selected:  ε_t    = B[m*_t] · u_t,     m*_t = argmax_m p(m, t)
//! ```
//!
//! With a single regime the weighted blend reduces to `B · u_t / σ`.
//!
//! Key behaviors
//! -------------
//! - `Weighted` needs probabilities only when M > 1.
//! - `Selected` always needs probabilities and applies no residual scale.
//! - Ties in `argmax` resolve to the lowest regime index.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shapes are validated at batch entry; probability paths are M×T.
//! - Pure functions; no I/O, no logging.
use crate::{
    errors::{SvarError, SvarResult},
    posterior::{draws::PosteriorDraw, panel::ObservationPanel},
    regimes::evidence::residuals,
};
use ndarray::{Array2, ArrayView1};

/// How regime information enters the structural shock computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShockMode {
    /// Probability-weighted impact matrix, scaled by the residual scale.
    #[default]
    Weighted,
    /// Impact matrix of the most probable regime, unscaled.
    Selected,
}

/// Fitted values `A · X` (N×T).
pub fn fitted_values(coefficients: &Array2<f64>, x: &Array2<f64>) -> Array2<f64> {
    coefficients.dot(x)
}

/// Index of the most probable regime in one probability column.
///
/// Returns the first maximal index on ties; NaN entries never win.
///
/// Errors
/// ------
/// - `SvarError::InvalidRegimeIndex` if the column is empty.
pub fn most_probable_regime(probabilities: ArrayView1<f64>, t: usize) -> SvarResult<usize> {
    let regimes = probabilities.len();
    let mut best = 0;
    for (m, &p) in probabilities.iter().enumerate().skip(1) {
        if p > probabilities[best] || probabilities[best].is_nan() {
            best = m;
        }
    }
    if best >= regimes {
        return Err(SvarError::InvalidRegimeIndex { t, index: best, regimes });
    }
    Ok(best)
}

/// Structural shocks with a probability-weighted impact matrix.
///
/// Parameters
/// ----------
/// - `draw`: `&PosteriorDraw`
///   Supplies `B[m]`, `A`, and the residual scale.
/// - `probabilities`: `Option<&Array2<f64>>`
///   M×T regime probabilities; may be `None` for single-regime draws.
/// - `panel`: `&ObservationPanel`
///   Observations and regressors.
///
/// Returns
/// -------
/// `SvarResult<Array2<f64>>`
///   N×T standardized structural shocks.
///
/// Errors
/// ------
/// - `SvarError::EmptyCollection` if the draw has several regimes and no
///   probabilities were supplied.
pub fn structural_shocks_weighted(
    draw: &PosteriorDraw, probabilities: Option<&Array2<f64>>, panel: &ObservationPanel,
) -> SvarResult<Array2<f64>> {
    let u = residuals(&draw.coefficients, panel);
    let mut shocks = match (draw.impact.as_slice(), probabilities) {
        ([b], _) => b.dot(&u),
        (impact, Some(probs)) => {
            let mut shocks = Array2::<f64>::zeros(u.raw_dim());
            for (t, mut column) in shocks.columns_mut().into_iter().enumerate() {
                let mut blend = Array2::<f64>::zeros(impact[0].raw_dim());
                for (b, &p) in impact.iter().zip(probs.column(t)) {
                    blend.scaled_add(p, b);
                }
                column.assign(&blend.dot(&u.column(t)));
            }
            shocks
        }
        (_, None) => return Err(SvarError::EmptyCollection { what: "regime probabilities" }),
    };

    for ((i, t), value) in shocks.indexed_iter_mut() {
        *value /= draw.scale.at(i, t);
    }
    Ok(shocks)
}

/// Structural shocks from the most probable regime at each period (no scale).
///
/// Errors
/// ------
/// - `SvarError::InvalidRegimeIndex` if the selected regime has no impact
///   matrix in this draw.
pub fn structural_shocks_selected(
    draw: &PosteriorDraw, probabilities: &Array2<f64>, panel: &ObservationPanel,
) -> SvarResult<Array2<f64>> {
    let u = residuals(&draw.coefficients, panel);
    let regimes = draw.regimes();
    let mut shocks = Array2::<f64>::zeros(u.raw_dim());

    for (t, mut column) in shocks.columns_mut().into_iter().enumerate() {
        let index = most_probable_regime(probabilities.column(t), t)?;
        let b = draw
            .impact
            .get(index)
            .ok_or(SvarError::InvalidRegimeIndex { t, index, regimes })?;
        column.assign(&b.dot(&u.column(t)));
    }
    Ok(shocks)
}

/// Dispatch on [`ShockMode`].
///
/// Errors
/// ------
/// - `SvarError::EmptyCollection` when probabilities are required but absent.
/// - Errors from the selected mode.
pub fn structural_shocks(
    draw: &PosteriorDraw, probabilities: Option<&Array2<f64>>, panel: &ObservationPanel,
    mode: ShockMode,
) -> SvarResult<Array2<f64>> {
    match mode {
        ShockMode::Weighted => structural_shocks_weighted(draw, probabilities, panel),
        ShockMode::Selected => {
            let probs =
                probabilities.ok_or(SvarError::EmptyCollection { what: "regime probabilities" })?;
            structural_shocks_selected(draw, probs, panel)
        }
    }
}
