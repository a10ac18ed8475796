//! Hamilton filter — forward recursion for regime probabilities.
//!
//! Purpose
//! -------
//! Compute the filtered probability path `ξ_{t|t}` (M×T) of a Markov-switching
//! model from per-regime log evidence and the regime chain:
//!
//! ```text
//! ξ_{0|0} ∝ π₀      ⊙ η_0
//! ξ_{t|t} ∝ PR_TRᵀ ξ_{t−1|t−1} ⊙ η_t          (t ≥ 1)
//! η_t(m)  = exp(ℓ(m, t) − max_j ℓ(j, t))
//! ```
//!
//! Key behaviors
//! -------------
//! - Exponentiates log evidence after a per-period max shift, so large N does
//!   not underflow every density to zero.
//! - Detects periods where every weighted probability vanishes (all evidence
//!   `−∞`/NaN, or evidence concentrated on regimes the chain cannot reach) and
//!   resolves them through [`DegeneracyPolicy`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Each returned column is on the probability simplex (sums to one up to
//!   floating-point rounding, entries in `[0, 1]`).
//! - The chain was validated by `MarkovChain::new`.
//! - Pure function: no I/O, no logging.
use crate::{
    errors::{SvarError, SvarResult},
    posterior::draws::MarkovChain,
};
use ndarray::{Array1, Array2, ArrayView1};

/// Behavior when every regime weight vanishes at some period.
///
/// - `Abort`: fail the draw with `SvarError::DegenerateLikelihood { t }`.
/// - `Predict`: use the one-step prediction (unweighted) for that period and
///   continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneracyPolicy {
    #[default]
    Abort,
    Predict,
}

/// One-step prediction `PR_TRᵀ · ξ`.
#[inline]
pub fn predict(transition: &Array2<f64>, probabilities: ArrayView1<f64>) -> Array1<f64> {
    transition.t().dot(&probabilities)
}

/// Run the forward filter over all periods.
///
/// Parameters
/// ----------
/// - `log_evidence`: `&Array2<f64>`
///   M×T matrix `ℓ(m, t)`; `−∞` and NaN entries carry zero weight.
/// - `chain`: `&MarkovChain`
///   Transition matrix and initial distribution (M regimes).
/// - `policy`: [`DegeneracyPolicy`]
///   Resolution of periods where all weights vanish.
///
/// Returns
/// -------
/// `SvarResult<Array2<f64>>`
///   Filtered probabilities, M×T.
///
/// Errors
/// ------
/// - `SvarError::DegenerateLikelihood { t }` under `DegeneracyPolicy::Abort`
///   at the first period whose weighted probabilities sum to zero.
///
/// Panics
/// ------
/// - If `log_evidence.nrows()` differs from the chain's regime count.
pub fn filter_probabilities(
    log_evidence: &Array2<f64>, chain: &MarkovChain, policy: DegeneracyPolicy,
) -> SvarResult<Array2<f64>> {
    let (m, periods) = log_evidence.dim();
    let mut filtered = Array2::<f64>::zeros((m, periods));

    for t in 0..periods {
        let prior = if t == 0 {
            chain.initial.clone()
        } else {
            predict(&chain.transition, filtered.column(t - 1))
        };
        let weights = evidence_weights(log_evidence.column(t));
        let joint = &prior * &weights;
        let total = joint.sum();

        let column = if total > 0.0 && total.is_finite() {
            joint / total
        } else {
            match policy {
                DegeneracyPolicy::Abort => return Err(SvarError::DegenerateLikelihood { t }),
                DegeneracyPolicy::Predict => {
                    let mass = prior.sum();
                    prior / mass
                }
            }
        };
        filtered.column_mut(t).assign(&column);
    }

    Ok(filtered)
}

/// Max-shifted evidence weights for one period; all zeros if no regime has
/// finite evidence.
fn evidence_weights(log_evidence: ArrayView1<f64>) -> Array1<f64> {
    let max = log_evidence
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Array1::zeros(log_evidence.len());
    }
    log_evidence.mapv(|ell| if ell.is_finite() { (ell - max).exp() } else { 0.0 })
}
