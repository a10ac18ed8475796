//! Kim smoother and one-step forecasts for regime probabilities.
//!
//! Purpose
//! -------
//! Refine a filtered path `ξ_{t|t}` into
//! - forecasted probabilities `ξ_{t+1|t} = PR_TRᵀ ξ_{t|t}`, and
//! - smoothed probabilities (Kim, 1994)
//!
//! ```text
//! ξ_{T−1|T} = ξ_{T−1|T−1}
//! ξ_{t|T}   ∝ ξ_{t|t} ⊙ PR_TR · (ξ_{t+1|T} ⊘ ξ_{t+1|t}),   t = T−2, …, 0
//! ```
//!
//! Invariants & assumptions
//! ------------------------
//! - Input columns are on the simplex and `PR_TR` rows sum to one (rescaled
//!   by `MarkovChain::new`), so forecast columns stay on the simplex.
//! - Smoothed columns are renormalized at every step, so floating-point drift
//!   does not accumulate.
//! - A zero one-step prediction `ξ_{t+1|t}(j)` contributes zero to the ratio;
//!   such a regime also has zero smoothed mass at `t+1`.
//! - If a step's unnormalized mass is zero the filtered column is kept.
use crate::{posterior::draws::MarkovChain, regimes::filter::predict};
use ndarray::{Array1, Array2};

/// One-step-ahead forecast path `PR_TRᵀ · ξ_{t|t}` for every `t` (M×T).
pub fn forecast_probabilities(filtered: &Array2<f64>, chain: &MarkovChain) -> Array2<f64> {
    chain.transition.t().dot(filtered)
}

/// Full-sample smoothed path via backward recursion (M×T).
pub fn smooth_probabilities(filtered: &Array2<f64>, chain: &MarkovChain) -> Array2<f64> {
    let (m, periods) = filtered.dim();
    let mut smoothed = Array2::<f64>::zeros((m, periods));
    if periods == 0 {
        return smoothed;
    }
    let transition = &chain.transition;
    smoothed.column_mut(periods - 1).assign(&filtered.column(periods - 1));

    for t in (0..periods - 1).rev() {
        let current = filtered.column(t);
        let predicted = predict(transition, current);
        let ratio = Array1::from_shape_fn(m, |j| {
            if predicted[j] > 0.0 { smoothed[[j, t + 1]] / predicted[j] } else { 0.0 }
        });
        let unnormalized = transition.dot(&ratio) * &current;
        let total = unnormalized.sum();
        if total > 0.0 && total.is_finite() {
            smoothed.column_mut(t).assign(&(unnormalized / total));
        } else {
            smoothed.column_mut(t).assign(&current);
        }
    }

    smoothed
}
