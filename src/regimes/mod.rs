//! regimes — Hamilton filter, Kim smoother, and regime probability paths.
//!
//! Purpose
//! -------
//! Compute regime probability paths of a Markov-switching SVAR draw from the
//! observation panel: per-regime evidence ([`evidence`]), the forward filter
//! ([`filter`]), one-step forecasts and the backward smoother ([`smoother`]),
//! and the per-draw composition used by the batch layer ([`paths`]).
//!
//! Key behaviors
//! -------------
//! - Evidence is the Gaussian log density of standardized structural shocks,
//!   summed over equations.
//! - The filter normalizes every period and resolves vanishing weights via
//!   [`DegeneracyPolicy`].
//! - Forecast and smoothed paths are derived from the filtered path without
//!   revisiting the data.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every returned column lies on the probability simplex.
//! - Shapes are validated at batch entry; functions here index freely.
//!
//! Conventions
//! -----------
//! - Probability paths are M×T (`[regime, time]`).
//! - `PR_TR` is row-stochastic (from-row, to-column); predictions use its
//!   transpose.
//! - No I/O and no logging.

pub mod evidence;
pub mod filter;
pub mod paths;
pub mod smoother;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::evidence::{log_evidence, residuals, standardized_shocks};
pub use self::filter::{DegeneracyPolicy, filter_probabilities, predict};
pub use self::paths::{ProbabilityKind, probability_path};
pub use self::smoother::{forecast_probabilities, smooth_probabilities};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use svar_posterior::regimes::prelude::*;
//
// to import the regime-probability surface in a single line.

pub mod prelude {
    pub use super::filter::{DegeneracyPolicy, filter_probabilities};
    pub use super::paths::{ProbabilityKind, probability_path};
    pub use super::smoother::{forecast_probabilities, smooth_probabilities};
}
