//! svar_posterior — batched post-processing of MS-TVP-SVAR posterior draws.
//!
//! Purpose
//! -------
//! Turn a posterior sample of a (Markov-switching, time-varying-volatility)
//! structural VAR into the quantities used for inference: regime probability
//! paths (filtered, forecasted, smoothed), structural shocks, fitted values,
//! impulse responses, and sign-normalized impact matrices.
//!
//! Key behaviors
//! -------------
//! - [`posterior`] defines the draw and panel containers and validates batch
//!   dimensions once at entry.
//! - [`regimes`] runs the Hamilton filter and Kim smoother per draw.
//! - [`structural`] computes shocks, impulse responses, and Waggoner–Zha sign
//!   normalization per draw.
//! - [`batch`] maps those routines over all draws, sequentially or in
//!   parallel, with per-draw failure slots.
//!
//! Invariants & assumptions
//! ------------------------
//! - Draws are produced by an upstream sampler and are read-only here.
//! - Every probability path column lies on the simplex; every sign vector
//!   has entries in `{−1, +1}`.
//!
//! Conventions
//! -----------
//! - Matrices are `ndarray::Array2<f64>`, variables by rows and time by
//!   columns (N×T, M×T); response tensors are `Array3<f64>` indexed
//!   `[variable, shock, horizon]`.
//! - Errors are reported through [`errors::SvarError`].
//!
//! Downstream usage
//! ----------------
//! - Most callers only need the [`prelude`].
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` holds end-to-end checks
//!   of the batch operations.

pub mod batch;
pub mod errors;
pub(crate) mod linalg;
pub mod posterior;
pub mod regimes;
pub mod structural;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use svar_posterior::prelude::*;
//
// to import the batch surface and its input types in a single line.

pub mod prelude {
    pub use crate::batch::{
        BatchOptions, BatchOutput, Execution, compute_fitted_values, compute_impulse_responses,
        compute_probability_paths, compute_structural_shocks, normalize_regime_signs,
        normalize_signs, select_sign_vectors,
    };
    pub use crate::errors::{SvarError, SvarResult};
    pub use crate::posterior::{MarkovChain, ObservationPanel, PosteriorDraw, ResidualScale};
    pub use crate::regimes::{DegeneracyPolicy, ProbabilityKind};
    pub use crate::structural::{IrfOptions, ShockMode, SignNormalization, SignOptions};
}
