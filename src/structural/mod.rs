//! structural — shocks, impulse responses, and sign normalization.
//!
//! Purpose
//! -------
//! Per-draw structural computations on top of the posterior containers:
//! structural shocks and fitted values ([`shocks`]), impulse-response tensors
//! ([`irf`]), and the Waggoner–Zha sign search ([`normalization`]).
//!
//! Key behaviors
//! -------------
//! - Shocks use either a probability-weighted impact matrix or the most
//!   probable regime's matrix ([`ShockMode`]).
//! - Impulse responses start from the impact matrix and propagate through the
//!   first `p` lag blocks of `A`.
//! - Sign normalization shares one precomputed [`SignReference`] across all
//!   candidates.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs were shape-checked at batch entry.
//! - Every function is pure: borrowed inputs, newly allocated outputs.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule use small hand-computed cases; the
//!   integration tests drive the same code through the batch layer.

pub mod irf;
pub mod normalization;
pub mod shocks;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::irf::{IrfOptions, impulse_responses};
pub use self::normalization::{
    SignNormalization, SignOptions, SignReference, apply_signs, sign_vector,
};
pub use self::shocks::{
    ShockMode, fitted_values, most_probable_regime, structural_shocks, structural_shocks_selected,
    structural_shocks_weighted,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::irf::{IrfOptions, impulse_responses};
    pub use super::normalization::{SignNormalization, SignOptions, SignReference};
    pub use super::shocks::{ShockMode, fitted_values, structural_shocks};
}
