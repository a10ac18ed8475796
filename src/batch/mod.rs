//! batch — draw-level orchestration of the post-processing routines.
//!
//! Purpose
//! -------
//! Apply the per-draw routines in [`crate::regimes`] and [`crate::structural`]
//! to a whole posterior sample, sequentially or on a rayon pool, and collect
//! the results into draw-indexed [`BatchOutput`]s.
//!
//! Key behaviors
//! -------------
//! - Inputs are validated once at entry ([`crate::posterior::Dims`]); shape
//!   errors, a singular reference, an oversized sign search, and thread-pool
//!   failures abort the call.
//! - Per-draw numeric failures (`SvarError::is_draw_level`) are stored in the
//!   draw's slot; the remaining draws still run.
//! - Shared inputs are borrowed read-only by all workers; no locks.
//!
//! Conventions
//! -----------
//! - This is the only layer that logs (`tracing` spans, `debug!` summaries,
//!   `warn!` for failed draws and large sign searches).
//!
//! Downstream usage
//! ----------------
//! - Build draws with `PosteriorDraw::fixed` / `PosteriorDraw::switching`,
//!   an `ObservationPanel`, and call the `compute_*` / `normalize_*`
//!   functions with a [`BatchOptions`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover the driver's ordering and error routing and each
//!   operation's entry validation; `tests/integration_posterior_pipeline.rs`
//!   exercises the operations end to end.

pub mod driver;
pub mod operations;
pub mod options;
pub mod output;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::driver::BatchDriver;
pub use self::operations::{
    compute_fitted_values, compute_impulse_responses, compute_probability_paths,
    compute_structural_shocks, normalize_regime_signs, normalize_signs, select_sign_vectors,
};
pub use self::options::{BatchOptions, Execution};
pub use self::output::BatchOutput;
